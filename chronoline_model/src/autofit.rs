// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-fit sizing rules.
//!
//! Text-bearing boxes are grown so their labels are never clipped, assuming
//! up to two lines for the primary label and one for the secondary. The rules
//! only ever *grow* a box — a user who manually enlarged a card keeps that
//! size — and they are idempotent: with unchanged font sizes, fitting twice
//! produces the same dimensions as fitting once.
//!
//! Fitting runs on item creation, on text size or content changes, and after
//! every resize step, so a card can never be resized too small to show its
//! text.

use crate::item::{ARTIST_MIN_HEIGHT, ArtistBar, EVENT_MIN_HEIGHT, EVENT_MIN_WIDTH, EventCard};

/// Line-height multiplier for event card labels.
pub const EVENT_LINE_HEIGHT: f64 = 1.25;
/// Line-height multiplier for artist bar labels.
pub const ARTIST_LINE_HEIGHT: f64 = 1.2;
/// Minimum height reserved for the event image.
pub const EVENT_IMAGE_MIN_HEIGHT: f64 = 50.0;
/// Fixed chrome/padding inside an event card.
pub const EVENT_PADDING: f64 = 26.0;
/// Fixed chrome/padding inside an artist bar.
pub const ARTIST_PADDING: f64 = 18.0;

/// Height of `lines` lines of text at `font_size`, using the given
/// line-height multiplier and rounded up to whole pixels the way the label
/// layout does.
pub fn text_block_height(font_size: f64, line_height: f64, lines: f64) -> f64 {
    (font_size * line_height * lines).ceil()
}

impl EventCard {
    /// Minimum height that shows the image plus a two-line title and a
    /// one-line year label at the card's current font sizes.
    #[must_use]
    pub fn min_fitting_height(&self) -> f64 {
        let title = text_block_height(self.title_size(), EVENT_LINE_HEIGHT, 2.0);
        let year = text_block_height(self.year_size(), EVENT_LINE_HEIGHT, 1.0);
        (EVENT_IMAGE_MIN_HEIGHT + title + year + EVENT_PADDING).max(EVENT_MIN_HEIGHT)
    }

    /// Grows the card so its labels fit. Never shrinks.
    pub fn ensure_fits(&mut self) {
        self.height = self.height.max(self.min_fitting_height());
        self.width = self.width.max(EVENT_MIN_WIDTH);
    }
}

impl ArtistBar {
    /// Minimum height that shows a two-line name and a one-line dates label
    /// at the bar's current font sizes.
    #[must_use]
    pub fn min_fitting_height(&self) -> f64 {
        let name = text_block_height(self.name_size(), ARTIST_LINE_HEIGHT, 2.0);
        let dates = text_block_height(self.dates_size(), ARTIST_LINE_HEIGHT, 1.0);
        (ARTIST_PADDING + name + dates).max(ARTIST_MIN_HEIGHT)
    }

    /// Grows the bar so its labels fit. Never shrinks.
    pub fn ensure_fits(&mut self) {
        self.height = self.height.max(self.min_fitting_height());
    }
}

#[cfg(test)]
mod tests {
    use crate::item::{ArtistBar, EventCard, ItemId};

    #[test]
    fn fitting_is_idempotent() {
        let mut card = EventCard::new(ItemId(1), "Fall of Rome", 476, "data:");
        card.ensure_fits();
        let once = (card.width, card.height);
        card.ensure_fits();
        assert_eq!((card.width, card.height), once);

        let mut bar = ArtistBar::new(ItemId(2), "Vivaldi", 1678, 1741, 180.0);
        bar.ensure_fits();
        let once = bar.height;
        bar.ensure_fits();
        assert_eq!(bar.height, once);
    }

    #[test]
    fn fitting_never_shrinks_a_manually_enlarged_box() {
        let mut card = EventCard::new(ItemId(1), "n", 0, "data:");
        card.width = 500.0;
        card.height = 700.0;
        card.ensure_fits();
        assert_eq!(card.width, 500.0);
        assert_eq!(card.height, 700.0);
    }

    #[test]
    fn larger_text_grows_the_box() {
        let mut card = EventCard::new(ItemId(1), "n", 0, "data:");
        card.width = 140.0;
        card.height = 80.0;
        card.ensure_fits();
        let before = card.height;

        card.custom_title_size = Some(40.0);
        card.ensure_fits();
        assert!(card.height > before);
        // 50 (image) + ceil(40 * 1.25 * 2) + ceil(10 * 1.25) + 26.
        assert_eq!(card.height, 50.0 + 100.0 + 13.0 + 26.0);
    }

    #[test]
    fn artist_height_floors_at_the_type_minimum() {
        let mut bar = ArtistBar::default();
        bar.name_size = Some(1.0);
        bar.dates_size = Some(1.0);
        bar.height = 0.0;
        bar.ensure_fits();
        assert!(bar.height >= 28.0);
    }
}
