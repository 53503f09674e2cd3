// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single owner of all editor data.

use chronoline_axis::{ScaleError, YearScale};
use kurbo::Size;

use crate::document::{DOCUMENT_VERSION, DocumentError, TimelineDocument};
use crate::item::{ArtistBar, EventCard, ItemId, ItemKind, PeriodBar};
use crate::selection::{ItemRef, Selection, TextField, TextRef};
use crate::settings::TimelineSettings;

/// Complete editor state: item lists, settings, and selection.
///
/// Constructed once at startup and torn down never (single-page lifetime);
/// reset only by an explicit document load replacing its contents wholesale.
/// All mutation happens synchronously inside event handlers — the interaction
/// state machine and the host's CRUD collaborators both borrow this mutably,
/// one at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelineState {
    /// Event cards, in insertion order.
    pub events: Vec<EventCard>,
    /// Period bars, in insertion order.
    pub periods: Vec<PeriodBar>,
    /// Artist bars, in insertion order.
    pub artists: Vec<ArtistBar>,
    /// Global settings.
    pub settings: TimelineSettings,
    /// Current item/text selection.
    pub selection: Selection,
}

impl TimelineState {
    /// Creates a state with default settings and no items.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canvas pixel extent for the current settings.
    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.settings.canvas_size()
    }

    /// Builds the year↔pixel scale for the current settings.
    pub fn year_scale(&self) -> Result<YearScale, ScaleError> {
        self.settings.year_scale()
    }

    /// Whether an item with the given reference exists.
    #[must_use]
    pub fn contains(&self, item: ItemRef) -> bool {
        match item.kind {
            ItemKind::Event => self.events.iter().any(|e| e.id == item.id),
            ItemKind::Period => self.periods.iter().any(|p| p.id == item.id),
            ItemKind::Artist => self.artists.iter().any(|a| a.id == item.id),
        }
    }

    /// Looks up an event card mutably.
    pub fn event_mut(&mut self, id: ItemId) -> Option<&mut EventCard> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    /// Looks up a period bar mutably.
    pub fn period_mut(&mut self, id: ItemId) -> Option<&mut PeriodBar> {
        self.periods.iter_mut().find(|p| p.id == id)
    }

    /// Looks up an artist bar mutably.
    pub fn artist_mut(&mut self, id: ItemId) -> Option<&mut ArtistBar> {
        self.artists.iter_mut().find(|a| a.id == id)
    }

    /// Adds an event card and selects it.
    pub fn add_event(&mut self, mut event: EventCard) {
        event.ensure_fits();
        let id = event.id;
        self.events.push(event);
        self.selection.select_item(ItemRef {
            kind: ItemKind::Event,
            id,
        });
    }

    /// Adds a period bar and selects it.
    pub fn add_period(&mut self, period: PeriodBar) {
        let id = period.id;
        self.periods.push(period);
        self.selection.select_item(ItemRef {
            kind: ItemKind::Period,
            id,
        });
    }

    /// Adds an artist bar and selects it.
    pub fn add_artist(&mut self, mut artist: ArtistBar) {
        artist.ensure_fits();
        let id = artist.id;
        self.artists.push(artist);
        self.selection.select_item(ItemRef {
            kind: ItemKind::Artist,
            id,
        });
    }

    /// Removes an item. Returns whether anything was removed; any selection
    /// pointing at the item is cleared.
    pub fn remove(&mut self, item: ItemRef) -> bool {
        let before = self.events.len() + self.periods.len() + self.artists.len();
        match item.kind {
            ItemKind::Event => self.events.retain(|e| e.id != item.id),
            ItemKind::Period => self.periods.retain(|p| p.id != item.id),
            ItemKind::Artist => self.artists.retain(|a| a.id != item.id),
        }
        let removed = self.events.len() + self.periods.len() + self.artists.len() != before;
        if removed {
            self.heal_selection();
        }
        removed
    }

    /// Removes the selected item, if any, returning its reference.
    pub fn delete_selected(&mut self) -> Option<ItemRef> {
        let item = self.selection.item()?;
        self.remove(item).then_some(item)
    }

    /// Drops selections that reference deleted items.
    pub fn heal_selection(&mut self) {
        // Work around borrowing self inside the closure.
        let (events, periods, artists) = (&self.events, &self.periods, &self.artists);
        self.selection.retain_valid(|item| match item.kind {
            ItemKind::Event => events.iter().any(|e| e.id == item.id),
            ItemKind::Period => periods.iter().any(|p| p.id == item.id),
            ItemKind::Artist => artists.iter().any(|a| a.id == item.id),
        });
    }

    /// Applies a decoded image to an event card.
    ///
    /// Image decoding is asynchronous on the host side; by the time the
    /// result arrives the card may have been deleted, in which case the stale
    /// callback must be a no-op. A second upload for the same card simply
    /// overwrites the first — last write wins. Returns whether the image was
    /// applied.
    pub fn apply_image(&mut self, id: ItemId, image: String) -> bool {
        match self.event_mut(id) {
            Some(event) => {
                event.image = image;
                true
            }
            None => {
                tracing::debug!(id = id.0, "dropping image for deleted event");
                false
            }
        }
    }

    /// Sets the font size of the selected text label and refits its box.
    ///
    /// Returns whether anything changed (no text selection is a no-op).
    pub fn set_selected_text_size(&mut self, size: f64) -> bool {
        let Some(TextRef { item, field }) = self.selection.text() else {
            return false;
        };
        if !size.is_finite() || size <= 0.0 {
            return false;
        }
        match (item.kind, field) {
            (ItemKind::Event, TextField::Title) => {
                let Some(event) = self.event_mut(item.id) else {
                    return false;
                };
                event.custom_title_size = Some(size);
                event.ensure_fits();
            }
            (ItemKind::Event, TextField::Year) => {
                let Some(event) = self.event_mut(item.id) else {
                    return false;
                };
                event.custom_year_size = Some(size);
                event.ensure_fits();
            }
            (ItemKind::Period, TextField::Name) => {
                let Some(period) = self.period_mut(item.id) else {
                    return false;
                };
                period.name_size = Some(size);
            }
            (ItemKind::Period, TextField::Dates) => {
                let Some(period) = self.period_mut(item.id) else {
                    return false;
                };
                period.dates_size = Some(size);
            }
            (ItemKind::Artist, TextField::Name) => {
                let Some(artist) = self.artist_mut(item.id) else {
                    return false;
                };
                artist.name_size = Some(size);
                artist.ensure_fits();
            }
            (ItemKind::Artist, TextField::Dates) => {
                let Some(artist) = self.artist_mut(item.id) else {
                    return false;
                };
                artist.dates_size = Some(size);
                artist.ensure_fits();
            }
            // Selection construction already rejects mismatched fields.
            _ => return false,
        }
        true
    }

    /// Sets the weight of the selected text label.
    pub fn set_selected_text_bold(&mut self, bold: bool) -> bool {
        let Some(TextRef { item, field }) = self.selection.text() else {
            return false;
        };
        match (item.kind, field) {
            (ItemKind::Event, TextField::Title) => {
                let Some(event) = self.event_mut(item.id) else {
                    return false;
                };
                event.custom_title_bold = Some(bold);
            }
            (ItemKind::Event, TextField::Year) => {
                let Some(event) = self.event_mut(item.id) else {
                    return false;
                };
                event.custom_year_bold = Some(bold);
            }
            (ItemKind::Period, TextField::Name) => {
                let Some(period) = self.period_mut(item.id) else {
                    return false;
                };
                period.name_bold = Some(bold);
            }
            (ItemKind::Period, TextField::Dates) => {
                let Some(period) = self.period_mut(item.id) else {
                    return false;
                };
                period.dates_bold = Some(bold);
            }
            (ItemKind::Artist, TextField::Name) => {
                let Some(artist) = self.artist_mut(item.id) else {
                    return false;
                };
                artist.name_bold = Some(bold);
            }
            (ItemKind::Artist, TextField::Dates) => {
                let Some(artist) = self.artist_mut(item.id) else {
                    return false;
                };
                artist.dates_bold = Some(bold);
            }
            _ => return false,
        }
        true
    }

    /// Replaces the state's contents with a loaded document.
    ///
    /// Settings are merged field-by-field and validated *before* anything is
    /// committed, so a document with degenerate settings leaves the model
    /// unchanged. Item geometry is sanitized and refit on the way in; the
    /// selection is cleared.
    pub fn load_document(&mut self, document: TimelineDocument) -> Result<(), DocumentError> {
        let settings = match &document.settings {
            Some(patch) => self.settings.merged(patch),
            None => self.settings.clone(),
        };
        settings.validate()?;

        self.settings = settings;
        self.events = document.events;
        self.periods = document.periods;
        self.artists = document.artists;
        for event in &mut self.events {
            event.sanitize();
            event.ensure_fits();
        }
        for period in &mut self.periods {
            period.sanitize();
        }
        for artist in &mut self.artists {
            artist.sanitize();
            artist.ensure_fits();
        }
        self.selection.clear();
        Ok(())
    }

    /// Captures the full state as a document for export or persistence.
    #[must_use]
    pub fn snapshot(&self) -> TimelineDocument {
        TimelineDocument {
            events: self.events.clone(),
            periods: self.periods.clone(),
            artists: self.artists.clone(),
            settings: Some(self.settings.full_patch()),
            version: Some(String::from(DOCUMENT_VERSION)),
        }
    }
}
