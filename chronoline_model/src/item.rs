// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three timeline item kinds and their geometry bounds.

use serde::{Deserialize, Serialize};

/// Minimum event card width in pixels.
pub const EVENT_MIN_WIDTH: f64 = 80.0;
/// Maximum event card width in pixels.
pub const EVENT_MAX_WIDTH: f64 = 800.0;
/// Minimum event card height in pixels.
pub const EVENT_MIN_HEIGHT: f64 = 80.0;
/// Maximum event card height in pixels.
pub const EVENT_MAX_HEIGHT: f64 = 900.0;
/// Minimum artist bar height in pixels.
pub const ARTIST_MIN_HEIGHT: f64 = 28.0;
/// Maximum artist bar height in pixels.
pub const ARTIST_MAX_HEIGHT: f64 = 300.0;
/// Height given to a period bar when the document does not specify one.
pub const PERIOD_DEFAULT_HEIGHT: f64 = 40.0;

/// Clamps an event card width into `[EVENT_MIN_WIDTH, EVENT_MAX_WIDTH]`.
#[must_use]
pub fn clamp_event_width(width: f64) -> f64 {
    width.clamp(EVENT_MIN_WIDTH, EVENT_MAX_WIDTH)
}

/// Clamps an event card height into `[EVENT_MIN_HEIGHT, EVENT_MAX_HEIGHT]`.
#[must_use]
pub fn clamp_event_height(height: f64) -> f64 {
    height.clamp(EVENT_MIN_HEIGHT, EVENT_MAX_HEIGHT)
}

/// Clamps an artist bar height into `[ARTIST_MIN_HEIGHT, ARTIST_MAX_HEIGHT]`.
#[must_use]
pub fn clamp_artist_height(height: f64) -> f64 {
    height.clamp(ARTIST_MIN_HEIGHT, ARTIST_MAX_HEIGHT)
}

/// Identifier for a timeline item.
///
/// Ids are creation-time millisecond timestamps supplied by the host, unique
/// under normal use; collision is only possible at sub-millisecond creation
/// rates, an accepted limitation of the document format.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ItemId(pub i64);

/// Tagged discriminant over the three item kinds.
///
/// The interaction state machine and the scene builder match on this
/// exhaustively; there are no string-typed item tags anywhere in the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// An image + year card connected to the axis.
    Event,
    /// A colored year-range bar.
    Period,
    /// A life-span bar between birth and death years.
    Artist,
}

/// Accepts calendar years written either as JSON numbers or as strings.
///
/// Older documents store year fields as strings (`"year": "1750"`); newer
/// ones use numbers. Serialization always writes numbers.
pub(crate) mod flex_year {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(year: &i32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(*year)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        struct FlexYear;

        impl Visitor<'_> for FlexYear {
            type Value = i32;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("a calendar year as a number or string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
                i32::try_from(v).map_err(|_| E::custom("year out of range"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
                i32::try_from(v).map_err(|_| E::custom("year out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<i32, E> {
                if v.is_finite() && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&v) {
                    #[expect(clippy::cast_possible_truncation, reason = "range checked above")]
                    Ok(v.round() as i32)
                } else {
                    Err(E::custom("year out of range"))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<i32, E> {
                v.trim()
                    .parse()
                    .map_err(|_| E::custom("year string is not a whole number"))
            }
        }

        deserializer.deserialize_any(FlexYear)
    }
}

/// An image + year card placed vertically relative to the axis.
///
/// The horizontal position is *derived*: the card is always centered under
/// `year_to_x(year)` and only `y` is stored. Width and height stay within the
/// event bounds and are additionally grown by the auto-fit rules so the title
/// and year labels are never clipped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventCard {
    /// Item identifier (creation timestamp).
    pub id: ItemId,
    /// Title shown under the image.
    pub name: String,
    /// Calendar year the card is anchored to.
    #[serde(with = "flex_year")]
    pub year: i32,
    /// Image payload as a data URI, supplied by the host's image intake.
    pub image: String,
    /// Top offset in world coordinates.
    pub y: f64,
    /// Card width in pixels.
    pub width: f64,
    /// Card height in pixels.
    pub height: f64,
    /// Title font size override in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_title_size: Option<f64>,
    /// Title bold override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_title_bold: Option<bool>,
    /// Year-label font size override in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_year_size: Option<f64>,
    /// Year-label bold override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_year_bold: Option<bool>,
}

impl Default for EventCard {
    fn default() -> Self {
        Self {
            id: ItemId::default(),
            name: String::new(),
            year: 0,
            image: String::new(),
            y: 100.0,
            width: 140.0,
            height: 160.0,
            custom_title_size: None,
            custom_title_bold: None,
            custom_year_size: None,
            custom_year_bold: None,
        }
    }
}

impl EventCard {
    /// Creates a card with the editor's creation defaults and fits it to its
    /// text.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, year: i32, image: impl Into<String>) -> Self {
        let mut card = Self {
            id,
            name: name.into(),
            year,
            image: image.into(),
            custom_title_size: Some(12.0),
            custom_year_size: Some(10.0),
            ..Self::default()
        };
        card.ensure_fits();
        card
    }

    /// Effective title font size in pixels.
    #[must_use]
    pub fn title_size(&self) -> f64 {
        self.custom_title_size.unwrap_or(12.0)
    }

    /// Effective title weight.
    #[must_use]
    pub fn title_bold(&self) -> bool {
        self.custom_title_bold.unwrap_or(false)
    }

    /// Effective year-label font size in pixels.
    #[must_use]
    pub fn year_size(&self) -> f64 {
        self.custom_year_size.unwrap_or(10.0)
    }

    /// Effective year-label weight.
    #[must_use]
    pub fn year_bold(&self) -> bool {
        self.custom_year_bold.unwrap_or(false)
    }

    /// Replaces malformed geometry with type minimums so a damaged document
    /// still renders. Returns `true` when anything was repaired.
    pub fn sanitize(&mut self) -> bool {
        let mut repaired = false;
        if !self.y.is_finite() {
            self.y = 0.0;
            repaired = true;
        }
        if !self.width.is_finite() {
            self.width = EVENT_MIN_WIDTH;
            repaired = true;
        }
        if !self.height.is_finite() {
            self.height = EVENT_MIN_HEIGHT;
            repaired = true;
        }
        if let Some(size) = self.custom_title_size
            && !size.is_finite()
        {
            self.custom_title_size = None;
            repaired = true;
        }
        if let Some(size) = self.custom_year_size
            && !size.is_finite()
        {
            self.custom_year_size = None;
            repaired = true;
        }
        if repaired {
            tracing::warn!(id = self.id.0, "repaired malformed event geometry");
        }
        repaired
    }
}

/// A colored bar spanning a year range.
///
/// The horizontal span is derived from `year_to_x(start_year)` to
/// `year_to_x(end_year)`; only the vertical offset and height are stored.
/// Periods carry no enforced size minimum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeriodBar {
    /// Item identifier (creation timestamp).
    pub id: ItemId,
    /// Period name.
    pub name: String,
    /// First year of the range.
    #[serde(with = "flex_year")]
    pub start_year: i32,
    /// Last year of the range.
    #[serde(with = "flex_year")]
    pub end_year: i32,
    /// Fill color as a CSS hex string.
    pub color: String,
    /// Top offset in world coordinates.
    pub y: f64,
    /// Bar height in pixels.
    pub height: f64,
    /// Name font size override in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_size: Option<f64>,
    /// Dates font size override in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates_size: Option<f64>,
    /// Name bold override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_bold: Option<bool>,
    /// Dates bold override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates_bold: Option<bool>,
}

impl Default for PeriodBar {
    fn default() -> Self {
        Self {
            id: ItemId::default(),
            name: String::new(),
            start_year: 0,
            end_year: 1,
            color: String::from("#4299e1"),
            y: 50.0,
            height: PERIOD_DEFAULT_HEIGHT,
            name_size: None,
            dates_size: None,
            name_bold: None,
            dates_bold: None,
        }
    }
}

impl PeriodBar {
    /// Creates a bar with the editor's creation defaults.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, start_year: i32, end_year: i32) -> Self {
        Self {
            id,
            name: name.into(),
            start_year,
            end_year,
            name_size: Some(13.0),
            dates_size: Some(11.0),
            name_bold: Some(true),
            dates_bold: Some(false),
            ..Self::default()
        }
    }

    /// Effective name font size in pixels.
    #[must_use]
    pub fn name_size(&self) -> f64 {
        self.name_size.unwrap_or(13.0)
    }

    /// Effective dates font size in pixels.
    #[must_use]
    pub fn dates_size(&self) -> f64 {
        self.dates_size.unwrap_or(11.0)
    }

    /// Effective name weight.
    #[must_use]
    pub fn name_bold(&self) -> bool {
        self.name_bold.unwrap_or(true)
    }

    /// Effective dates weight.
    #[must_use]
    pub fn dates_bold(&self) -> bool {
        self.dates_bold.unwrap_or(false)
    }

    /// Replaces malformed geometry with usable values. Returns `true` when
    /// anything was repaired.
    pub fn sanitize(&mut self) -> bool {
        let mut repaired = false;
        if !self.y.is_finite() {
            self.y = 0.0;
            repaired = true;
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            self.height = PERIOD_DEFAULT_HEIGHT;
            repaired = true;
        }
        if repaired {
            tracing::warn!(id = self.id.0, "repaired malformed period geometry");
        }
        repaired
    }
}

/// A life-span bar between birth and death years.
///
/// Inverted spans (`birth_year > death_year`) are tolerated: the scene layer
/// renders them at the minimum visual width with a warning flag rather than
/// rejecting the data or computing a negative width.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistBar {
    /// Item identifier (creation timestamp).
    pub id: ItemId,
    /// Artist name.
    pub name: String,
    /// Birth year.
    #[serde(with = "flex_year")]
    pub birth_year: i32,
    /// Death year.
    #[serde(with = "flex_year")]
    pub death_year: i32,
    /// Top offset in world coordinates.
    pub y: f64,
    /// Bar height in pixels; kept within artist bounds and grown by auto-fit.
    pub height: f64,
    /// Name font size override in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_size: Option<f64>,
    /// Dates font size override in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates_size: Option<f64>,
    /// Name bold override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_bold: Option<bool>,
    /// Dates bold override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates_bold: Option<bool>,
}

impl Default for ArtistBar {
    fn default() -> Self {
        Self {
            id: ItemId::default(),
            name: String::new(),
            birth_year: 0,
            death_year: 1,
            y: 100.0,
            height: 44.0,
            name_size: None,
            dates_size: None,
            name_bold: None,
            dates_bold: None,
        }
    }
}

impl ArtistBar {
    /// Creates a bar with the editor's creation defaults, placed `y` from the
    /// canvas top, and fits it to its text.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, birth_year: i32, death_year: i32, y: f64) -> Self {
        let mut bar = Self {
            id,
            name: name.into(),
            birth_year,
            death_year,
            y,
            name_size: Some(12.0),
            dates_size: Some(10.0),
            name_bold: Some(true),
            dates_bold: Some(false),
            ..Self::default()
        };
        bar.ensure_fits();
        bar
    }

    /// Effective name font size in pixels.
    #[must_use]
    pub fn name_size(&self) -> f64 {
        self.name_size.unwrap_or(12.0)
    }

    /// Effective dates font size in pixels.
    #[must_use]
    pub fn dates_size(&self) -> f64 {
        self.dates_size.unwrap_or(10.0)
    }

    /// Effective name weight.
    #[must_use]
    pub fn name_bold(&self) -> bool {
        self.name_bold.unwrap_or(true)
    }

    /// Effective dates weight.
    #[must_use]
    pub fn dates_bold(&self) -> bool {
        self.dates_bold.unwrap_or(false)
    }

    /// Whether the life span is inverted (`birth_year > death_year`).
    #[must_use]
    pub fn span_inverted(&self) -> bool {
        self.birth_year > self.death_year
    }

    /// Replaces malformed geometry with type minimums. Returns `true` when
    /// anything was repaired.
    pub fn sanitize(&mut self) -> bool {
        let mut repaired = false;
        if !self.y.is_finite() {
            self.y = 0.0;
            repaired = true;
        }
        if !self.height.is_finite() {
            self.height = ARTIST_MIN_HEIGHT;
            repaired = true;
        }
        if repaired {
            tracing::warn!(id = self.id.0, "repaired malformed artist geometry");
        }
        repaired
    }
}
