// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chronoline Model: timeline item geometry, settings, selection, and the
//! persisted document format.
//!
//! This crate owns the editor's data model:
//! - The three item kinds — event cards, period bars, artist life-span bars —
//!   as a tagged variant over [`ItemKind`], with per-type geometry clamping.
//! - [`TimelineSettings`], validated at the boundary so the year↔pixel scale
//!   can never be handed a degenerate range.
//! - Auto-fit sizing rules that grow (never shrink) a box to guarantee its
//!   text labels are not clipped.
//! - [`Selection`] bookkeeping for the selected item and the selected text
//!   label, with self-healing of dangling references.
//! - The versioned JSON document format, with lenient loading: every
//!   top-level key is optional and settings merge field-by-field onto the
//!   current defaults.
//!
//! The single owner of all of this is [`TimelineState`], constructed at
//! startup and mutated synchronously by the interaction layer
//! (`chronoline_interact`) and the host's CRUD collaborators. Horizontal item
//! positions are never stored here: they are always derived from year fields
//! through `chronoline_axis` by the scene layer.

mod autofit;
mod document;
mod item;
mod selection;
mod settings;
mod state;

pub use autofit::{
    ARTIST_LINE_HEIGHT, ARTIST_PADDING, EVENT_IMAGE_MIN_HEIGHT, EVENT_LINE_HEIGHT, EVENT_PADDING,
    text_block_height,
};
pub use document::{DOCUMENT_VERSION, DocumentError, TimelineDocument};
pub use item::{
    ARTIST_MAX_HEIGHT, ARTIST_MIN_HEIGHT, ArtistBar, EVENT_MAX_HEIGHT, EVENT_MAX_WIDTH,
    EVENT_MIN_HEIGHT, EVENT_MIN_WIDTH, EventCard, ItemId, ItemKind, PERIOD_DEFAULT_HEIGHT,
    PeriodBar, clamp_artist_height, clamp_event_height, clamp_event_width,
};
pub use selection::{ItemRef, Selection, TextField, TextRef};
pub use settings::{PAGE_HEIGHT, PAGE_WIDTH, SettingsError, SettingsPatch, TimelineSettings};
pub use state::TimelineState;
