// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a pointer-down landed on.

use chronoline_model::{ItemKind, ItemRef, TextRef};

/// A resize handle on an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Event card right edge: width only.
    EventWidth,
    /// Event card bottom edge: height only.
    EventHeight,
    /// Event card corner: proportional width + height.
    EventCorner,
    /// Artist bar left edge: adjusts the birth year.
    ArtistBirth,
    /// Artist bar right edge: adjusts the death year.
    ArtistDeath,
    /// Artist bar bottom edge: height only.
    ArtistHeight,
    /// Artist bar corner: extends the death year and height together.
    ArtistCorner,
}

impl HandleKind {
    /// Whether items of the given kind carry this handle.
    #[must_use]
    pub fn applies_to(self, kind: ItemKind) -> bool {
        match self {
            Self::EventWidth | Self::EventHeight | Self::EventCorner => kind == ItemKind::Event,
            Self::ArtistBirth | Self::ArtistDeath | Self::ArtistHeight | Self::ArtistCorner => {
                kind == ItemKind::Artist
            }
        }
    }
}

/// Result of hit-testing a pointer-down position.
///
/// Produced by the scene layer (or any other render target) and consumed by
/// [`crate::InteractionController::pointer_down`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitTarget {
    /// The canvas background: starts a pan and deselects.
    Background,
    /// An item's body, away from handles and text labels: starts a drag.
    Item(ItemRef),
    /// An editable text label: selects it for the text-style tools.
    Text(TextRef),
    /// A resize handle: starts a resize.
    Handle {
        /// The item carrying the handle.
        item: ItemRef,
        /// Which handle was grabbed.
        handle: HandleKind,
    },
}
