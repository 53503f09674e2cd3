// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection bookkeeping for the editor.
//!
//! Tracks at most one selected item and at most one selected text label. The
//! container only does bookkeeping: callers decide how pointer input maps to
//! selection changes, and [`Selection::retain_valid`] self-heals references
//! left dangling by deletions instead of letting them leak into rendering.

use crate::item::{ItemId, ItemKind};

/// Reference to a timeline item by kind and id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemRef {
    /// Which list the item lives in.
    pub kind: ItemKind,
    /// The item's identifier within that list.
    pub id: ItemId,
}

/// Which text label of an item a text selection points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    /// Event card title.
    Title,
    /// Event card year label.
    Year,
    /// Period or artist name.
    Name,
    /// Period or artist dates label.
    Dates,
}

impl TextField {
    /// Whether this field exists on items of the given kind.
    #[must_use]
    pub fn applies_to(self, kind: ItemKind) -> bool {
        match self {
            Self::Title | Self::Year => kind == ItemKind::Event,
            Self::Name | Self::Dates => matches!(kind, ItemKind::Period | ItemKind::Artist),
        }
    }
}

/// Reference to one editable text label plus the item that backs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRef {
    /// The owning item.
    pub item: ItemRef,
    /// The label being edited.
    pub field: TextField,
}

/// Current item and text-label selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    item: Option<ItemRef>,
    text: Option<TextRef>,
}

impl Selection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected item, if any.
    #[must_use]
    pub fn item(&self) -> Option<ItemRef> {
        self.item
    }

    /// Returns the selected text label, if any.
    #[must_use]
    pub fn text(&self) -> Option<TextRef> {
        self.text
    }

    /// Whether the given item is the current selection.
    #[must_use]
    pub fn is_selected(&self, item: ItemRef) -> bool {
        self.item == Some(item)
    }

    /// Selects an item, replacing any previous item selection.
    pub fn select_item(&mut self, item: ItemRef) {
        self.item = Some(item);
    }

    /// Selects a text label, replacing any previous (possibly stale) text
    /// selection first.
    pub fn select_text(&mut self, text: TextRef) {
        self.text = None;
        if text.field.applies_to(text.item.kind) {
            self.text = Some(text);
        }
    }

    /// Clears the text-label selection.
    pub fn clear_text(&mut self) {
        self.text = None;
    }

    /// Clears both selections (click-to-deselect on the background).
    pub fn clear(&mut self) {
        self.item = None;
        self.text = None;
    }

    /// Drops any selection whose item no longer exists.
    ///
    /// Called after deletions and wholesale loads so a dangling `{id, kind}`
    /// can never reach the renderer.
    pub fn retain_valid(&mut self, alive: impl Fn(ItemRef) -> bool) {
        if self.item.is_some_and(|item| !alive(item)) {
            self.item = None;
        }
        if self.text.is_some_and(|text| !alive(text.item)) {
            self.text = None;
        }
    }
}
