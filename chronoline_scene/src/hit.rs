// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World-space hit testing over a built scene.

use chronoline_interact::{HandleKind, HitTarget};
use chronoline_model::TextRef;
use kurbo::Point;

use crate::display::{HandleRegion, Label, Scene};

impl Scene {
    /// Resolves a world-space pointer position to what it landed on.
    ///
    /// Stacking matches the draw order: events over artists over periods,
    /// later items over earlier ones within a layer. Within an item, handles
    /// win over text labels, and labels over the body, mirroring how the
    /// pointer targets nest. Anything else is the background.
    #[must_use]
    pub fn hit_test(&self, world: Point) -> HitTarget {
        for card in self.events.iter().rev() {
            if let Some(handle) = hit_handle(&card.handles, world) {
                return HitTarget::Handle {
                    item: card.item,
                    handle,
                };
            }
            if let Some(text) = hit_label(&card.title, world).or_else(|| hit_label(&card.year, world))
            {
                return HitTarget::Text(text);
            }
            if card.frame.contains(world) {
                return HitTarget::Item(card.item);
            }
        }

        for bar in self.artists.iter().rev() {
            if let Some(handle) = hit_handle(&bar.handles, world) {
                return HitTarget::Handle {
                    item: bar.item,
                    handle,
                };
            }
            if let Some(text) = hit_label(&bar.name, world).or_else(|| hit_label(&bar.dates, world))
            {
                return HitTarget::Text(text);
            }
            if bar.frame.contains(world) {
                return HitTarget::Item(bar.item);
            }
        }

        for bar in self.periods.iter().rev() {
            if let Some(text) = hit_label(&bar.name, world).or_else(|| hit_label(&bar.dates, world))
            {
                return HitTarget::Text(text);
            }
            if bar.frame.contains(world) {
                return HitTarget::Item(bar.item);
            }
        }

        HitTarget::Background
    }
}

fn hit_handle(handles: &[HandleRegion], world: Point) -> Option<HandleKind> {
    handles
        .iter()
        .find(|region| region.bounds.contains(world))
        .map(|region| region.handle)
}

fn hit_label(label: &Label, world: Point) -> Option<TextRef> {
    label.target.filter(|_| label.bounds.contains(world))
}
