// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chronoline_model::{
    ItemKind, ItemRef, TimelineState, clamp_artist_height, clamp_event_height, clamp_event_width,
};
use chronoline_view::Viewport;
use kurbo::{Point, Vec2};

use crate::hit::{HandleKind, HitTarget};

/// Values captured at resize start.
///
/// Every field is filled from the item at pointer-down; which ones the update
/// rule reads depends on the handle. Geometry is recomputed from these
/// anchors plus the current pointer position on every move, so intermediate
/// clamping never accumulates error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeAnchor {
    /// Pointer world position at resize start.
    pub world: Point,
    /// Item width at resize start.
    pub width: f64,
    /// Item height at resize start.
    pub height: f64,
    /// Artist birth year at resize start.
    pub birth_year: i32,
    /// Artist death year at resize start.
    pub death_year: i32,
}

/// The exclusive active-operation slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    /// No operation in progress.
    Idle,
    /// Panning the canvas; `grab` is pointer position minus pan at start.
    Panning {
        /// Pan anchor in container coordinates.
        grab: Vec2,
    },
    /// Dragging an item vertically.
    Dragging {
        /// The dragged item.
        item: ItemRef,
        /// `world.y - item.y` captured at drag start.
        grab_offset_y: f64,
    },
    /// Resizing an item through a handle.
    Resizing {
        /// The resized item.
        item: ItemRef,
        /// Which handle drives the update rule.
        handle: HandleKind,
        /// Values captured at resize start.
        anchor: ResizeAnchor,
    },
}

/// Drives the drag/resize/pan state machine from routed pointer events.
///
/// All positions are in container space (client coordinates corrected for the
/// container origin and scroll); world positions are derived through the
/// viewport internally so the math stays correct at any zoom.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    interaction: Interaction,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::Idle
    }
}

impl InteractionController {
    /// Creates a controller in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current interaction for inspection.
    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Whether no operation is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.interaction == Interaction::Idle
    }

    /// Handles a pointer-down on the given hit target.
    ///
    /// Unconditionally replaces any active interaction; only one pointer
    /// device is assumed, so there is never a previous operation worth
    /// keeping.
    pub fn pointer_down(
        &mut self,
        hit: HitTarget,
        cursor: Point,
        state: &mut TimelineState,
        viewport: &Viewport,
    ) {
        self.interaction = Interaction::Idle;

        match hit {
            HitTarget::Background => {
                state.selection.clear();
                self.interaction = Interaction::Panning {
                    grab: cursor.to_vec2() - viewport.pan(),
                };
            }
            HitTarget::Item(item) => {
                let world = viewport.to_world(cursor);
                let Some(y) = item_y(state, item) else {
                    return;
                };
                state.selection.select_item(item);
                self.interaction = Interaction::Dragging {
                    item,
                    grab_offset_y: world.y - y,
                };
            }
            HitTarget::Text(text) => {
                if state.contains(text.item) {
                    state.selection.select_text(text);
                }
            }
            HitTarget::Handle { item, handle } => {
                if !handle.applies_to(item.kind) {
                    tracing::warn!(?handle, ?item, "ignoring handle on wrong item kind");
                    return;
                }
                let Some(anchor) = capture_anchor(state, item, viewport.to_world(cursor)) else {
                    return;
                };
                self.interaction = Interaction::Resizing {
                    item,
                    handle,
                    anchor,
                };
            }
        }
    }

    /// Handles a pointer move, recomputing geometry from the captured anchor.
    ///
    /// Returns whether the model or viewport changed (i.e. the host should
    /// re-render). A move in the idle state is a no-op.
    pub fn pointer_move(
        &mut self,
        cursor: Point,
        state: &mut TimelineState,
        viewport: &mut Viewport,
    ) -> bool {
        match self.interaction {
            Interaction::Idle => false,
            Interaction::Panning { grab } => {
                viewport.set_pan(cursor.to_vec2() - grab);
                true
            }
            Interaction::Dragging {
                item,
                grab_offset_y,
            } => {
                let world = viewport.to_world(cursor);
                if self.drag_to(state, item, world.y - grab_offset_y) {
                    true
                } else {
                    // The item vanished mid-drag; self-heal back to idle.
                    self.interaction = Interaction::Idle;
                    false
                }
            }
            Interaction::Resizing {
                item,
                handle,
                anchor,
            } => {
                let world = viewport.to_world(cursor);
                if resize_to(state, item, handle, anchor, world) {
                    true
                } else {
                    self.interaction = Interaction::Idle;
                    false
                }
            }
        }
    }

    /// Ends any active interaction.
    ///
    /// Safe to call from anywhere, including with no matching pointer-down
    /// (focus loss, release outside the window).
    pub fn pointer_up(&mut self) {
        self.interaction = Interaction::Idle;
    }

    fn drag_to(&self, state: &mut TimelineState, item: ItemRef, y: f64) -> bool {
        let canvas_height = state.canvas_size().height;
        match item.kind {
            ItemKind::Event => {
                let Some(event) = state.event_mut(item.id) else {
                    return false;
                };
                event.y = clamp_drag_y(y, canvas_height, event.height);
            }
            ItemKind::Period => {
                let Some(period) = state.period_mut(item.id) else {
                    return false;
                };
                period.y = clamp_drag_y(y, canvas_height, period.height);
            }
            ItemKind::Artist => {
                let Some(artist) = state.artist_mut(item.id) else {
                    return false;
                };
                artist.y = clamp_drag_y(y, canvas_height, artist.height);
            }
        }
        true
    }
}

/// Clamps a dragged top offset to `[0, canvas_height - item_height]`.
///
/// The lower bound wins when the item is taller than the canvas.
fn clamp_drag_y(y: f64, canvas_height: f64, item_height: f64) -> f64 {
    y.min(canvas_height - item_height).max(0.0)
}

fn item_y(state: &TimelineState, item: ItemRef) -> Option<f64> {
    match item.kind {
        ItemKind::Event => state.events.iter().find(|e| e.id == item.id).map(|e| e.y),
        ItemKind::Period => state.periods.iter().find(|p| p.id == item.id).map(|p| p.y),
        ItemKind::Artist => state.artists.iter().find(|a| a.id == item.id).map(|a| a.y),
    }
}

fn capture_anchor(state: &TimelineState, item: ItemRef, world: Point) -> Option<ResizeAnchor> {
    match item.kind {
        ItemKind::Event => {
            let event = state.events.iter().find(|e| e.id == item.id)?;
            Some(ResizeAnchor {
                world,
                width: event.width,
                height: event.height,
                birth_year: 0,
                death_year: 0,
            })
        }
        ItemKind::Artist => {
            let artist = state.artists.iter().find(|a| a.id == item.id)?;
            Some(ResizeAnchor {
                world,
                width: 0.0,
                height: artist.height,
                birth_year: artist.birth_year,
                death_year: artist.death_year,
            })
        }
        ItemKind::Period => None,
    }
}

fn resize_to(
    state: &mut TimelineState,
    item: ItemRef,
    handle: HandleKind,
    anchor: ResizeAnchor,
    world: Point,
) -> bool {
    let dx = world.x - anchor.world.x;
    let dy = world.y - anchor.world.y;

    match handle {
        HandleKind::EventWidth => {
            let Some(event) = state.event_mut(item.id) else {
                return false;
            };
            event.width = clamp_event_width(anchor.width + dx);
            event.ensure_fits();
        }
        HandleKind::EventHeight => {
            let Some(event) = state.event_mut(item.id) else {
                return false;
            };
            event.height = clamp_event_height(anchor.height + dy);
            event.ensure_fits();
        }
        HandleKind::EventCorner => {
            let delta = dx.max(dy);
            let Some(event) = state.event_mut(item.id) else {
                return false;
            };
            event.width = clamp_event_width(anchor.width + delta);
            event.height = clamp_event_height(anchor.height + delta);
            event.ensure_fits();
        }
        HandleKind::ArtistBirth => {
            let Ok(scale) = state.year_scale() else {
                return false;
            };
            let delta_years = scale.pixel_delta_to_year_delta(anchor.birth_year, dx);
            let axis_start = state.settings.start_year;
            let Some(artist) = state.artist_mut(item.id) else {
                return false;
            };
            // Keep birth at least a year before death; the lower bound wins
            // if the anchor span was already inverted.
            artist.birth_year = (anchor.birth_year + delta_years)
                .min(anchor.death_year - 1)
                .max(axis_start);
        }
        HandleKind::ArtistDeath => {
            let Ok(scale) = state.year_scale() else {
                return false;
            };
            let delta_years = scale.pixel_delta_to_year_delta(anchor.death_year, dx);
            let axis_end = state.settings.end_year;
            let Some(artist) = state.artist_mut(item.id) else {
                return false;
            };
            artist.death_year = (anchor.death_year + delta_years)
                .max(anchor.birth_year + 1)
                .min(axis_end);
        }
        HandleKind::ArtistHeight => {
            let Some(artist) = state.artist_mut(item.id) else {
                return false;
            };
            artist.height = clamp_artist_height(anchor.height + dy);
            artist.ensure_fits();
        }
        HandleKind::ArtistCorner => {
            // Proportional: extend the life span to the right and the height
            // together by the dominant delta.
            let delta = dx.max(dy);
            let Ok(scale) = state.year_scale() else {
                return false;
            };
            let target_year = scale
                .x_to_year(scale.year_to_x(f64::from(anchor.death_year)) + delta);
            let axis_end = state.settings.end_year;
            let Some(artist) = state.artist_mut(item.id) else {
                return false;
            };
            artist.death_year = target_year.max(anchor.birth_year + 1).min(axis_end);
            artist.height = clamp_artist_height(anchor.height + delta);
            artist.ensure_fits();
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use chronoline_model::{
        ArtistBar, EventCard, ItemId, ItemKind, ItemRef, PeriodBar, TimelineState,
    };
    use chronoline_view::Viewport;
    use kurbo::{Point, Vec2};

    use super::{HandleKind, HitTarget, Interaction, InteractionController};

    const EVENT: ItemRef = ItemRef {
        kind: ItemKind::Event,
        id: ItemId(1),
    };
    const PERIOD: ItemRef = ItemRef {
        kind: ItemKind::Period,
        id: ItemId(2),
    };
    const ARTIST: ItemRef = ItemRef {
        kind: ItemKind::Artist,
        id: ItemId(3),
    };

    fn fixture() -> (TimelineState, Viewport, InteractionController) {
        let mut state = TimelineState::new();
        state.add_event(EventCard::new(ItemId(1), "event", 0, "data:"));
        state.add_period(PeriodBar::new(ItemId(2), "period", 1600, 1750));
        state.add_artist(ArtistBar::new(ItemId(3), "artist", 1678, 1741, 180.0));
        state.selection.clear();
        (state, Viewport::new(), InteractionController::new())
    }

    #[test]
    fn background_down_pans_and_deselects() {
        let (mut state, mut viewport, mut controller) = fixture();
        state.selection.select_item(EVENT);

        controller.pointer_down(HitTarget::Background, Point::new(100.0, 100.0), &mut state, &viewport);
        assert!(matches!(controller.interaction(), Interaction::Panning { .. }));
        assert_eq!(state.selection.item(), None);

        assert!(controller.pointer_move(Point::new(130.0, 90.0), &mut state, &mut viewport));
        assert_eq!(viewport.pan(), Vec2::new(30.0, -10.0));

        controller.pointer_up();
        assert!(controller.is_idle());
    }

    #[test]
    fn dragging_moves_vertically_and_clamps_to_canvas() {
        let (mut state, mut viewport, mut controller) = fixture();
        let start_y = state.events[0].y;
        let grab = Point::new(500.0, start_y + 10.0);

        controller.pointer_down(HitTarget::Item(EVENT), grab, &mut state, &viewport);
        assert!(matches!(controller.interaction(), Interaction::Dragging { .. }));
        assert_eq!(state.selection.item(), Some(EVENT));

        assert!(controller.pointer_move(Point::new(500.0, start_y + 60.0), &mut state, &mut viewport));
        assert_eq!(state.events[0].y, start_y + 50.0);

        // Far above the canvas clamps to the top edge.
        controller.pointer_move(Point::new(500.0, -5_000.0), &mut state, &mut viewport);
        assert_eq!(state.events[0].y, 0.0);

        // Far below clamps to canvas height minus the card height.
        controller.pointer_move(Point::new(500.0, 50_000.0), &mut state, &mut viewport);
        let expected = state.canvas_size().height - state.events[0].height;
        assert_eq!(state.events[0].y, expected);
    }

    #[test]
    fn dragging_respects_the_viewport_zoom() {
        let (mut state, mut viewport, mut controller) = fixture();
        viewport.set_zoom(2.0);
        let start_y = state.periods[0].y;
        // Container-space grab over the period at world y = start_y.
        let grab = viewport.to_screen(Point::new(100.0, start_y));

        controller.pointer_down(HitTarget::Item(PERIOD), grab, &mut state, &viewport);
        // 100 px of container movement is 50 px of world movement at zoom 2.
        controller.pointer_move(grab + Vec2::new(0.0, 100.0), &mut state, &mut viewport);
        assert_eq!(state.periods[0].y, start_y + 50.0);
    }

    #[test]
    fn width_resize_clamps_at_both_bounds() {
        let (mut state, mut viewport, mut controller) = fixture();
        let anchor = Point::new(300.0, 100.0);

        controller.pointer_down(
            HitTarget::Handle { item: EVENT, handle: HandleKind::EventWidth },
            anchor,
            &mut state,
            &viewport,
        );
        // Requesting a tiny width lands exactly on the minimum.
        controller.pointer_move(Point::new(-5_000.0, 100.0), &mut state, &mut viewport);
        assert_eq!(state.events[0].width, 80.0);
        // Requesting a huge width lands exactly on the maximum.
        controller.pointer_move(Point::new(50_000.0, 100.0), &mut state, &mut viewport);
        assert_eq!(state.events[0].width, 800.0);
    }

    #[test]
    fn corner_resize_moves_both_axes_by_the_dominant_delta() {
        let (mut state, mut viewport, mut controller) = fixture();
        let (w0, h0) = (state.events[0].width, state.events[0].height);
        let anchor = Point::new(300.0, 100.0);

        controller.pointer_down(
            HitTarget::Handle { item: EVENT, handle: HandleKind::EventCorner },
            anchor,
            &mut state,
            &viewport,
        );
        controller.pointer_move(anchor + Vec2::new(40.0, 25.0), &mut state, &mut viewport);
        assert_eq!(state.events[0].width, w0 + 40.0);
        assert_eq!(state.events[0].height, h0 + 40.0);
    }

    #[test]
    fn height_resize_cannot_shrink_below_the_text_fit() {
        let (mut state, mut viewport, mut controller) = fixture();
        let min_fit = state.events[0].min_fitting_height();
        let anchor = Point::new(300.0, 100.0);

        controller.pointer_down(
            HitTarget::Handle { item: EVENT, handle: HandleKind::EventHeight },
            anchor,
            &mut state,
            &viewport,
        );
        controller.pointer_move(anchor + Vec2::new(0.0, -5_000.0), &mut state, &mut viewport);
        assert!(state.events[0].height >= min_fit);
    }

    #[test]
    fn birth_handle_converts_pixels_to_years_and_clamps() {
        let (mut state, mut viewport, mut controller) = fixture();
        // Default settings: -500..2000 over 4200 px, so 1.68 px per year.
        let anchor = Point::new(1_000.0, 200.0);

        controller.pointer_down(
            HitTarget::Handle { item: ARTIST, handle: HandleKind::ArtistBirth },
            anchor,
            &mut state,
            &viewport,
        );
        // Dragging far left clamps the birth year at the axis start.
        controller.pointer_move(Point::new(-100_000.0, 200.0), &mut state, &mut viewport);
        assert_eq!(state.artists[0].birth_year, -500);
        // Dragging far right keeps birth at least a year before death.
        controller.pointer_move(Point::new(100_000.0, 200.0), &mut state, &mut viewport);
        assert_eq!(state.artists[0].birth_year, 1740);
        assert_eq!(state.artists[0].death_year, 1741);
    }

    #[test]
    fn death_handle_clamps_to_the_axis_end() {
        let (mut state, mut viewport, mut controller) = fixture();
        let anchor = Point::new(1_000.0, 200.0);

        controller.pointer_down(
            HitTarget::Handle { item: ARTIST, handle: HandleKind::ArtistDeath },
            anchor,
            &mut state,
            &viewport,
        );
        controller.pointer_move(Point::new(100_000.0, 200.0), &mut state, &mut viewport);
        assert_eq!(state.artists[0].death_year, 2000);
        controller.pointer_move(Point::new(-100_000.0, 200.0), &mut state, &mut viewport);
        assert_eq!(state.artists[0].death_year, 1679);
    }

    #[test]
    fn interactions_are_exclusive() {
        let (mut state, mut viewport, mut controller) = fixture();
        controller.pointer_down(
            HitTarget::Handle { item: EVENT, handle: HandleKind::EventWidth },
            Point::new(300.0, 100.0),
            &mut state,
            &viewport,
        );
        assert!(matches!(controller.interaction(), Interaction::Resizing { .. }));

        // A drag starting while the resize is nominally active leaves exactly
        // one state behind: the drag.
        controller.pointer_down(HitTarget::Item(PERIOD), Point::new(200.0, 60.0), &mut state, &viewport);
        assert!(matches!(
            controller.interaction(),
            Interaction::Dragging { item, .. } if *item == PERIOD
        ));

        // Resizing no longer updates the event.
        let width = state.events[0].width;
        controller.pointer_move(Point::new(900.0, 60.0), &mut state, &mut viewport);
        assert_eq!(state.events[0].width, width);
    }

    #[test]
    fn pointer_up_without_down_is_a_no_op() {
        let (mut state, mut viewport, mut controller) = fixture();
        controller.pointer_up();
        assert!(controller.is_idle());
        assert!(!controller.pointer_move(Point::new(10.0, 10.0), &mut state, &mut viewport));
    }

    #[test]
    fn deleting_the_item_mid_drag_resets_to_idle() {
        let (mut state, mut viewport, mut controller) = fixture();
        controller.pointer_down(HitTarget::Item(EVENT), Point::new(500.0, 110.0), &mut state, &viewport);
        state.remove(EVENT);
        assert!(!controller.pointer_move(Point::new(500.0, 200.0), &mut state, &mut viewport));
        assert!(controller.is_idle());
    }

    #[test]
    fn text_hit_selects_the_label_without_starting_a_drag() {
        let (mut state, viewport, mut controller) = fixture();
        controller.pointer_down(
            HitTarget::Text(chronoline_model::TextRef {
                item: EVENT,
                field: chronoline_model::TextField::Title,
            }),
            Point::new(500.0, 110.0),
            &mut state,
            &viewport,
        );
        assert!(controller.is_idle());
        assert!(state.selection.text().is_some());
    }
}
