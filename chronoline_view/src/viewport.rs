// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Default UI zoom range.
const DEFAULT_MIN_ZOOM: f64 = 0.1;
const DEFAULT_MAX_ZOOM: f64 = 3.0;

/// Pan + uniform-zoom view transform over the editor's world plane.
///
/// The combined screen transform is `screen = pan + zoom * world`. It is
/// exposed as a single [`Affine`] so a host can apply it to the axis canvas
/// and the item overlay in one step, keeping both layers pixel-aligned; any
/// change to pan or zoom must re-apply the transform to both atomically.
///
/// `Viewport` carries no world bounds: the timeline canvas is a fixed pixel
/// extent derived from settings, and panning beyond it is allowed.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pan: Vec2,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Creates a viewport with zero pan, unit zoom, and the default
    /// `[0.1, 3.0]` zoom range.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }

    /// Returns the current pan offset in container coordinates.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Sets the pan offset in container coordinates.
    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    /// Pans the view by a delta in container coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Returns the current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom factor, clamping it into the configured zoom range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`, and
    /// the current zoom is clamped into the new range.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom.max(f64::MIN_POSITIVE);
        self.max_zoom = max_zoom.max(f64::MIN_POSITIVE);
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Zooms around a given anchor point in container coordinates.
    ///
    /// The anchor keeps pointing at the same world position under the new
    /// zoom level, as far as the zoom limits allow.
    pub fn zoom_about(&mut self, anchor: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }

        let anchor_world = self.to_world(anchor);
        self.zoom = new_zoom;
        let moved = self.to_screen(anchor_world);
        self.pan += anchor - moved;
    }

    /// Returns the combined screen transform for all layers.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Converts a world-space point into container/screen coordinates.
    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            self.pan.x + self.zoom * world.x,
            self.pan.y + self.zoom * world.y,
        )
    }

    /// Converts a container/screen-space point into world coordinates.
    ///
    /// This is the exact inverse of [`Viewport::to_screen`].
    #[must_use]
    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    /// Resolves a raw pointer position into world coordinates.
    ///
    /// `client` is the pointer position in window/client space,
    /// `container_origin` the client-space origin of the scrollable container,
    /// and `scroll` its current scroll offsets. Every drag/resize computation
    /// must go through this (or [`Viewport::to_world`]) instead of raw client
    /// coordinates.
    #[must_use]
    pub fn resolve_pointer(&self, client: Point, container_origin: Point, scroll: Vec2) -> Point {
        let in_container = (client - container_origin).to_point() + scroll;
        self.to_world(in_container)
    }

    /// Pans so that the world X position `world_x` lands at the horizontal
    /// center of a view that is `view_width` pixels wide.
    ///
    /// The vertical pan is reset to zero, matching the editor's
    /// "center on year zero" action.
    pub fn center_on_x(&mut self, world_x: f64, view_width: f64) {
        self.pan = Vec2::new(view_width / 2.0 - world_x * self.zoom, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::Viewport;

    #[test]
    fn screen_world_roundtrip_for_any_pan_and_zoom() {
        let mut view = Viewport::new();
        view.set_zoom(2.5);
        view.set_pan(Vec2::new(-320.0, 47.5));

        for &(x, y) in &[(0.0, 0.0), (13.25, -880.0), (4200.0, 1600.0)] {
            let screen = Point::new(x, y);
            let back = view.to_screen(view.to_world(screen));
            assert!((back - screen).hypot() < 1e-9);
        }
    }

    #[test]
    fn transform_matches_pointwise_conversion() {
        let mut view = Viewport::new();
        view.set_zoom(0.5);
        view.set_pan(Vec2::new(120.0, -60.0));

        let world = Point::new(777.0, 333.0);
        let via_affine = view.transform() * world;
        let via_method = view.to_screen(world);
        assert!((via_affine - via_method).hypot() < 1e-9);
    }

    #[test]
    fn resolve_pointer_accounts_for_origin_and_scroll() {
        let mut view = Viewport::new();
        view.set_zoom(2.0);
        view.set_pan(Vec2::new(10.0, 20.0));

        // Pointer at client (210, 170); container starts at (200, 100) and is
        // scrolled by (40, 0). Container-space position is (50, 70).
        let world = view.resolve_pointer(
            Point::new(210.0, 170.0),
            Point::new(200.0, 100.0),
            Vec2::new(40.0, 0.0),
        );
        assert!((world.x - 20.0).abs() < 1e-9);
        assert!((world.y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut view = Viewport::new();
        view.set_zoom(100.0);
        assert_eq!(view.zoom(), 3.0);
        view.set_zoom(0.0001);
        assert_eq!(view.zoom(), 0.1);
        view.set_zoom(f64::NAN);
        assert_eq!(view.zoom(), 0.1);

        view.set_zoom_limits(0.5, 4.0);
        assert_eq!(view.zoom(), 0.5);
    }

    #[test]
    fn zoom_about_keeps_anchor_fixed() {
        let mut view = Viewport::new();
        view.set_pan(Vec2::new(35.0, -10.0));

        let anchor = Point::new(400.0, 300.0);
        let world_before = view.to_world(anchor);
        view.zoom_about(anchor, 2.0);
        let world_after = view.to_world(anchor);

        assert!((world_after - world_before).hypot() < 1e-9);
        assert_eq!(view.zoom(), 2.0);
    }

    #[test]
    fn center_on_x_centers_world_position() {
        let mut view = Viewport::new();
        view.set_zoom(2.0);
        view.center_on_x(840.0, 1200.0);

        let screen = view.to_screen(Point::new(840.0, 0.0));
        assert!((screen.x - 600.0).abs() < 1e-9);
        assert_eq!(view.pan().y, 0.0);
    }
}
