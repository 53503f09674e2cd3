// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chronoline View: pan/zoom viewport and pointer world-position resolution.
//!
//! This crate provides a small, headless model of the editor's view state: a
//! pan offset plus a uniform zoom factor composed into a single screen
//! transform. It focuses on:
//! - Camera / viewport state (pan + zoom with configurable zoom limits).
//! - Coordinate conversion between world and screen/container space.
//! - Resolving raw pointer positions into world coordinates, the exact
//!   inverse of the screen transform.
//!
//! It does **not** own any scene or rendering surface. Callers are expected
//! to:
//! - Apply [`Viewport::transform`] identically to every visual layer (axis
//!   canvas and item overlay) so they never desync.
//! - Feed every drag/resize computation through
//!   [`Viewport::resolve_pointer`] (or [`Viewport::to_world`]) rather than
//!   raw client coordinates; raw coordinates break as soon as zoom ≠ 1.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use chronoline_view::Viewport;
//!
//! let mut view = Viewport::new();
//! view.set_zoom(2.0);
//! view.pan_by(Vec2::new(100.0, 0.0));
//!
//! let world = Point::new(50.0, 30.0);
//! let screen = view.to_screen(world);
//! let back = view.to_world(screen);
//! assert!((back - world).hypot() < 1e-9);
//! ```

mod viewport;

pub use viewport::Viewport;
