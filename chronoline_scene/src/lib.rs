// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chronoline Scene: renderer-geometry derivation.
//!
//! [`build_scene`] is a pure pass from the data model plus the viewport to a
//! positioned display list: axis band and graduations, item frames, text
//! labels, resize-handle hit regions, and event-to-axis connector lines. A
//! host draws the list with whatever backend it has and routes pointer-downs
//! back through [`Scene::hit_test`] into the interaction layer's
//! [`HitTarget`](chronoline_interact::HitTarget) without owning any editor
//! logic itself.
//!
//! All geometry is in world coordinates; [`Scene::transform`] carries the
//! single affine the host applies to every layer so the axis and the item
//! overlay can never drift apart.

mod build;
mod display;
mod hit;

pub use build::{ARTIST_MIN_VISUAL_WIDTH, HANDLE_SIZE, SceneError, build_scene};
pub use display::{
    ArtistFrame, AxisBand, Connector, EventFrame, HandleRegion, Label, MajorTick, MinorTick,
    PeriodFrame, Scene,
};
