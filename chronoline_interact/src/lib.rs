// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chronoline Interact: the drag / resize / pan interaction state machine.
//!
//! This crate turns routed pointer events into data-model mutations. It owns
//! a single exclusive "active operation" slot — at any instant the editor is
//! doing exactly one of nothing, panning the canvas, dragging an item
//! vertically, or resizing an item through one of its handles.
//!
//! ## Protocol
//!
//! 1. The host hit-tests the pointer-down position (see `chronoline_scene`)
//!    and calls [`InteractionController::pointer_down`] with the resulting
//!    [`HitTarget`].
//! 2. Every pointer move goes to [`InteractionController::pointer_move`],
//!    which recomputes geometry from the captured anchor and the new pointer
//!    position. Positions are container-space; the controller resolves them
//!    to world coordinates through the viewport itself, so callers never pass
//!    raw client coordinates.
//! 3. Pointer up goes to [`InteractionController::pointer_up`] from
//!    *anywhere* — hosts must bind move/up listeners at the window level so a
//!    release outside the canvas still ends the operation. An up with no
//!    matching down is a no-op.
//!
//! Entering a new interaction unconditionally replaces the previous one;
//! with a single pointer device there is nothing to hand back to.
//!
//! ## Policy notes
//!
//! - Items drag vertically only: their horizontal position is derived from
//!   year fields and is changed by editing those, not by dragging.
//! - Vertical drags are clamped to the canvas extent
//!   (`0 ..= canvas_height - item_height`).

mod controller;
mod hit;

pub use controller::{Interaction, InteractionController, ResizeAnchor};
pub use hit::{HandleKind, HitTarget};
