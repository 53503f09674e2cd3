// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chronoline Axis: calendar-axis scale and tick primitives.
//!
//! This crate provides the linear mapping between calendar years and
//! canvas-space X coordinates that underlies every Chronoline view, plus the
//! graduated tick layout drawn along the axis band. It focuses on:
//! - Converting years to canvas X positions and back ([`YearScale`]).
//! - Laying out major gridlines at a fixed year interval, with optional minor
//!   subdivisions ([`tick_layout`]).
//!
//! It does **not** own any rendering surface. Callers are expected to:
//! - Validate settings before constructing a scale; a degenerate year range
//!   or non-positive canvas width is a configuration error, not something the
//!   scale recovers from silently.
//! - Compose the resulting positions with a pan/zoom viewport at a higher
//!   layer (see `chronoline_view`).
//!
//! ## Minimal example
//!
//! ```rust
//! use chronoline_axis::YearScale;
//!
//! // A -500..2000 axis across a 4200 px canvas.
//! let scale = YearScale::new(-500..2000, 4200.0).unwrap();
//!
//! assert_eq!(scale.year_to_x(-500.0), 0.0);
//! assert_eq!(scale.year_to_x(2000.0), 4200.0);
//! assert_eq!(scale.x_to_year(2100.0), 750);
//! ```

mod scale;
mod ticks;

pub use scale::{ScaleError, YearScale};
pub use ticks::{Tick, TickKind, tick_layout};
