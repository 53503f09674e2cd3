// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-data display-list types.
//!
//! Everything here is positioned in world coordinates; a host applies
//! [`Scene::transform`] once to all layers and then draws in order:
//! background, grid, axis, periods, artists, connectors, events. That order
//! matches the stacking the hit test assumes (events topmost).

use chronoline_interact::HandleKind;
use chronoline_model::{ItemRef, TextRef};
use kurbo::{Affine, Line, Rect, Size};
use peniko::Color;

/// A positioned text label.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// Text to draw.
    pub text: String,
    /// World-space box the text is laid out in.
    pub bounds: Rect,
    /// Font size in pixels.
    pub font_size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Which backing field a pointer-down on this label selects for editing,
    /// if any. Axis year labels are not editable and carry `None`.
    pub target: Option<TextRef>,
}

/// A major axis graduation with its year label.
#[derive(Clone, Debug, PartialEq)]
pub struct MajorTick {
    /// Calendar year of the graduation.
    pub year: i32,
    /// Full-band vertical stroke.
    pub line: Line,
    /// Year label, centered on the band.
    pub label: Label,
}

/// A minor axis graduation: two short strokes growing inward from the band
/// edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinorTick {
    /// Calendar year of the graduation.
    pub year: i32,
    /// Stroke from the band's top edge, downward.
    pub upper: Line,
    /// Stroke from the band's bottom edge, upward.
    pub lower: Line,
}

/// The horizontal axis band with its graduations.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisBand {
    /// Band rectangle, spanning the canvas width at
    /// `timeline_y ± thickness / 2`.
    pub band: Rect,
    /// Font size for the year labels, derived from the band thickness.
    pub label_size: f64,
    /// Major graduations in year order.
    pub majors: Vec<MajorTick>,
    /// Minor graduations in year order; empty unless minor subdivision is
    /// enabled in the settings.
    pub minors: Vec<MinorTick>,
}

/// A pointer-grabbable resize-handle region on an item frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleRegion {
    /// Which resize rule the handle drives.
    pub handle: HandleKind,
    /// World-space hit region.
    pub bounds: Rect,
}

/// A positioned event card.
#[derive(Clone, Debug, PartialEq)]
pub struct EventFrame {
    /// The backing item.
    pub item: ItemRef,
    /// Card rectangle, centered under the event's year.
    pub frame: Rect,
    /// Image payload (data URI) to draw in `image_bounds`.
    pub image: String,
    /// Region above the labels reserved for the image.
    pub image_bounds: Rect,
    /// Whether the card is the current item selection.
    pub selected: bool,
    /// Title label.
    pub title: Label,
    /// Year label.
    pub year: Label,
    /// Width, height, and corner resize handles.
    pub handles: Vec<HandleRegion>,
}

/// A positioned period bar.
#[derive(Clone, Debug, PartialEq)]
pub struct PeriodFrame {
    /// The backing item.
    pub item: ItemRef,
    /// Bar rectangle spanning the period's year range.
    pub frame: Rect,
    /// Fill color parsed from the period's CSS hex string.
    pub fill: Color,
    /// Whether the bar is the current item selection.
    pub selected: bool,
    /// Name label.
    pub name: Label,
    /// Dates label.
    pub dates: Label,
}

/// A positioned artist life-span bar.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtistFrame {
    /// The backing item.
    pub item: ItemRef,
    /// Bar rectangle from the birth year, at least the minimum visual width.
    pub frame: Rect,
    /// Whether the bar is the current item selection.
    pub selected: bool,
    /// Set when `birth_year > death_year`; the host draws a warning style
    /// instead of a negative-width bar.
    pub span_inverted: bool,
    /// Name label.
    pub name: Label,
    /// Dates label.
    pub dates: Label,
    /// Birth, death, height, and corner resize handles.
    pub handles: Vec<HandleRegion>,
}

/// A vertical line connecting an event card to the axis band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connector {
    /// The event the line belongs to.
    pub event: ItemRef,
    /// Card edge to band edge, at the event's year position.
    pub line: Line,
}

/// A fully positioned frame of the editor, ready to draw.
///
/// Building a scene is a pure function of the model and the viewport; the
/// same inputs always produce the same scene, and building one mutates
/// nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Canvas pixel extent.
    pub canvas: Size,
    /// Background fill parsed from the settings' CSS hex string.
    pub background: Color,
    /// View transform the host applies to every layer at once.
    pub transform: Affine,
    /// Page-boundary gridlines; empty when the grid is disabled.
    pub grid: Vec<Line>,
    /// The axis band and its graduations.
    pub axis: AxisBand,
    /// Period bars, bottom layer of the items.
    pub periods: Vec<PeriodFrame>,
    /// Artist bars, above periods.
    pub artists: Vec<ArtistFrame>,
    /// Event-to-axis connector lines, under the cards.
    pub connectors: Vec<Connector>,
    /// Event cards, topmost layer.
    pub events: Vec<EventFrame>,
}
