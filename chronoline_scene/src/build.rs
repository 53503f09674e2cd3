// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The model-to-display-list pass.

use chronoline_axis::{ScaleError, TickKind, YearScale, tick_layout};
use chronoline_interact::HandleKind;
use chronoline_model::{
    ARTIST_LINE_HEIGHT, ArtistBar, EVENT_LINE_HEIGHT, EventCard, ItemKind, ItemRef, PAGE_HEIGHT,
    PAGE_WIDTH, PeriodBar, SettingsError, TextField, TextRef, TimelineSettings, TimelineState,
    text_block_height,
};
use chronoline_view::Viewport;
use kurbo::{Line, Point, Rect, Size};
use peniko::Color;

use crate::display::{
    ArtistFrame, AxisBand, Connector, EventFrame, HandleRegion, Label, MajorTick, MinorTick,
    PeriodFrame, Scene,
};

/// Side length of a resize-handle hit region in pixels.
pub const HANDLE_SIZE: f64 = 10.0;
/// Minimum drawn width of an artist bar in pixels, regardless of its span.
pub const ARTIST_MIN_VISUAL_WIDTH: f64 = 80.0;

/// Fill used when a period's color string fails to parse.
const PERIOD_FALLBACK_COLOR: Color = Color::from_rgb8(0x42, 0x99, 0xe1);

/// Error produced when a scene cannot be derived from the model.
///
/// Both variants are configuration errors; a validated model always builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The settings fail boundary validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The year range or canvas width cannot produce a pixel scale.
    #[error(transparent)]
    Scale(#[from] ScaleError),
}

/// Derives a complete display list from the model and the viewport.
///
/// Pure and stateless: building twice from the same inputs yields equal
/// scenes, and nothing in the model is touched. Degenerate settings are
/// rejected up front so no NaN can reach the geometry.
pub fn build_scene(state: &TimelineState, viewport: &Viewport) -> Result<Scene, SceneError> {
    state.settings.validate()?;
    let scale = state.year_scale()?;
    let canvas = state.canvas_size();
    let settings = &state.settings;

    let mut periods = Vec::with_capacity(state.periods.len());
    for period in &state.periods {
        periods.push(period_frame(period, &scale, state));
    }

    let mut artists = Vec::with_capacity(state.artists.len());
    for artist in &state.artists {
        artists.push(artist_frame(artist, &scale, state));
    }

    let mut events = Vec::with_capacity(state.events.len());
    let mut connectors = Vec::new();
    for event in &state.events {
        let frame = event_frame(event, &scale, state);
        if let Some(connector) = event_connector(event, &frame, settings) {
            connectors.push(connector);
        }
        events.push(frame);
    }

    Ok(Scene {
        canvas,
        background: parse_css_color(&settings.bg_color, Color::WHITE),
        transform: viewport.transform(),
        grid: page_grid(settings),
        axis: axis_band(settings, &scale),
        periods,
        artists,
        connectors,
        events,
    })
}

/// Parses a CSS color, falling back (with a warning) on malformed input.
///
/// A bad color string in a hand-edited document should degrade the drawing,
/// not abort the frame.
fn parse_css_color(css: &str, fallback: Color) -> Color {
    match peniko::color::parse_color(css) {
        Ok(color) => color.to_alpha_color(),
        Err(error) => {
            tracing::warn!(%error, css, "unparseable color, using fallback");
            fallback
        }
    }
}

fn page_grid(settings: &TimelineSettings) -> Vec<Line> {
    if !settings.show_grid {
        return Vec::new();
    }
    let canvas = settings.canvas_size();
    let mut lines = Vec::new();
    for page in 1..settings.pages_h {
        let x = f64::from(page) * PAGE_WIDTH;
        lines.push(Line::new((x, 0.0), (x, canvas.height)));
    }
    for page in 1..settings.pages_v {
        let y = f64::from(page) * PAGE_HEIGHT;
        lines.push(Line::new((0.0, y), (canvas.width, y)));
    }
    lines
}

fn axis_band(settings: &TimelineSettings, scale: &YearScale) -> AxisBand {
    let half = settings.timeline_thickness / 2.0;
    let band = Rect::new(
        0.0,
        settings.timeline_y - half,
        scale.canvas_width(),
        settings.timeline_y + half,
    );
    let label_size = (settings.timeline_thickness * 0.45).clamp(12.0, 20.0);
    let minor_length = settings.timeline_thickness * 0.35;

    let mut majors = Vec::new();
    let mut minors = Vec::new();
    for tick in tick_layout(scale, settings.scale, settings.minor_divisions) {
        match tick.kind {
            TickKind::Major => majors.push(MajorTick {
                year: tick.year,
                line: Line::new((tick.x, band.y0), (tick.x, band.y1)),
                label: centered_label(tick.year.to_string(), tick.x, settings.timeline_y, label_size),
            }),
            TickKind::Minor => minors.push(MinorTick {
                year: tick.year,
                upper: Line::new((tick.x, band.y0), (tick.x, band.y0 + minor_length)),
                lower: Line::new((tick.x, band.y1), (tick.x, band.y1 - minor_length)),
            }),
        }
    }

    AxisBand {
        band,
        label_size,
        majors,
        minors,
    }
}

/// Builds an axis year label centered on a point, with bounds estimated from
/// the glyph count.
fn centered_label(text: String, x: f64, y: f64, font_size: f64) -> Label {
    let width = text.chars().count() as f64 * font_size * 0.6;
    let height = font_size * 1.2;
    Label {
        bounds: Rect::new(x - width / 2.0, y - height / 2.0, x + width / 2.0, y + height / 2.0),
        text,
        font_size,
        bold: true,
        target: None,
    }
}

fn event_frame(event: &EventCard, scale: &YearScale, state: &TimelineState) -> EventFrame {
    let item = ItemRef {
        kind: ItemKind::Event,
        id: event.id,
    };
    let x = scale.year_to_x(f64::from(event.year));
    let frame = Rect::new(
        x - event.width / 2.0,
        event.y,
        x + event.width / 2.0,
        event.y + event.height,
    );

    // Labels stack upward from the card's bottom edge; the image takes the
    // remaining space above them.
    let year_h = text_block_height(event.year_size(), EVENT_LINE_HEIGHT, 1.0);
    let title_h = text_block_height(event.title_size(), EVENT_LINE_HEIGHT, 2.0);
    let year_bounds = Rect::new(frame.x0, frame.y1 - year_h, frame.x1, frame.y1);
    let title_bounds = Rect::new(frame.x0, year_bounds.y0 - title_h, frame.x1, year_bounds.y0);
    let image_bounds = Rect::new(frame.x0, frame.y0, frame.x1, title_bounds.y0);

    EventFrame {
        item,
        frame,
        image: event.image.clone(),
        image_bounds,
        selected: state.selection.is_selected(item),
        title: Label {
            text: event.name.clone(),
            bounds: title_bounds,
            font_size: event.title_size(),
            bold: event.title_bold(),
            target: Some(TextRef {
                item,
                field: TextField::Title,
            }),
        },
        year: Label {
            text: event.year.to_string(),
            bounds: year_bounds,
            font_size: event.year_size(),
            bold: event.year_bold(),
            target: Some(TextRef {
                item,
                field: TextField::Year,
            }),
        },
        handles: vec![
            HandleRegion {
                handle: HandleKind::EventWidth,
                bounds: edge_handle(frame.x1, frame.center().y),
            },
            HandleRegion {
                handle: HandleKind::EventHeight,
                bounds: edge_handle(frame.center().x, frame.y1),
            },
            HandleRegion {
                handle: HandleKind::EventCorner,
                bounds: edge_handle(frame.x1, frame.y1),
            },
        ],
    }
}

/// The connector line between a card and the axis band.
///
/// Card fully above the band: bottom of the card down to the band's top.
/// Card fully below: band's bottom down to the card's top. A card that
/// overlaps the band gets no line.
fn event_connector(
    event: &EventCard,
    frame: &EventFrame,
    settings: &TimelineSettings,
) -> Option<Connector> {
    let half = settings.timeline_thickness / 2.0;
    let band_top = settings.timeline_y - half;
    let band_bottom = settings.timeline_y + half;
    let x = frame.frame.center().x;

    let card_bottom = event.y + event.height;
    let (from, to) = if card_bottom < band_top {
        (card_bottom, band_top)
    } else {
        (band_bottom, event.y)
    };
    (to - from > 0.0).then_some(Connector {
        event: frame.item,
        line: Line::new((x, from), (x, to)),
    })
}

fn period_frame(period: &PeriodBar, scale: &YearScale, state: &TimelineState) -> PeriodFrame {
    let item = ItemRef {
        kind: ItemKind::Period,
        id: period.id,
    };
    let start_x = scale.year_to_x(f64::from(period.start_year));
    let end_x = scale.year_to_x(f64::from(period.end_year));
    let frame = Rect::new(start_x, period.y, end_x, period.y + period.height);

    let (name, dates) = bar_labels(
        frame,
        period.name.clone(),
        format!("{} - {}", period.start_year, period.end_year),
        period.name_size(),
        period.name_bold(),
        period.dates_size(),
        period.dates_bold(),
        item,
    );

    PeriodFrame {
        item,
        frame,
        fill: parse_css_color(&period.color, PERIOD_FALLBACK_COLOR),
        selected: state.selection.is_selected(item),
        name,
        dates,
    }
}

fn artist_frame(artist: &ArtistBar, scale: &YearScale, state: &TimelineState) -> ArtistFrame {
    let item = ItemRef {
        kind: ItemKind::Artist,
        id: artist.id,
    };
    let birth_x = scale.year_to_x(f64::from(artist.birth_year));
    let death_x = scale.year_to_x(f64::from(artist.death_year));
    let width = (death_x - birth_x).max(ARTIST_MIN_VISUAL_WIDTH);
    let frame = Rect::new(birth_x, artist.y, birth_x + width, artist.y + artist.height);

    let (name, dates) = bar_labels(
        frame,
        artist.name.clone(),
        format!("{} - {}", artist.birth_year, artist.death_year),
        artist.name_size(),
        artist.name_bold(),
        artist.dates_size(),
        artist.dates_bold(),
        item,
    );

    ArtistFrame {
        item,
        frame,
        selected: state.selection.is_selected(item),
        span_inverted: artist.span_inverted(),
        name,
        dates,
        handles: vec![
            HandleRegion {
                handle: HandleKind::ArtistBirth,
                bounds: edge_handle(frame.x0, frame.center().y),
            },
            HandleRegion {
                handle: HandleKind::ArtistDeath,
                bounds: edge_handle(frame.x1, frame.center().y),
            },
            HandleRegion {
                handle: HandleKind::ArtistHeight,
                bounds: edge_handle(frame.center().x, frame.y1),
            },
            HandleRegion {
                handle: HandleKind::ArtistCorner,
                bounds: edge_handle(frame.x1, frame.y1),
            },
        ],
    }
}

/// Name over dates from a bar's top edge.
fn bar_labels(
    frame: Rect,
    name_text: String,
    dates_text: String,
    name_size: f64,
    name_bold: bool,
    dates_size: f64,
    dates_bold: bool,
    item: ItemRef,
) -> (Label, Label) {
    let name_h = text_block_height(name_size, ARTIST_LINE_HEIGHT, 1.0);
    let dates_h = text_block_height(dates_size, ARTIST_LINE_HEIGHT, 1.0);
    let name_bounds = Rect::new(frame.x0, frame.y0, frame.x1, frame.y0 + name_h);
    let dates_bounds = Rect::new(frame.x0, name_bounds.y1, frame.x1, name_bounds.y1 + dates_h);
    (
        Label {
            text: name_text,
            bounds: name_bounds,
            font_size: name_size,
            bold: name_bold,
            target: Some(TextRef {
                item,
                field: TextField::Name,
            }),
        },
        Label {
            text: dates_text,
            bounds: dates_bounds,
            font_size: dates_size,
            bold: dates_bold,
            target: Some(TextRef {
                item,
                field: TextField::Dates,
            }),
        },
    )
}

/// A handle hit square centered on an edge midpoint or corner.
fn edge_handle(x: f64, y: f64) -> Rect {
    Rect::from_center_size(Point::new(x, y), Size::new(HANDLE_SIZE, HANDLE_SIZE))
}

#[cfg(test)]
mod tests {
    use chronoline_model::{
        ArtistBar, EventCard, ItemId, ItemKind, ItemRef, PeriodBar, TimelineState,
    };
    use chronoline_view::Viewport;
    use peniko::Color;

    use super::{ARTIST_MIN_VISUAL_WIDTH, SceneError, build_scene};

    fn state_with_one_of_each() -> TimelineState {
        let mut state = TimelineState::new();
        state.add_event(EventCard::new(ItemId(1), "moon landing", 1969, "data:"));
        state.add_period(PeriodBar::new(ItemId(2), "baroque", 1600, 1750));
        state.add_artist(ArtistBar::new(ItemId(3), "vivaldi", 1678, 1741, 180.0));
        state
    }

    #[test]
    fn building_is_pure_and_repeatable() {
        let state = state_with_one_of_each();
        let viewport = Viewport::new();
        let before = state.clone();
        let first = build_scene(&state, &viewport).unwrap();
        let second = build_scene(&state, &viewport).unwrap();
        assert_eq!(first, second);
        assert_eq!(state, before);
    }

    #[test]
    fn degenerate_settings_fail_instead_of_producing_nan() {
        let mut state = state_with_one_of_each();
        state.settings.end_year = state.settings.start_year;
        let result = build_scene(&state, &Viewport::new());
        assert!(matches!(result, Err(SceneError::Settings(_))));
    }

    #[test]
    fn event_cards_are_centered_under_their_year() {
        let state = state_with_one_of_each();
        let scene = build_scene(&state, &Viewport::new()).unwrap();
        let scale = state.year_scale().unwrap();

        let card = &scene.events[0];
        let x = scale.year_to_x(1969.0);
        assert!((card.frame.center().x - x).abs() < 1e-9);
        assert_eq!(card.frame.width(), state.events[0].width);
        assert_eq!(card.frame.y0, state.events[0].y);
    }

    #[test]
    fn period_bars_span_their_year_range() {
        let state = state_with_one_of_each();
        let scene = build_scene(&state, &Viewport::new()).unwrap();
        let scale = state.year_scale().unwrap();

        let bar = &scene.periods[0];
        assert_eq!(bar.frame.x0, scale.year_to_x(1600.0));
        assert_eq!(bar.frame.x1, scale.year_to_x(1750.0));
    }

    #[test]
    fn inverted_artist_keeps_the_minimum_width_and_is_flagged() {
        let mut state = state_with_one_of_each();
        state.artists[0].birth_year = 1800;
        state.artists[0].death_year = 1750;
        let scene = build_scene(&state, &Viewport::new()).unwrap();

        let bar = &scene.artists[0];
        assert!(bar.span_inverted);
        assert_eq!(bar.frame.width(), ARTIST_MIN_VISUAL_WIDTH);
        assert!(bar.frame.width() > 0.0);
    }

    #[test]
    fn connector_runs_from_card_to_band_only_when_separated() {
        let mut state = state_with_one_of_each();
        // Default axis band is 280..320; a card at y=100, h=160 ends above it.
        state.events[0].y = 100.0;
        let scene = build_scene(&state, &Viewport::new()).unwrap();
        assert_eq!(scene.connectors.len(), 1);
        let line = scene.connectors[0].line;
        assert_eq!(line.p0.y, 260.0);
        assert_eq!(line.p1.y, 280.0);

        // Overlapping the band suppresses the line.
        state.events[0].y = 290.0;
        let scene = build_scene(&state, &Viewport::new()).unwrap();
        assert!(scene.connectors.is_empty());

        // Fully below: band bottom down to the card top.
        state.events[0].y = 500.0;
        let scene = build_scene(&state, &Viewport::new()).unwrap();
        let line = scene.connectors[0].line;
        assert_eq!(line.p0.y, 320.0);
        assert_eq!(line.p1.y, 500.0);
    }

    #[test]
    fn axis_band_covers_the_canvas_width() {
        let state = state_with_one_of_each();
        let scene = build_scene(&state, &Viewport::new()).unwrap();
        assert_eq!(scene.axis.band.x1, 4200.0);
        assert_eq!(scene.axis.band.y0, 280.0);
        assert_eq!(scene.axis.band.y1, 320.0);
        // thickness 40 * 0.45 = 18, inside the [12, 20] clamp.
        assert_eq!(scene.axis.label_size, 18.0);
        // Majors every 50 years over -500..2000 inclusive.
        assert_eq!(scene.axis.majors.len(), 51);
        assert!(scene.axis.minors.is_empty());
    }

    #[test]
    fn minor_ticks_appear_when_enabled() {
        let mut state = state_with_one_of_each();
        state.settings.minor_divisions = Some(10);
        let scene = build_scene(&state, &Viewport::new()).unwrap();
        assert!(!scene.axis.minors.is_empty());
        // Minor strokes are 0.35 of the band thickness.
        let tick = scene.axis.minors[0];
        assert!((tick.upper.p1.y - tick.upper.p0.y - 14.0).abs() < 1e-9);
    }

    #[test]
    fn grid_lines_sit_on_page_boundaries() {
        let state = state_with_one_of_each();
        let scene = build_scene(&state, &Viewport::new()).unwrap();
        // 3x2 pages: two interior vertical lines, one horizontal.
        assert_eq!(scene.grid.len(), 3);
        assert_eq!(scene.grid[0].p0.x, 1400.0);
        assert_eq!(scene.grid[1].p0.x, 2800.0);
        assert_eq!(scene.grid[2].p0.y, 800.0);

        let mut state = state;
        state.settings.show_grid = false;
        let scene = build_scene(&state, &Viewport::new()).unwrap();
        assert!(scene.grid.is_empty());
    }

    #[test]
    fn malformed_colors_fall_back_instead_of_failing() {
        let mut state = state_with_one_of_each();
        state.settings.bg_color = String::from("not-a-color");
        state.periods[0].color = String::from("##");
        let scene = build_scene(&state, &Viewport::new()).unwrap();
        assert_eq!(scene.background, Color::WHITE);
        assert_eq!(scene.periods[0].fill, super::PERIOD_FALLBACK_COLOR);
    }

    #[test]
    fn selection_is_reflected_on_the_frames() {
        let mut state = state_with_one_of_each();
        state.selection.select_item(ItemRef {
            kind: ItemKind::Period,
            id: ItemId(2),
        });
        let scene = build_scene(&state, &Viewport::new()).unwrap();
        assert!(scene.periods[0].selected);
        assert!(!scene.events[0].selected);
        assert!(!scene.artists[0].selected);
    }
}
