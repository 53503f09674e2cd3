// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::scale::YearScale;

/// Whether a tick marks a major graduation (scale interval) or a minor
/// subdivision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickKind {
    /// Major gridline at a `scale`-year interval; carries a year label.
    Major,
    /// Minor subdivision between major gridlines.
    Minor,
}

/// A single graduation on the calendar axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Calendar year of the graduation.
    pub year: i32,
    /// Canvas-space X position, derived through the scale.
    pub x: f64,
    /// Major or minor graduation.
    pub kind: TickKind,
}

/// Lays out axis graduations for the given scale.
///
/// Major ticks are placed every `major_step` years from the start of the axis
/// range through its end, inclusive. When `minor_divisions` is set, minor
/// ticks subdivide each major interval into roughly that many parts
/// (`minor_divisions` is clamped to at least 2, and the minor step never drops
/// below one year); minor ticks that coincide exactly with a major position
/// are suppressed. Minor subdivision is a non-default feature; pass `None` to
/// lay out majors only.
#[must_use]
pub fn tick_layout(scale: &YearScale, major_step: u32, minor_divisions: Option<u32>) -> Vec<Tick> {
    let major_step = i64::from(major_step.max(1));
    let start = i64::from(scale.start_year());
    let end = i64::from(scale.end_year());

    let mut ticks = Vec::new();

    let mut year = start;
    while year <= end {
        #[expect(clippy::cast_possible_truncation, reason = "year stays in i32 range")]
        ticks.push(Tick {
            year: year as i32,
            x: scale.year_to_x(year as f64),
            kind: TickKind::Major,
        });
        year += major_step;
    }

    if let Some(divisions) = minor_divisions {
        let divisions = i64::from(divisions.max(2));
        let minor_step = ((major_step as f64) / (divisions as f64)).round().max(1.0) as i64;

        let mut year = start;
        while year <= end {
            if (year - start) % major_step != 0 {
                #[expect(clippy::cast_possible_truncation, reason = "year stays in i32 range")]
                ticks.push(Tick {
                    year: year as i32,
                    x: scale.year_to_x(year as f64),
                    kind: TickKind::Minor,
                });
            }
            year += minor_step;
        }
    }

    ticks
}
