// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// Error produced when constructing a [`YearScale`] from degenerate inputs.
///
/// Both variants are configuration errors: downstream rendering cannot work
/// with a scale that would divide by zero or produce non-finite positions, so
/// callers must reject or clamp bad settings before reaching this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScaleError {
    /// The year range is empty or inverted (`start >= end`).
    #[error("year range {start}..{end} is empty or inverted")]
    EmptyYearRange {
        /// First year of the requested range.
        start: i32,
        /// Last year of the requested range.
        end: i32,
    },
    /// The canvas width is zero, negative, or not finite.
    #[error("canvas width must be positive and finite")]
    InvalidCanvasWidth,
}

/// Linear mapping between calendar years and canvas-space X coordinates.
///
/// A `YearScale` is a pure transform parameterized by a visible year range and
/// the canvas pixel width. Horizontal item positions are always *derived*
/// through it from year fields, never stored, so they can never go stale when
/// the axis range or canvas extent changes.
///
/// The mapping is `year_to_x(y) = (y - start) / (end - start) * width`, with
/// [`YearScale::x_to_year`] as its inverse up to integer rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YearScale {
    start_year: f64,
    span_years: f64,
    canvas_width: f64,
}

impl YearScale {
    /// Creates a scale over `years` spread across `canvas_width` pixels.
    ///
    /// Returns an error when the range is empty/inverted or the width is not
    /// a positive finite number; a scale constructed here can never produce
    /// NaN or infinite coordinates for finite inputs.
    pub fn new(years: Range<i32>, canvas_width: f64) -> Result<Self, ScaleError> {
        if years.start >= years.end {
            return Err(ScaleError::EmptyYearRange {
                start: years.start,
                end: years.end,
            });
        }
        if !canvas_width.is_finite() || canvas_width <= 0.0 {
            return Err(ScaleError::InvalidCanvasWidth);
        }
        Ok(Self {
            start_year: f64::from(years.start),
            span_years: f64::from(years.end) - f64::from(years.start),
            canvas_width,
        })
    }

    /// Returns the first year of the axis range.
    #[must_use]
    pub fn start_year(&self) -> i32 {
        #[expect(clippy::cast_possible_truncation, reason = "constructed from an i32")]
        {
            self.start_year as i32
        }
    }

    /// Returns the last year of the axis range.
    #[must_use]
    pub fn end_year(&self) -> i32 {
        #[expect(clippy::cast_possible_truncation, reason = "constructed from i32 endpoints")]
        {
            (self.start_year + self.span_years) as i32
        }
    }

    /// Returns the canvas pixel width the scale spreads over.
    #[must_use]
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Converts a calendar year into a canvas-space X coordinate.
    ///
    /// Years outside the axis range extrapolate linearly; callers that need
    /// on-canvas positions clamp at a higher layer.
    #[must_use]
    pub fn year_to_x(&self, year: f64) -> f64 {
        (year - self.start_year) / self.span_years * self.canvas_width
    }

    /// Converts a canvas-space X coordinate back into a calendar year.
    ///
    /// The result is rounded to the nearest whole year, making this the
    /// inverse of [`YearScale::year_to_x`] within ±1 year.
    #[must_use]
    pub fn x_to_year(&self, x: f64) -> i32 {
        let year = x / self.canvas_width * self.span_years + self.start_year;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "saturating cast; extreme positions pin to the i32 range"
        )]
        {
            year.round() as i32
        }
    }

    /// Converts a pixel delta along the axis into a whole-year delta.
    ///
    /// Used by date-handle resizing: the delta is measured from `from_year`'s
    /// own position so the rounding behavior matches dragging that handle.
    #[must_use]
    pub fn pixel_delta_to_year_delta(&self, from_year: i32, dx: f64) -> i32 {
        self.x_to_year(self.year_to_x(f64::from(from_year)) + dx) - from_year
    }
}

#[cfg(test)]
mod tests {
    use super::{ScaleError, YearScale};

    #[test]
    fn endpoints_and_midpoint_map_exactly() {
        // Three 1400 px pages across -500..2000.
        let scale = YearScale::new(-500..2000, 4200.0).unwrap();
        assert_eq!(scale.year_to_x(-500.0), 0.0);
        assert_eq!(scale.year_to_x(2000.0), 4200.0);
        assert_eq!(scale.year_to_x(750.0), 2100.0);
    }

    #[test]
    fn x_to_year_inverts_year_to_x_within_rounding() {
        let scale = YearScale::new(-500..2000, 4200.0).unwrap();
        for year in (-500..=2000).step_by(7) {
            let x = scale.year_to_x(f64::from(year));
            let back = scale.x_to_year(x);
            assert!(
                (back - year).abs() <= 1,
                "round trip of year {year} drifted to {back}"
            );
        }
    }

    #[test]
    fn axis_is_monotonic() {
        let scale = YearScale::new(-500..2000, 4200.0).unwrap();
        let mut prev = scale.year_to_x(-500.0);
        for year in -499..=2000 {
            let x = scale.year_to_x(f64::from(year));
            assert!(x > prev, "axis not monotonic at year {year}");
            prev = x;
        }
    }

    #[test]
    fn degenerate_ranges_are_rejected() {
        assert_eq!(
            YearScale::new(100..100, 800.0),
            Err(ScaleError::EmptyYearRange {
                start: 100,
                end: 100
            })
        );
        assert_eq!(
            YearScale::new(200..100, 800.0),
            Err(ScaleError::EmptyYearRange {
                start: 200,
                end: 100
            })
        );
        assert_eq!(
            YearScale::new(0..100, 0.0),
            Err(ScaleError::InvalidCanvasWidth)
        );
        assert_eq!(
            YearScale::new(0..100, f64::NAN),
            Err(ScaleError::InvalidCanvasWidth)
        );
    }

    #[test]
    fn pixel_delta_converts_to_year_delta() {
        let scale = YearScale::new(0..1000, 2000.0).unwrap();
        // 2 px per year.
        assert_eq!(scale.pixel_delta_to_year_delta(500, 20.0), 10);
        assert_eq!(scale.pixel_delta_to_year_delta(500, -20.0), -10);
        assert_eq!(scale.pixel_delta_to_year_delta(500, 0.0), 0);
    }
}
