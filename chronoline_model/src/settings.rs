// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeline settings: axis range, canvas extent, and axis band placement.

use core::ops::Range;

use chronoline_axis::{ScaleError, YearScale};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Horizontal extent of one canvas page in pixels.
pub const PAGE_WIDTH: f64 = 1400.0;
/// Vertical extent of one canvas page in pixels.
pub const PAGE_HEIGHT: f64 = 800.0;

/// Error produced when settings fail boundary validation.
///
/// These are configuration errors: they must be rejected (or clamped) at the
/// settings-input boundary before they can reach the year↔pixel scale or the
/// scene builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `start_year` is not strictly before `end_year`.
    #[error("start year {start} must be before end year {end}")]
    InvalidYearRange {
        /// Configured start year.
        start: i32,
        /// Configured end year.
        end: i32,
    },
    /// The major gridline spacing is zero.
    #[error("gridline scale must be at least one year")]
    InvalidScale,
    /// Fewer than two minor subdivisions were requested.
    #[error("minor divisions must be at least 2")]
    InvalidMinorDivisions,
    /// The axis band placement or thickness is unusable.
    #[error("axis band placement must be finite with positive thickness")]
    InvalidAxisBand,
    /// The zoom factor is zero, negative, or not finite.
    #[error("zoom must be positive and finite")]
    InvalidZoom,
    /// The page counts would produce an empty canvas.
    #[error("page counts must be at least 1x1")]
    InvalidPageCount,
}

/// Global editor settings.
///
/// Created with defaults at startup, mutated by the host's settings panel,
/// and persisted as a whole object inside the document. Any mutation must be
/// followed by [`TimelineSettings::validate`] before the new values are
/// allowed to reach the mapper or the scene builder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineSettings {
    /// First year of the visible axis range.
    pub start_year: i32,
    /// Last year of the visible axis range; strictly after `start_year`.
    pub end_year: i32,
    /// Major gridline spacing in years.
    pub scale: u32,
    /// Optional minor subdivisions per major interval (≥ 2). Minor gridlines
    /// are an opt-in feature; `None` draws majors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_divisions: Option<u32>,
    /// Vertical pixel position of the axis centerline.
    pub timeline_y: f64,
    /// Thickness of the axis band in pixels.
    pub timeline_thickness: f64,
    /// Uniform view zoom factor.
    pub zoom: f64,
    /// Horizontal canvas extent in pages of [`PAGE_WIDTH`] pixels.
    pub pages_h: u32,
    /// Vertical canvas extent in pages of [`PAGE_HEIGHT`] pixels.
    pub pages_v: u32,
    /// Background color as a CSS hex string.
    pub bg_color: String,
    /// Whether the page grid is drawn behind the canvas.
    pub show_grid: bool,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            start_year: -500,
            end_year: 2000,
            scale: 50,
            minor_divisions: None,
            timeline_y: 300.0,
            timeline_thickness: 40.0,
            zoom: 1.0,
            pages_h: 3,
            pages_v: 2,
            bg_color: String::from("#ffffff"),
            show_grid: true,
        }
    }
}

impl TimelineSettings {
    /// Returns the configured axis year range.
    #[must_use]
    pub fn year_range(&self) -> Range<i32> {
        self.start_year..self.end_year
    }

    /// Returns the canvas pixel extent derived from the page counts.
    #[must_use]
    pub fn canvas_size(&self) -> Size {
        Size::new(
            f64::from(self.pages_h) * PAGE_WIDTH,
            f64::from(self.pages_v) * PAGE_HEIGHT,
        )
    }

    /// Builds the year↔pixel scale for the current range and canvas width.
    ///
    /// Fails only when the settings are degenerate; validated settings always
    /// produce a scale.
    pub fn year_scale(&self) -> Result<YearScale, ScaleError> {
        YearScale::new(self.year_range(), self.canvas_size().width)
    }

    /// Checks every invariant the rest of the system relies on.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.start_year >= self.end_year {
            return Err(SettingsError::InvalidYearRange {
                start: self.start_year,
                end: self.end_year,
            });
        }
        if self.scale == 0 {
            return Err(SettingsError::InvalidScale);
        }
        if let Some(divisions) = self.minor_divisions
            && divisions < 2
        {
            return Err(SettingsError::InvalidMinorDivisions);
        }
        if !self.timeline_y.is_finite()
            || !self.timeline_thickness.is_finite()
            || self.timeline_thickness <= 0.0
        {
            return Err(SettingsError::InvalidAxisBand);
        }
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(SettingsError::InvalidZoom);
        }
        if self.pages_h == 0 || self.pages_v == 0 {
            return Err(SettingsError::InvalidPageCount);
        }
        Ok(())
    }

    /// Returns a copy with `patch` merged field-by-field on top.
    ///
    /// Fields absent from the patch keep their current value, which is what
    /// lets old documents survive schema growth: a file written before a
    /// setting existed simply leaves it at its default.
    #[must_use]
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        let mut merged = self.clone();
        if let Some(v) = patch.start_year {
            merged.start_year = v;
        }
        if let Some(v) = patch.end_year {
            merged.end_year = v;
        }
        if let Some(v) = patch.scale {
            merged.scale = v;
        }
        if let Some(v) = patch.minor_divisions {
            merged.minor_divisions = Some(v);
        }
        if let Some(v) = patch.timeline_y {
            merged.timeline_y = v;
        }
        if let Some(v) = patch.timeline_thickness {
            merged.timeline_thickness = v;
        }
        if let Some(v) = patch.zoom {
            merged.zoom = v;
        }
        if let Some(v) = patch.pages_h {
            merged.pages_h = v;
        }
        if let Some(v) = patch.pages_v {
            merged.pages_v = v;
        }
        if let Some(v) = &patch.bg_color {
            merged.bg_color = v.clone();
        }
        if let Some(v) = patch.show_grid {
            merged.show_grid = v;
        }
        merged
    }

    /// Returns a patch carrying every field, for full-settings export.
    #[must_use]
    pub fn full_patch(&self) -> SettingsPatch {
        SettingsPatch {
            start_year: Some(self.start_year),
            end_year: Some(self.end_year),
            scale: Some(self.scale),
            minor_divisions: self.minor_divisions,
            timeline_y: Some(self.timeline_y),
            timeline_thickness: Some(self.timeline_thickness),
            zoom: Some(self.zoom),
            pages_h: Some(self.pages_h),
            pages_v: Some(self.pages_v),
            bg_color: Some(self.bg_color.clone()),
            show_grid: Some(self.show_grid),
        }
    }
}

/// Partial settings as they appear in a persisted document.
///
/// Every field is optional so loading merges onto existing defaults instead
/// of wholesale-replacing them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    /// See [`TimelineSettings::start_year`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    /// See [`TimelineSettings::end_year`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    /// See [`TimelineSettings::scale`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    /// See [`TimelineSettings::minor_divisions`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_divisions: Option<u32>,
    /// See [`TimelineSettings::timeline_y`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline_y: Option<f64>,
    /// See [`TimelineSettings::timeline_thickness`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline_thickness: Option<f64>,
    /// See [`TimelineSettings::zoom`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    /// See [`TimelineSettings::pages_h`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_h: Option<u32>,
    /// See [`TimelineSettings::pages_v`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_v: Option<u32>,
    /// See [`TimelineSettings::bg_color`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    /// See [`TimelineSettings::show_grid`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
}
