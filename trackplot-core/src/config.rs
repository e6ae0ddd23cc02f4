//! Layout constants shared by the panel, its tracks and their glyphs
//!
//! A `LayoutConfig` is an immutable value handed to `Panel::new` and `Track::new`;
//! two panels with different visual densities can be built side by side.

use crate::color::Rgba;
use crate::error::{Result, TrackplotError};
use crate::ruler::RULER_FIXED_HEIGHT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Panel width used when none is requested
    #[serde(default = "default_width")]
    pub default_width: u32,

    /// Height of the band above each track's rows
    #[serde(default = "default_track_header_height")]
    pub track_header_height: u32,

    /// Height of a single glyph
    #[serde(default = "default_feature_height")]
    pub feature_height: u32,

    /// Gap between feature rows
    #[serde(default = "default_feature_vertical_distance")]
    pub feature_vertical_distance: u32,

    /// Extra padding added to every row on top of height and gap
    #[serde(default = "default_row_padding")]
    pub row_padding: u32,

    /// Horizontal reach of arrow heads in pixels
    #[serde(default = "default_arrow_length")]
    pub arrow_length: u32,

    /// Band reserved above the ruler ticks for labels
    #[serde(default = "default_ruler_text_height")]
    pub ruler_text_height: u32,

    /// Minimum distance between major ruler ticks
    #[serde(default = "default_min_tick_pixel_spacing")]
    pub min_tick_pixel_spacing: u32,

    /// Font descriptor, e.g. "sans-serif 10"
    #[serde(default = "default_font")]
    pub font: String,

    /// Height of the scratch surface used before cropping
    #[serde(default = "default_huge_height")]
    pub huge_height: u32,

    #[serde(default = "default_background")]
    pub background: Rgba,

    #[serde(default = "default_feature_color")]
    pub feature_color: Rgba,

    #[serde(default = "default_outline_color")]
    pub outline_color: Rgba,

    #[serde(default = "default_ruler_color")]
    pub ruler_color: Rgba,

    #[serde(default = "default_header_color")]
    pub header_color: Rgba,
}

// Default value functions
fn default_width() -> u32 { 800 }
fn default_track_header_height() -> u32 { 10 }
fn default_feature_height() -> u32 { 10 }
fn default_feature_vertical_distance() -> u32 { 5 }
fn default_row_padding() -> u32 { 5 }
fn default_arrow_length() -> u32 { 5 }
fn default_ruler_text_height() -> u32 { 10 }
fn default_min_tick_pixel_spacing() -> u32 { 50 }
fn default_font() -> String { "sans-serif 10".to_string() }
fn default_huge_height() -> u32 { 10_000 }
fn default_background() -> Rgba { Rgba::WHITE }
fn default_feature_color() -> Rgba { Rgba::rgb(0x2a, 0x6f, 0xef) }
fn default_outline_color() -> Rgba { Rgba::BLACK }
fn default_ruler_color() -> Rgba { Rgba::BLACK }
fn default_header_color() -> Rgba { Rgba::rgb(0xbb, 0xbb, 0xbb) }

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_width: default_width(),
            track_header_height: default_track_header_height(),
            feature_height: default_feature_height(),
            feature_vertical_distance: default_feature_vertical_distance(),
            row_padding: default_row_padding(),
            arrow_length: default_arrow_length(),
            ruler_text_height: default_ruler_text_height(),
            min_tick_pixel_spacing: default_min_tick_pixel_spacing(),
            font: default_font(),
            huge_height: default_huge_height(),
            background: default_background(),
            feature_color: default_feature_color(),
            outline_color: default_outline_color(),
            ruler_color: default_ruler_color(),
            header_color: default_header_color(),
        }
    }
}

impl LayoutConfig {
    /// Vertical distance between the tops of two consecutive feature rows
    pub fn row_pitch(&self) -> u32 {
        self.feature_height
            .saturating_add(self.feature_vertical_distance)
            .saturating_add(self.row_padding)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_width == 0 {
            return Err(TrackplotError::configuration("default_width must be positive"));
        }
        if self.feature_height == 0 {
            return Err(TrackplotError::configuration("feature_height must be positive"));
        }
        if self.huge_height == 0 {
            return Err(TrackplotError::configuration("huge_height must be positive"));
        }
        if self.min_tick_pixel_spacing == 0 {
            return Err(TrackplotError::configuration(
                "min_tick_pixel_spacing must be positive",
            ));
        }

        // One ruler, one track header and one row must fit on the scratch surface
        let single_row = self
            .feature_height
            .checked_add(self.feature_vertical_distance)
            .and_then(|h| h.checked_add(self.row_padding))
            .and_then(|h| h.checked_add(self.track_header_height))
            .and_then(|h| h.checked_add(self.ruler_text_height))
            .and_then(|h| h.checked_add(RULER_FIXED_HEIGHT));
        match single_row {
            Some(height) if height <= self.huge_height => Ok(()),
            Some(height) => Err(TrackplotError::configuration(format!(
                "a single feature row needs {} px, more than huge_height ({})",
                height, self.huge_height
            ))),
            None => Err(TrackplotError::configuration(
                "feature_height, feature_vertical_distance, row_padding, track_header_height \
                 and ruler_text_height overflow when added",
            )),
        }
    }
}
