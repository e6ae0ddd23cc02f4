//! Glyphs for trackplot
//!
//! A glyph turns one placed feature into drawing-surface calls. Every variant answers
//! the same three questions: how far left it reaches, how far right it reaches, and how
//! to draw itself into the row band it was given.

use crate::color::Rgba;
use crate::config::LayoutConfig;
use crate::error::{Result, TrackplotError};
use crate::feature::{Feature, PlacedFeature};
use crate::imagemap::{ImageMap, MapRegion};
use crate::surface::Surface;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod arrow;
pub mod directed;
pub mod rectangle;
pub mod spliced;
pub mod triangle;

#[cfg(test)]
pub mod tests;

pub use directed::DirectedGlyph;
pub use rectangle::RectangleGlyph;
pub use spliced::SplicedGlyph;
pub use triangle::TriangleGlyph;

/// Shape contract shared by all glyph variants
pub trait Glyph: fmt::Debug + Send + Sync {
    /// Leftmost pixel the glyph touches
    fn left_pixel_extent(&self, feature: &PlacedFeature<'_>) -> f64;

    /// Rightmost pixel the glyph touches
    fn right_pixel_extent(&self, feature: &PlacedFeature<'_>) -> f64;

    /// Reject features this glyph cannot represent, wherever they lie on the panel
    fn check(&self, _feature: &Feature) -> Result<()> {
        Ok(())
    }

    /// Issue the path/fill/stroke calls for `feature` into its row
    fn draw(&self, feature: &PlacedFeature<'_>, ctx: &mut FeatureContext<'_>) -> Result<()>;

    fn kind(&self) -> GlyphKind;
}

/// Glyph selector stored on a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphKind {
    Rectangle,
    DirectedRectangle,
    Triangle,
    Spliced,
    DirectedSpliced,
}

impl GlyphKind {
    pub const ALL: [GlyphKind; 5] = [
        GlyphKind::Rectangle,
        GlyphKind::DirectedRectangle,
        GlyphKind::Triangle,
        GlyphKind::Spliced,
        GlyphKind::DirectedSpliced,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GlyphKind::Rectangle => "rectangle",
            GlyphKind::DirectedRectangle => "directed_rectangle",
            GlyphKind::Triangle => "triangle",
            GlyphKind::Spliced => "spliced",
            GlyphKind::DirectedSpliced => "directed_spliced",
        }
    }

    /// Resolve the selector into a glyph instance sized by `config`
    pub fn create(self, config: &LayoutConfig) -> Box<dyn Glyph> {
        let arrow_length = config.arrow_length as f64;
        match self {
            GlyphKind::Rectangle => Box::new(RectangleGlyph::new()),
            GlyphKind::DirectedRectangle => Box::new(DirectedGlyph::new(
                RectangleGlyph::new(),
                arrow_length,
                GlyphKind::DirectedRectangle,
            )),
            GlyphKind::Triangle => Box::new(TriangleGlyph::new(arrow_length)),
            GlyphKind::Spliced => Box::new(SplicedGlyph::new()),
            GlyphKind::DirectedSpliced => Box::new(DirectedGlyph::new(
                SplicedGlyph::new(),
                arrow_length,
                GlyphKind::DirectedSpliced,
            )),
        }
    }

    /// Whether features of this kind should carry one block per exon
    pub fn uses_segments(&self) -> bool {
        matches!(self, GlyphKind::Spliced | GlyphKind::DirectedSpliced)
    }
}

impl fmt::Display for GlyphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GlyphKind {
    type Err = TrackplotError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        GlyphKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| {
                TrackplotError::configuration(format!(
                    "unknown glyph '{}'; available glyphs: {}",
                    s,
                    GlyphKind::ALL.map(|k| k.name()).join(", ")
                ))
            })
    }
}

/// The slice of the drawing surface one feature may draw into.
pub struct FeatureContext<'a> {
    pub surface: &'a mut dyn Surface,
    /// Top of the feature's row in surface pixels
    pub top: f64,
    /// Row band height available to the glyph
    pub height: f64,
    pub color: Rgba,
    pub outline: Rgba,
    image_map: Option<&'a mut ImageMap>,
}

impl<'a> FeatureContext<'a> {
    pub fn new(
        surface: &'a mut dyn Surface,
        top: f64,
        config: &LayoutConfig,
        color: Rgba,
    ) -> Self {
        Self {
            surface,
            top,
            height: config.feature_height as f64,
            color,
            outline: config.outline_color,
            image_map: None,
        }
    }

    pub fn with_image_map(mut self, image_map: Option<&'a mut ImageMap>) -> Self {
        self.image_map = image_map;
        self
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn middle(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Register a clickable box over `[left, right]` and this row; no-op without a map.
    pub fn register_region(&mut self, feature: &Feature, left: f64, right: f64) {
        let (top, bottom) = (self.top, self.bottom());
        if let Some(map) = self.image_map.as_deref_mut() {
            map.add_region(MapRegion {
                left,
                top,
                right,
                bottom,
                href: feature.link.clone().unwrap_or_else(|| "#".to_string()),
                title: feature.display_title().to_string(),
            });
        }
    }
}

impl fmt::Debug for FeatureContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureContext")
            .field("top", &self.top)
            .field("height", &self.height)
            .field("color", &self.color)
            .field("clickable", &self.image_map.is_some())
            .finish()
    }
}
