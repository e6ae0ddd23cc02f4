//! Triangle glyph for point features
//!
//! A single north-pointing arrow under the feature's position. The extents reach
//! `arrow_length` past the point on both sides so that row packing keeps neighbouring
//! markers apart even though the feature itself has no width.

use super::arrow::{arrow_path, Heading};
use super::{FeatureContext, Glyph, GlyphKind};
use crate::error::{Result, TrackplotError};
use crate::feature::{Feature, PlacedFeature};

pub const NOT_A_POINT: &str =
    "Start and stop are not the same; triangle glyphs require a point feature";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleGlyph {
    arrow_length: f64,
}

impl TriangleGlyph {
    pub fn new(arrow_length: f64) -> Self {
        Self { arrow_length }
    }

    pub fn arrow_length(&self) -> f64 {
        self.arrow_length
    }
}

impl Glyph for TriangleGlyph {
    fn left_pixel_extent(&self, feature: &PlacedFeature<'_>) -> f64 {
        feature.position().lend - self.arrow_length
    }

    fn right_pixel_extent(&self, feature: &PlacedFeature<'_>) -> f64 {
        feature.position().rend + self.arrow_length
    }

    fn check(&self, feature: &Feature) -> Result<()> {
        if feature.start != feature.stop {
            return Err(TrackplotError::shape_precondition(
                self.kind().name(),
                feature.name.as_str(),
                NOT_A_POINT,
            ));
        }
        Ok(())
    }

    fn draw(&self, feature: &PlacedFeature<'_>, ctx: &mut FeatureContext<'_>) -> Result<()> {
        self.check(feature.feature)?;

        let left = self.left_pixel_extent(feature);
        let right = self.right_pixel_extent(feature);
        let path = arrow_path(
            Heading::North,
            left + self.arrow_length,
            ctx.top,
            self.arrow_length,
            ctx.height,
        );
        ctx.surface.fill_path(&path, ctx.color);
        ctx.surface.stroke_path(&path, ctx.outline, 1.0);
        ctx.register_region(feature.feature, left, right);
        Ok(())
    }

    fn kind(&self) -> GlyphKind {
        GlyphKind::Triangle
    }
}
