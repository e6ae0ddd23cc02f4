use super::directed::GlyphBody;
use super::{FeatureContext, Glyph, GlyphKind};
use crate::error::Result;
use crate::feature::PlacedFeature;
use crate::surface::ShapePath;

/// Plain filled box spanning the feature, at least one pixel wide.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectangleGlyph;

impl RectangleGlyph {
    pub fn new() -> Self {
        Self
    }
}

impl GlyphBody for RectangleGlyph {
    fn paint_body(&self, feature: &PlacedFeature<'_>, ctx: &mut FeatureContext<'_>) {
        let left = self.left_pixel_extent(feature);
        let width = self.right_pixel_extent(feature) - left;
        ctx.surface.fill_rect(left, ctx.top, width, ctx.height, ctx.color);
        ctx.surface
            .stroke_path(&ShapePath::rect(left, ctx.top, width, ctx.height), ctx.outline, 1.0);
    }
}

impl Glyph for RectangleGlyph {
    fn left_pixel_extent(&self, feature: &PlacedFeature<'_>) -> f64 {
        feature.lend()
    }

    fn right_pixel_extent(&self, feature: &PlacedFeature<'_>) -> f64 {
        feature.rend().max(feature.lend() + 1.0)
    }

    fn draw(&self, feature: &PlacedFeature<'_>, ctx: &mut FeatureContext<'_>) -> Result<()> {
        self.paint_body(feature, ctx);
        ctx.register_region(
            feature.feature,
            self.left_pixel_extent(feature),
            self.right_pixel_extent(feature),
        );
        Ok(())
    }

    fn kind(&self) -> GlyphKind {
        GlyphKind::Rectangle
    }
}
