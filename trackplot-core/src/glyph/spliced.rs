//! Spliced glyph: one box per block, consecutive blocks joined by a "hat" connector

use super::directed::GlyphBody;
use super::{FeatureContext, Glyph, GlyphKind};
use crate::error::Result;
use crate::feature::PlacedFeature;
use crate::surface::ShapePath;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SplicedGlyph;

impl SplicedGlyph {
    pub fn new() -> Self {
        Self
    }
}

impl GlyphBody for SplicedGlyph {
    fn paint_body(&self, feature: &PlacedFeature<'_>, ctx: &mut FeatureContext<'_>) {
        for pair in feature.ranges.windows(2) {
            let (from, to) = (pair[0].rend, pair[1].lend);
            if to <= from {
                continue;
            }
            let hat = ShapePath::new()
                .move_to(from, ctx.middle())
                .line_to((from + to) / 2.0, ctx.top)
                .line_to(to, ctx.middle());
            ctx.surface.stroke_path(&hat, ctx.outline, 1.0);
        }

        for range in &feature.ranges {
            let width = range.width().max(1.0);
            ctx.surface.fill_rect(range.lend, ctx.top, width, ctx.height, ctx.color);
            ctx.surface.stroke_path(
                &ShapePath::rect(range.lend, ctx.top, width, ctx.height),
                ctx.outline,
                1.0,
            );
        }
    }
}

impl Glyph for SplicedGlyph {
    fn left_pixel_extent(&self, feature: &PlacedFeature<'_>) -> f64 {
        feature.lend()
    }

    fn right_pixel_extent(&self, feature: &PlacedFeature<'_>) -> f64 {
        let last = feature.ranges.last().map(|r| r.lend + r.width().max(1.0));
        last.unwrap_or_else(|| feature.rend()).max(feature.lend() + 1.0)
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
        GlyphKind::Spliced
    }
}
