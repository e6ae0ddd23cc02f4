//! Directed glyphs: a body glyph plus an arrow head on the strand side

use super::arrow::{arrow_path, Heading};
use super::{FeatureContext, Glyph, GlyphKind};
use crate::error::Result;
use crate::feature::{Feature, PlacedFeature, Strand};

/// Glyphs that can be reused as the body of a directed glyph
pub trait GlyphBody: Glyph {
    /// Draw the body only, without registering an image-map region
    fn paint_body(&self, feature: &PlacedFeature<'_>, ctx: &mut FeatureContext<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedGlyph<B> {
    body: B,
    arrow_length: f64,
    kind: GlyphKind,
}

impl<B: GlyphBody> DirectedGlyph<B> {
    pub fn new(body: B, arrow_length: f64, kind: GlyphKind) -> Self {
        Self {
            body,
            arrow_length,
            kind,
        }
    }
}

impl<B: GlyphBody> Glyph for DirectedGlyph<B> {
    fn left_pixel_extent(&self, feature: &PlacedFeature<'_>) -> f64 {
        let left = self.body.left_pixel_extent(feature);
        match feature.feature.strand {
            Some(Strand::Reverse) => left - self.arrow_length,
            _ => left,
        }
    }

    fn right_pixel_extent(&self, feature: &PlacedFeature<'_>) -> f64 {
        let right = self.body.right_pixel_extent(feature);
        match feature.feature.strand {
            Some(Strand::Forward) => right + self.arrow_length,
            _ => right,
        }
    }

    fn check(&self, feature: &Feature) -> Result<()> {
        self.body.check(feature)
    }

    fn draw(&self, feature: &PlacedFeature<'_>, ctx: &mut FeatureContext<'_>) -> Result<()> {
        self.check(feature.feature)?;
        self.body.paint_body(feature, ctx);

        let head = match feature.feature.strand {
            Some(Strand::Forward) => Some((Heading::East, self.right_pixel_extent(feature))),
            Some(Strand::Reverse) => Some((Heading::West, self.left_pixel_extent(feature))),
            None => None,
        };
        if let Some((heading, tip_x)) = head {
            let path = arrow_path(heading, tip_x, ctx.middle(), self.arrow_length, ctx.height);
            ctx.surface.fill_path(&path, ctx.color);
            ctx.surface.stroke_path(&path, ctx.outline, 1.0);
        }

        ctx.register_region(
            feature.feature,
            self.left_pixel_extent(feature),
            self.right_pixel_extent(feature),
        );
        Ok(())
    }

    fn kind(&self) -> GlyphKind {
        self.kind
    }
}
