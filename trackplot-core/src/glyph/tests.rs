//! Contract tests shared by every glyph variant

use super::*;
use crate::feature::{Feature, PixelRange, Segment, Strand};
use crate::surface::ShapePath;

/// Surface that records every call instead of rasterising
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Background(Rgba),
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Fill(ShapePath),
    Stroke(ShapePath),
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        800
    }

    fn height(&self) -> u32 {
        600
    }

    fn fill_background(&mut self, color: Rgba) {
        self.calls.push(Call::Background(color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, _color: Rgba) {
        self.calls.push(Call::Rect { x, y, w, h });
    }

    fn fill_path(&mut self, path: &ShapePath, _color: Rgba) {
        self.calls.push(Call::Fill(path.clone()));
    }

    fn stroke_path(&mut self, path: &ShapePath, _color: Rgba, _line_width: f64) {
        self.calls.push(Call::Stroke(path.clone()));
    }
}

fn point_at(feature: &Feature, px: f64) -> PlacedFeature<'_> {
    PlacedFeature::from_ranges(feature, vec![PixelRange { lend: px, rend: px }])
}

fn draw_with_map(
    glyph: &dyn Glyph,
    placed: &PlacedFeature<'_>,
    top: f64,
) -> (RecordingSurface, ImageMap, Result<()>) {
    let config = LayoutConfig::default();
    let mut surface = RecordingSurface::default();
    let mut map = ImageMap::new("test");
    let result = {
        let mut ctx = FeatureContext::new(&mut surface, top, &config, config.feature_color)
            .with_image_map(Some(&mut map));
        glyph.draw(placed, &mut ctx)
    };
    (surface, map, result)
}

#[test]
fn test_glyph_kind_roundtrip_names() {
    for kind in GlyphKind::ALL {
        assert_eq!(kind.name().parse::<GlyphKind>().unwrap(), kind);
        assert_eq!(kind.create(&LayoutConfig::default()).kind(), kind);
    }
    assert_eq!("Directed-Spliced".parse::<GlyphKind>().unwrap(), GlyphKind::DirectedSpliced);
    assert!(matches!(
        "circle".parse::<GlyphKind>(),
        Err(TrackplotError::Configuration { .. })
    ));
}

#[test]
fn test_triangle_extents_are_symmetric() {
    let glyph = TriangleGlyph::new(5.0);
    let feature = Feature::point("snp", 500);
    for px in [0.0, 17.25, 400.0, 799.5] {
        let placed = point_at(&feature, px);
        let left = glyph.left_pixel_extent(&placed);
        let right = glyph.right_pixel_extent(&placed);
        assert_eq!(left, px - 5.0);
        assert_eq!(right - left, 10.0);
    }
}

#[test]
fn test_triangle_draws_single_north_arrow() {
    let glyph = TriangleGlyph::new(5.0);
    let feature = Feature::point("snp", 500).with_link("https://example.org/snp");
    let placed = point_at(&feature, 400.0);

    let (surface, map, result) = draw_with_map(&glyph, &placed, 30.0);
    result.unwrap();

    let expected = ShapePath::new()
        .move_to(400.0, 30.0)
        .line_to(405.0, 40.0)
        .line_to(395.0, 40.0)
        .close();
    assert_eq!(
        surface.calls,
        vec![Call::Fill(expected.clone()), Call::Stroke(expected)]
    );

    assert_eq!(map.len(), 1);
    let region = &map.regions()[0];
    assert_eq!((region.left, region.right), (395.0, 405.0));
    assert_eq!((region.top, region.bottom), (30.0, 40.0));
    assert_eq!(region.href, "https://example.org/snp");
}

#[test]
fn test_triangle_rejects_non_point_without_drawing() {
    let glyph = TriangleGlyph::new(5.0);
    let feature = Feature::new("gene", 100, 200);
    let placed = PlacedFeature::from_ranges(&feature, vec![PixelRange { lend: 80.0, rend: 160.0 }]);

    let (surface, map, result) = draw_with_map(&glyph, &placed, 0.0);
    match result {
        Err(TrackplotError::ShapePrecondition { glyph, feature, message }) => {
            assert_eq!(glyph, "triangle");
            assert_eq!(feature, "gene");
            assert_eq!(message, triangle::NOT_A_POINT);
        }
        other => panic!("expected shape precondition error, got {:?}", other),
    }
    assert!(surface.calls.is_empty());
    assert!(map.is_empty());
}

#[test]
fn test_rectangle_is_at_least_one_pixel_wide() {
    let glyph = RectangleGlyph::new();
    let feature = Feature::point("site", 10);
    let placed = point_at(&feature, 42.0);
    assert_eq!(glyph.left_pixel_extent(&placed), 42.0);
    assert_eq!(glyph.right_pixel_extent(&placed), 43.0);

    let (surface, map, result) = draw_with_map(&glyph, &placed, 0.0);
    result.unwrap();
    assert_eq!(surface.calls[0], Call::Rect { x: 42.0, y: 0.0, w: 1.0, h: 10.0 });
    assert_eq!(map.regions()[0].href, "#");
}

#[test]
fn test_directed_rectangle_widens_on_strand_side() {
    let config = LayoutConfig::default();
    let glyph = GlyphKind::DirectedRectangle.create(&config);
    let ranges = vec![PixelRange { lend: 100.0, rend: 200.0 }];

    let forward = Feature::new("f", 0, 1).with_strand(Strand::Forward);
    let placed = PlacedFeature::from_ranges(&forward, ranges.clone());
    assert_eq!(glyph.left_pixel_extent(&placed), 100.0);
    assert_eq!(glyph.right_pixel_extent(&placed), 205.0);

    let reverse = Feature::new("r", 0, 1).with_strand(Strand::Reverse);
    let placed = PlacedFeature::from_ranges(&reverse, ranges.clone());
    assert_eq!(glyph.left_pixel_extent(&placed), 95.0);
    assert_eq!(glyph.right_pixel_extent(&placed), 200.0);

    let unstranded = Feature::new("u", 0, 1);
    let placed = PlacedFeature::from_ranges(&unstranded, ranges);
    assert_eq!(glyph.left_pixel_extent(&placed), 100.0);
    assert_eq!(glyph.right_pixel_extent(&placed), 200.0);
}

#[test]
fn test_directed_rectangle_draws_body_then_arrow() {
    let config = LayoutConfig::default();
    let glyph = GlyphKind::DirectedRectangle.create(&config);
    let feature = Feature::new("f", 0, 1).with_strand(Strand::Forward);
    let placed = PlacedFeature::from_ranges(&feature, vec![PixelRange { lend: 100.0, rend: 200.0 }]);

    let (surface, map, result) = draw_with_map(glyph.as_ref(), &placed, 20.0);
    result.unwrap();

    assert_eq!(surface.calls[0], Call::Rect { x: 100.0, y: 20.0, w: 100.0, h: 10.0 });
    match &surface.calls[2] {
        Call::Fill(path) => assert_eq!(path.x_bounds(), Some((200.0, 205.0))),
        other => panic!("expected arrow fill, got {:?}", other),
    }
    assert_eq!(map.regions()[0].right, 205.0);
}

#[test]
fn test_spliced_draws_boxes_and_connectors() {
    let glyph = SplicedGlyph::new();
    let feature = Feature::new("tx", 0, 0).with_segments(vec![
        Segment::new(0, 10),
        Segment::new(20, 30),
        Segment::new(40, 50),
    ]);
    let placed = PlacedFeature::from_ranges(
        &feature,
        vec![
            PixelRange { lend: 0.0, rend: 10.0 },
            PixelRange { lend: 20.0, rend: 30.0 },
            PixelRange { lend: 40.0, rend: 50.0 },
        ],
    );
    assert_eq!(glyph.left_pixel_extent(&placed), 0.0);
    assert_eq!(glyph.right_pixel_extent(&placed), 50.0);

    let (surface, _map, result) = draw_with_map(&glyph, &placed, 0.0);
    result.unwrap();

    let rects = surface.calls.iter().filter(|c| matches!(c, Call::Rect { .. })).count();
    let strokes = surface.calls.iter().filter(|c| matches!(c, Call::Stroke(_))).count();
    assert_eq!(rects, 3);
    // Two hats plus one outline per box
    assert_eq!(strokes, 5);
    assert_eq!(
        surface.calls[0],
        Call::Stroke(ShapePath::new().move_to(10.0, 5.0).line_to(15.0, 0.0).line_to(20.0, 5.0))
    );
}

#[test]
fn test_context_without_map_registers_nothing() {
    let config = LayoutConfig::default();
    let mut surface = RecordingSurface::default();
    let feature = Feature::point("p", 1);
    let placed = point_at(&feature, 10.0);
    let mut ctx = FeatureContext::new(&mut surface, 0.0, &config, Rgba::BLACK);
    TriangleGlyph::new(5.0).draw(&placed, &mut ctx).unwrap();
    assert_eq!(surface.calls.len(), 2);
}
