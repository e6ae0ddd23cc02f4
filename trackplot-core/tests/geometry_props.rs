use proptest::prelude::*;
use trackplot_core::{Feature, GlyphKind, Panel, PanelParams, TrackplotError};

proptest! {
    #[test]
    fn rescale_factor_matches_window(
        length in 1i64..10_000_000,
        width in 1u32..4_000,
        start_frac in 0.0f64..1.0,
    ) {
        let start = (length as f64 * start_frac) as i64;
        prop_assume!(start < length);
        let params = PanelParams::new(length).with_width(width).with_window(Some(start), None);
        let panel = Panel::with_defaults(params).unwrap();

        let expected = (length - start) as f64 / width as f64;
        prop_assert!(panel.rescale_factor() > 0.0);
        prop_assert!((panel.rescale_factor() - expected).abs() <= expected * 1e-12);
    }

    #[test]
    fn inverted_window_is_rejected(
        length in 1i64..1_000_000,
        a in -100i64..1_100_000,
        b in -100i64..1_100_000,
    ) {
        let params = PanelParams::new(length).with_window(Some(a.max(b)), Some(a.min(b)));
        let clamped_start = a.max(b).max(0);
        let clamped_stop = a.min(b).min(length);
        prop_assume!(clamped_stop <= clamped_start);
        let rejected = matches!(
            Panel::with_defaults(params),
            Err(TrackplotError::Configuration { .. })
        );
        prop_assert!(rejected, "window {}..{} of {} was accepted", a.max(b), a.min(b), length);
    }

    #[test]
    fn window_edges_map_to_zero_and_width(
        length in 2i64..1_000_000,
        width in 1u32..2_000,
        start_frac in 0.0f64..0.5,
        stop_frac in 0.5f64..1.0,
    ) {
        let start = (length as f64 * start_frac) as i64;
        let stop = ((length as f64 * stop_frac) as i64).max(start + 1);
        let params = PanelParams::new(length).with_width(width).with_window(Some(start), Some(stop));
        let panel = Panel::with_defaults(params).unwrap();

        prop_assert_eq!(panel.to_pixel(panel.display_start()), 0.0);
        prop_assert!((panel.to_pixel(panel.display_stop()) - width as f64).abs() < 1e-6);
    }

    #[test]
    fn triangle_extent_is_twice_arrow_length(position in 0i64..1_000_000, width in 50u32..2_000) {
        let mut panel = Panel::with_defaults(PanelParams::new(1_000_000).with_width(width)).unwrap();
        panel.new_track("points", GlyphKind::Triangle);
        let arrow = panel.layout().arrow_length as f64;

        let feature = Feature::point("p", position);
        let placed = feature.place(panel.window());
        let glyph = panel.tracks()[0].glyph();
        let span = glyph.right_pixel_extent(&placed) - glyph.left_pixel_extent(&placed);
        prop_assert!((span - 2.0 * arrow).abs() < 1e-9);
    }
}

#[test]
fn missing_window_covers_whole_length() {
    let panel = Panel::with_defaults(PanelParams::new(12_345)).unwrap();
    assert_eq!(panel.display_start(), 0);
    assert_eq!(panel.display_stop(), 12_345);
}
