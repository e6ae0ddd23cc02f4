//! Panel: the top-level figure holding a ruler and stacked tracks
//!
//! Rendering is two-pass. Everything is first drawn onto a scratch surface of
//! `huge_height` rows, because the final height depends on how many rows each
//! track packs into. The used top-left region is then copied into an exactly
//! sized surface which is what gets encoded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::coords::{format_bp, DisplayWindow, Position};
use crate::error::{Result, TrackplotError};
use crate::glyph::GlyphKind;
use crate::imagemap::ImageMap;
use crate::ruler::Ruler;
use crate::surface::{PixmapSurface, Surface};
use crate::track::Track;

/// Name of the `<map>` element in companion HTML
pub const IMAGE_MAP_NAME: &str = "trackplot";

/// Construction parameters for a [`Panel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelParams {
    /// Total logical extent in base pairs
    pub length: Position,

    /// Pixel width; `LayoutConfig::default_width` when absent
    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub clickable: bool,

    #[serde(default)]
    pub display_start: Option<Position>,

    #[serde(default)]
    pub display_stop: Option<Position>,
}

impl PanelParams {
    pub fn new(length: Position) -> Self {
        Self {
            length,
            width: None,
            clickable: false,
            display_start: None,
            display_stop: None,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_window(mut self, start: Option<Position>, stop: Option<Position>) -> Self {
        self.display_start = start;
        self.display_stop = stop;
        self
    }

    pub fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }
}

/// Accumulators produced by one composition pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Composition {
    pub ruler_height: u32,
    pub feature_rows: usize,
    pub track_count: usize,
    /// Tight height of everything drawn
    pub height: u32,
}

/// A cropped raster plus the image map built while drawing it
#[derive(Debug)]
pub struct RenderedImage {
    surface: PixmapSurface,
    composition: Composition,
    image_map: Option<ImageMap>,
}

impl RenderedImage {
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &PixmapSurface {
        &self.surface
    }

    pub fn composition(&self) -> Composition {
        self.composition
    }

    pub fn image_map(&self) -> Option<&ImageMap> {
        self.image_map.as_ref()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.surface.encode_png()
    }
}

/// What `Panel::draw` wrote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    pub width: u32,
    pub height: u32,
    pub feature_rows: usize,
    pub track_count: usize,
    pub regions: usize,
    pub image: PathBuf,
    pub html: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Panel {
    length: Position,
    clickable: bool,
    window: DisplayWindow,
    layout: LayoutConfig,
    ruler: Ruler,
    tracks: Vec<Track>,
}

impl Panel {
    pub fn new(params: PanelParams, layout: LayoutConfig) -> Result<Self> {
        layout.validate()?;
        let width = params.width.unwrap_or(layout.default_width);
        let window = DisplayWindow::new(
            params.length,
            width,
            params.display_start,
            params.display_stop,
        )?;
        log::debug!(
            "Panel: {} bp, window {}..{} at {} px ({:.3} bp/px)",
            params.length,
            window.start(),
            window.stop(),
            width,
            window.rescale_factor()
        );
        Ok(Self {
            length: params.length,
            clickable: params.clickable,
            window,
            ruler: Ruler::new(&layout),
            layout,
            tracks: Vec::new(),
        })
    }

    pub fn with_defaults(params: PanelParams) -> Result<Self> {
        Self::new(params, LayoutConfig::default())
    }

    pub fn length(&self) -> Position {
        self.length
    }

    pub fn width(&self) -> u32 {
        self.window.width()
    }

    pub fn display_start(&self) -> Position {
        self.window.start()
    }

    pub fn display_stop(&self) -> Position {
        self.window.stop()
    }

    pub fn rescale_factor(&self) -> f64 {
        self.window.rescale_factor()
    }

    pub fn clickable(&self) -> bool {
        self.clickable
    }

    pub fn window(&self) -> &DisplayWindow {
        &self.window
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn ruler(&self) -> &Ruler {
        &self.ruler
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn to_pixel(&self, x: Position) -> f64 {
        self.window.to_pixel(x)
    }

    /// Append a track below the existing ones.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Append an empty track sharing this panel's layout and return it for filling.
    pub fn new_track<S: Into<String>>(&mut self, name: S, kind: GlyphKind) -> &mut Track {
        let index = self.tracks.len();
        self.tracks.push(Track::new(name, kind, &self.layout));
        &mut self.tracks[index]
    }

    /// Draw the ruler and every track onto `surface`, top to bottom.
    pub fn compose(
        &mut self,
        surface: &mut dyn Surface,
        mut image_map: Option<&mut ImageMap>,
    ) -> Result<Composition> {
        let row_pitch = self.layout.row_pitch();
        let header = self.layout.track_header_height;

        self.ruler.draw(surface, 0, &self.window);
        let ruler_height = self.ruler.height();
        let mut offset = ruler_height;
        let mut feature_rows = 0;

        for track in &mut self.tracks {
            track.set_vertical_offset(offset);
            let rows = track.draw(surface, &self.window, image_map.as_deref_mut())?;
            feature_rows += rows;
            offset = offset.saturating_add(band_height(rows, row_pitch, header));
        }

        let track_count = self.tracks.len();
        let height = ruler_height
            .saturating_add(band_height(feature_rows, row_pitch, 0))
            .saturating_add(band_height(track_count, header, 0));
        Ok(Composition {
            ruler_height,
            feature_rows,
            track_count,
            height,
        })
    }

    /// Draw onto an oversized scratch surface, then crop to the used height.
    pub fn render(&mut self) -> Result<RenderedImage> {
        let width = self.window.width();
        let huge_height = self.layout.huge_height;

        let mut scratch = PixmapSurface::new(width, huge_height)?;
        scratch.fill_background(self.layout.background);

        let mut image_map = self.clickable.then(|| ImageMap::new(IMAGE_MAP_NAME));
        let composition = self.compose(&mut scratch, image_map.as_mut())?;

        if composition.height > huge_height {
            return Err(TrackplotError::resource(format!(
                "layout needs {} px but the scratch surface is only {} px high; raise huge_height",
                composition.height, huge_height
            )));
        }

        let surface = scratch.copy_region(width, composition.height)?;
        if let Some(map) = image_map.as_mut() {
            map.set_caption(format!(
                "{} to {}",
                format_bp(self.window.start() as f64),
                format_bp(self.window.stop() as f64)
            ));
        }

        log::debug!(
            "Panel: {} tracks, {} feature rows, cropped to {}x{}",
            composition.track_count,
            composition.feature_rows,
            width,
            composition.height
        );
        Ok(RenderedImage {
            surface,
            composition,
            image_map,
        })
    }

    /// Render and write a PNG to `output`, plus a companion HTML page when clickable.
    pub fn draw<P: AsRef<Path>>(&mut self, output: P) -> Result<RenderSummary> {
        let output = output.as_ref();
        let rendered = self.render()?;
        let (width, height) = (rendered.width(), rendered.height());

        rendered.surface.save_png(output)?;
        log::info!("Wrote {} ({}x{})", output.display(), width, height);

        let (html, regions) = match &rendered.image_map {
            Some(map) => (Some(map.write_companion(output, width, height)?), map.len()),
            None => (None, 0),
        };

        Ok(RenderSummary {
            width,
            height,
            feature_rows: rendered.composition.feature_rows,
            track_count: rendered.composition.track_count,
            regions,
            image: output.to_path_buf(),
            html,
        })
    }
}

/// `rows * pitch + extra`, saturating so oversized layouts surface as a height error
fn band_height(rows: usize, pitch: u32, extra: u32) -> u32 {
    let rows = u32::try_from(rows).unwrap_or(u32::MAX);
    rows.saturating_mul(pitch).saturating_add(extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::feature::Feature;
    use tempfile::TempDir;

    fn snp_panel(clickable: bool) -> Panel {
        let params = PanelParams::new(1000).with_width(800).with_clickable(clickable);
        let mut panel = Panel::with_defaults(params).unwrap();
        panel
            .new_track("snps", GlyphKind::Triangle)
            .add_feature(Feature::point("rs1", 500));
        panel
    }

    #[test]
    fn test_window_defaults_and_clamping() {
        let panel = Panel::with_defaults(PanelParams::new(1000)).unwrap();
        assert_eq!(panel.width(), 800);
        assert_eq!(panel.display_start(), 0);
        assert_eq!(panel.display_stop(), 1000);
        assert_eq!(panel.rescale_factor(), 1.25);

        let params = PanelParams::new(1000).with_window(Some(-5), Some(1100));
        let panel = Panel::with_defaults(params).unwrap();
        assert_eq!((panel.display_start(), panel.display_stop()), (0, 1000));
    }

    #[test]
    fn test_invalid_window_is_configuration_error() {
        let params = PanelParams::new(1000).with_window(Some(600), Some(400));
        assert!(matches!(
            Panel::with_defaults(params),
            Err(TrackplotError::Configuration { .. })
        ));
        assert!(matches!(
            Panel::with_defaults(PanelParams::new(0)),
            Err(TrackplotError::Configuration { .. })
        ));
        assert!(matches!(
            Panel::with_defaults(PanelParams::new(10).with_width(0)),
            Err(TrackplotError::Configuration { .. })
        ));
    }

    #[test]
    fn test_window_edges_map_to_surface_edges() {
        let params = PanelParams::new(5000).with_width(640).with_window(Some(1200), Some(3400));
        let panel = Panel::with_defaults(params).unwrap();
        assert_eq!(panel.to_pixel(1200), 0.0);
        assert!((panel.to_pixel(3400) - 640.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_triangle_height_and_region() {
        let mut panel = snp_panel(true);
        let rendered = panel.render().unwrap();
        let ruler = panel.ruler().height();

        assert_eq!(rendered.height(), ruler + 20 + 10);
        assert_eq!(rendered.width(), 800);
        assert_eq!(rendered.composition().feature_rows, 1);

        let map = rendered.image_map().unwrap();
        assert_eq!(map.len(), 1);
        let region = &map.regions()[0];
        assert_eq!((region.left, region.right), (395.0, 405.0));
        assert_eq!((region.top, region.bottom), (35.0, 45.0));
    }

    #[test]
    fn test_two_empty_tracks_height() {
        let mut panel = Panel::with_defaults(PanelParams::new(1000)).unwrap();
        panel.new_track("a", GlyphKind::Rectangle);
        panel.new_track("b", GlyphKind::Spliced);

        let rendered = panel.render().unwrap();
        assert_eq!(rendered.height(), panel.ruler().height() + 2 * 10);
        assert!(rendered.image_map().is_none());
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut panel = snp_panel(true);
        let first = panel.render().unwrap();
        let second = panel.render().unwrap();
        assert_eq!(first.composition(), second.composition());
        assert_eq!(first.image_map().map(|m| m.len()), second.image_map().map(|m| m.len()));
        assert_eq!(first.encode_png().unwrap(), second.encode_png().unwrap());
    }

    #[test]
    fn test_track_offsets_accumulate() {
        let mut panel = Panel::with_defaults(PanelParams::new(1000)).unwrap();
        let genes = panel.new_track("genes", GlyphKind::Rectangle);
        genes.add_feature(Feature::new("g1", 100, 600));
        genes.add_feature(Feature::new("g2", 500, 900));
        panel.new_track("snps", GlyphKind::Triangle);

        panel.render().unwrap();
        let ruler = panel.ruler().height();
        assert_eq!(panel.tracks()[0].vertical_offset(), ruler);
        assert_eq!(panel.tracks()[0].row_count(), 2);
        assert_eq!(panel.tracks()[1].vertical_offset(), ruler + 2 * 20 + 10);
    }

    #[test]
    fn test_shape_error_aborts_render() {
        let mut panel = Panel::with_defaults(PanelParams::new(1000)).unwrap();
        panel
            .new_track("snps", GlyphKind::Triangle)
            .add_feature(Feature::new("wide", 100, 200));
        assert!(matches!(
            panel.render(),
            Err(TrackplotError::ShapePrecondition { .. })
        ));
    }

    #[test]
    fn test_shape_error_outside_window_aborts_render() {
        let params = PanelParams::new(10_000).with_window(Some(0), Some(1000));
        let mut panel = Panel::with_defaults(params).unwrap();
        panel
            .new_track("snps", GlyphKind::Triangle)
            .add_feature(Feature::new("wide", 5000, 6000));
        assert!(matches!(
            panel.render(),
            Err(TrackplotError::ShapePrecondition { .. })
        ));
    }

    #[test]
    fn test_oversized_feature_height_is_configuration_error() {
        let layout = LayoutConfig {
            feature_height: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            Panel::new(PanelParams::new(1000), layout),
            Err(TrackplotError::Configuration { .. })
        ));
    }

    #[test]
    fn test_layout_taller_than_scratch_is_resource_error() {
        let layout = LayoutConfig {
            huge_height: 60,
            ..Default::default()
        };
        let mut panel = Panel::new(PanelParams::new(1000), layout).unwrap();
        let track = panel.new_track("dense", GlyphKind::Rectangle);
        for i in 0..4 {
            track.add_feature(Feature::new(format!("f{}", i), 100, 900));
        }
        assert!(matches!(panel.render(), Err(TrackplotError::Resource { .. })));
    }

    #[test]
    fn test_background_fills_cropped_image() {
        let layout = LayoutConfig {
            background: Rgba::rgb(0xf0, 0xf0, 0xf0),
            ..Default::default()
        };
        let mut panel = Panel::new(PanelParams::new(1000), layout).unwrap();
        panel.new_track("empty", GlyphKind::Rectangle);
        let rendered = panel.render().unwrap();
        let bottom = rendered.height() - 1;
        assert_eq!(rendered.surface().pixel(400, bottom), Some(Rgba::rgb(0xf0, 0xf0, 0xf0)));
    }

    #[test]
    fn test_draw_writes_png_and_html() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("figure.png");
        let mut panel = snp_panel(true);

        let summary = panel.draw(&output).unwrap();
        assert!(output.exists());
        assert_eq!(summary.regions, 1);
        let html = summary.html.unwrap();
        assert_eq!(html, dir.path().join("figure.html"));
        assert!(std::fs::read_to_string(html).unwrap().contains("usemap=\"#trackplot\""));
    }

    #[test]
    fn test_draw_without_clickable_writes_png_only() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("plain.png");
        let summary = snp_panel(false).draw(&output).unwrap();
        assert!(summary.html.is_none());
        assert!(!dir.path().join("plain.html").exists());
    }
}
