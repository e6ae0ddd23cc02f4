//! Tracks: horizontal bands of features packed into non-overlapping rows

use crate::color::Rgba;
use crate::config::LayoutConfig;
use crate::coords::DisplayWindow;
use crate::error::Result;
use crate::feature::Feature;
use crate::glyph::{FeatureContext, Glyph, GlyphKind};
use crate::imagemap::ImageMap;
use crate::surface::{ShapePath, Surface};

/// Minimum horizontal gap between two glyphs sharing a row
pub const ROW_GAP: f64 = 1.0;

/// Where one feature landed after row packing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowAssignment {
    /// Index into the track's features
    pub index: usize,
    pub row: usize,
    pub left: f64,
    pub right: f64,
}

#[derive(Debug)]
pub struct Track {
    name: String,
    show_label: bool,
    color: Rgba,
    kind: GlyphKind,
    glyph: Box<dyn Glyph>,
    layout: LayoutConfig,
    features: Vec<Feature>,
    vertical_offset: u32,
    row_count: usize,
}

impl Track {
    pub fn new<S: Into<String>>(name: S, kind: GlyphKind, config: &LayoutConfig) -> Self {
        Self {
            name: name.into(),
            show_label: true,
            color: config.feature_color,
            kind,
            glyph: kind.create(config),
            layout: config.clone(),
            features: Vec::new(),
            vertical_offset: 0,
            row_count: 0,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_label(mut self, show_label: bool) -> Self {
        self.show_label = show_label;
        self
    }

    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn extend_features<I: IntoIterator<Item = Feature>>(&mut self, features: I) {
        self.features.extend(features);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn show_label(&self) -> bool {
        self.show_label
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn kind(&self) -> GlyphKind {
        self.kind
    }

    pub fn glyph(&self) -> &dyn Glyph {
        self.glyph.as_ref()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn set_vertical_offset(&mut self, pixels: u32) {
        self.vertical_offset = pixels;
    }

    pub fn vertical_offset(&self) -> u32 {
        self.vertical_offset
    }

    /// Rows used by the last draw
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Header band plus all rows of the last draw
    pub fn band_height(&self) -> u32 {
        let rows = u32::try_from(self.row_count).unwrap_or(u32::MAX);
        rows.saturating_mul(self.layout.row_pitch())
            .saturating_add(self.layout.track_header_height)
    }

    pub fn row_top(&self, row: usize) -> f64 {
        self.vertical_offset as f64
            + self.layout.track_header_height as f64
            + row as f64 * self.layout.row_pitch() as f64
    }

    /// Assign every visible feature to a row. Features outside `window` are skipped.
    pub fn layout(&self, window: &DisplayWindow) -> Vec<RowAssignment> {
        let mut visible = Vec::new();
        for (index, feature) in self.features.iter().enumerate() {
            if !window.overlaps(feature.start.min(feature.stop), feature.start.max(feature.stop)) {
                log::warn!(
                    "Track '{}': feature '{}' ({}..{}) lies outside the display window, skipping",
                    self.name,
                    feature.name,
                    feature.start,
                    feature.stop
                );
                continue;
            }
            let placed = feature.place(window);
            visible.push((
                index,
                self.glyph.left_pixel_extent(&placed),
                self.glyph.right_pixel_extent(&placed),
            ));
        }

        let extents: Vec<(f64, f64)> = visible.iter().map(|&(_, l, r)| (l, r)).collect();
        let (rows, _) = pack_rows(&extents);
        visible
            .into_iter()
            .zip(rows)
            .map(|((index, left, right), row)| RowAssignment { index, row, left, right })
            .collect()
    }

    /// Lay out and draw every feature; returns the number of rows used.
    pub fn draw(
        &mut self,
        surface: &mut dyn Surface,
        window: &DisplayWindow,
        mut image_map: Option<&mut ImageMap>,
    ) -> Result<usize> {
        // Preconditions hold for every feature, including those clipped by the window
        for feature in &self.features {
            self.glyph.check(feature)?;
        }

        let assignments = self.layout(window);
        self.row_count = assignments.iter().map(|a| a.row + 1).max().unwrap_or(0);
        log::debug!(
            "Track '{}': {} features in {} rows at offset {}",
            self.name,
            assignments.len(),
            self.row_count,
            self.vertical_offset
        );

        let header_y = self.vertical_offset as f64 + self.layout.track_header_height as f64 / 2.0;
        let rule = ShapePath::new()
            .move_to(0.0, header_y)
            .line_to(window.width() as f64, header_y);
        surface.stroke_path(&rule, self.layout.header_color, 1.0);

        if self.show_label {
            if let Some(map) = image_map.as_deref_mut() {
                map.add_legend_entry(self.name.clone(), self.color);
            }
        }

        for assignment in &assignments {
            let feature = &self.features[assignment.index];
            let placed = feature.place(window);
            let mut ctx = FeatureContext::new(
                &mut *surface,
                self.row_top(assignment.row),
                &self.layout,
                self.color,
            )
            .with_image_map(image_map.as_deref_mut());
            self.glyph.draw(&placed, &mut ctx)?;
        }

        Ok(self.row_count)
    }
}

/// Greedy first-fit packing by left extent.
///
/// Returns the row of each input extent (in input order) and the number of rows opened.
pub fn pack_rows(extents: &[(f64, f64)]) -> (Vec<usize>, usize) {
    let mut order: Vec<usize> = (0..extents.len()).collect();
    order.sort_by(|&a, &b| {
        extents[a]
            .0
            .total_cmp(&extents[b].0)
            .then(extents[a].1.total_cmp(&extents[b].1))
    });

    let mut row_ends: Vec<f64> = Vec::new();
    let mut rows = vec![0; extents.len()];
    for i in order {
        let (left, right) = extents[i];
        match row_ends.iter().position(|&end| end + ROW_GAP <= left) {
            Some(row) => {
                row_ends[row] = right;
                rows[i] = row;
            }
            None => {
                rows[i] = row_ends.len();
                row_ends.push(right);
            }
        }
    }
    (rows, row_ends.len())
}
