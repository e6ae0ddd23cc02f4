//! Figure description files
//!
//! A figure is a TOML document with a `[panel]` table, an optional `[layout]`
//! table and one `[[tracks]]` entry per track, top to bottom. Track features are
//! given inline as `[[tracks.features]]` or loaded from a GFF3 file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use trackplot_core::io::{load_gff3_features, Gff3Filter};
use trackplot_core::{
    Feature, GlyphKind, LayoutConfig, Panel, PanelParams, Position, Rgba, Segment, Strand, Track,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    pub panel: PanelParams,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub tracks: Vec<TrackConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackConfig {
    pub name: String,

    pub glyph: GlyphKind,

    /// Feature colour; the layout's `feature_color` when absent
    #[serde(default)]
    pub color: Option<Rgba>,

    /// List the track in the HTML legend
    #[serde(default = "default_true")]
    pub label: bool,

    #[serde(default)]
    pub gff3: Option<Gff3Source>,

    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gff3Source {
    /// Relative paths are resolved against the figure file's directory
    pub path: PathBuf,

    #[serde(default)]
    pub seqid: Option<String>,

    /// Feature types to keep, e.g. `["exon"]`; empty keeps all
    #[serde(default)]
    pub types: Vec<String>,

    /// Group records by `Parent`; defaults to on for spliced glyphs
    #[serde(default)]
    pub group_by_parent: Option<bool>,
}

fn default_true() -> bool { true }

impl FigureConfig {
    /// Load a figure description from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read figure file: {}", path.display()))?;

        let figure: FigureConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse figure file: {}", path.display()))?;

        Ok(figure)
    }

    /// A small two-track figure used by `trackplot example`
    pub fn example() -> Self {
        let genes = TrackConfig {
            name: "genes".to_string(),
            glyph: GlyphKind::DirectedSpliced,
            color: Some(Rgba::rgb(0x2a, 0x6f, 0xef)),
            label: true,
            gff3: None,
            features: vec![
                Feature::new("ABC1", 1_200, 4_800)
                    .with_strand(Strand::Forward)
                    .with_segments(vec![
                        Segment::new(1_200, 1_900),
                        Segment::new(2_600, 3_100),
                        Segment::new(4_200, 4_800),
                    ])
                    .with_link("https://example.org/genes/ABC1"),
                Feature::new("XYZ2", 4_000, 8_500).with_strand(Strand::Reverse),
            ],
        };
        let variants = TrackConfig {
            name: "variants".to_string(),
            glyph: GlyphKind::Triangle,
            color: Some(Rgba::rgb(0xe5, 0x39, 0x35)),
            label: true,
            gff3: None,
            features: vec![
                Feature::point("rs1001", 2_750).with_title("rs1001 A>G"),
                Feature::point("rs1002", 6_100),
            ],
        };

        Self {
            panel: PanelParams::new(10_000).with_width(800).with_clickable(true),
            layout: LayoutConfig::default(),
            tracks: vec![genes, variants],
        }
    }

    /// Generate example figure file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::example()).context("Failed to serialize example figure")
    }

    /// Build a panel with all tracks; GFF3 paths are resolved against `base_dir`.
    pub fn build_panel(&self, base_dir: &Path) -> Result<Panel> {
        let mut panel = Panel::new(self.panel.clone(), self.layout.clone())
            .context("Invalid panel geometry")?;

        for track_config in &self.tracks {
            let track = track_config.build(&self.layout, base_dir)?;
            log::debug!(
                "Track '{}': {} glyphs, {} features",
                track.name(),
                track.kind(),
                track.features().len()
            );
            panel.add_track(track);
        }
        Ok(panel)
    }
}

impl TrackConfig {
    pub fn build(&self, layout: &LayoutConfig, base_dir: &Path) -> Result<Track> {
        let mut track = Track::new(self.name.clone(), self.glyph, layout).with_label(self.label);
        if let Some(color) = self.color {
            track = track.with_color(color);
        }

        if let Some(source) = &self.gff3 {
            let path = if source.path.is_absolute() {
                source.path.clone()
            } else {
                base_dir.join(&source.path)
            };
            let filter = Gff3Filter {
                seqid: source.seqid.clone(),
                feature_types: source.types.clone(),
            };
            let group = source.group_by_parent.unwrap_or_else(|| self.glyph.uses_segments());
            let features = load_gff3_features(&path, &filter, group)
                .with_context(|| format!("Failed to load features for track '{}'", self.name))?;
            track.extend_features(features);
        }

        track.extend_features(self.features.iter().cloned());
        Ok(track)
    }
}

/// Command-line overrides for the `[panel]` table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelOverrides {
    pub width: Option<u32>,
    pub start: Option<Position>,
    pub stop: Option<Position>,
    pub clickable: bool,
}

impl PanelOverrides {
    pub fn apply(&self, params: &mut PanelParams) {
        if self.width.is_some() {
            params.width = self.width;
        }
        if self.start.is_some() {
            params.display_start = self.start;
        }
        if self.stop.is_some() {
            params.display_stop = self.stop;
        }
        params.clickable |= self.clickable;
    }
}
