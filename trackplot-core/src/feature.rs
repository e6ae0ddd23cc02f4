use crate::coords::{DisplayWindow, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn from_symbol(symbol: &str) -> Option<Option<Strand>> {
        match symbol {
            "+" => Some(Some(Strand::Forward)),
            "-" => Some(Some(Strand::Reverse)),
            "." | "?" => Some(None),
            _ => None,
        }
    }
}

/// One contiguous logical block of a feature (an exon, for spliced features).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Position,
    pub stop: Position,
}

impl Segment {
    pub fn new(start: Position, stop: Position) -> Self {
        Self {
            start: start.min(stop),
            stop: start.max(stop),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub start: Position,
    pub stop: Position,
    #[serde(default)]
    pub strand: Option<Strand>,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl Feature {
    pub fn new<S: Into<String>>(name: S, start: Position, stop: Position) -> Self {
        Self {
            name: name.into(),
            start,
            stop,
            strand: None,
            segments: Vec::new(),
            link: None,
            title: None,
        }
    }

    /// A zero-width feature at a single position
    pub fn point<S: Into<String>>(name: S, position: Position) -> Self {
        Self::new(name, position, position)
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }

    pub fn with_link<S: Into<String>>(mut self, link: S) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the blocks of this feature; start and stop grow to cover them.
    pub fn with_segments(mut self, segments: Vec<Segment>) -> Self {
        self.set_segments(segments);
        self
    }

    pub fn set_segments(&mut self, mut segments: Vec<Segment>) {
        segments.sort_by_key(|s| (s.start, s.stop));
        if let (Some(first), Some(last)) = (segments.first(), segments.last()) {
            self.start = self.start.min(first.start);
            self.stop = self.stop.max(last.stop);
        }
        self.segments = segments;
    }

    pub fn is_point(&self) -> bool {
        self.start == self.stop
    }

    pub fn length(&self) -> Position {
        (self.stop - self.start).abs()
    }

    pub fn overlaps(&self, start: Position, end: Position) -> bool {
        self.start.min(self.stop) <= end && start <= self.start.max(self.stop)
    }

    /// Blocks to draw, left to right: the explicit segments, or the whole feature as one block.
    pub fn blocks(&self) -> Vec<Segment> {
        if self.segments.is_empty() {
            return vec![Segment::new(self.start, self.stop)];
        }
        let mut blocks: Vec<Segment> = self
            .segments
            .iter()
            .map(|s| Segment::new(s.start, s.stop))
            .collect();
        blocks.sort_by_key(|s| (s.start, s.stop));
        blocks
    }

    /// Rescale every block into pixel space.
    pub fn place(&self, window: &DisplayWindow) -> PlacedFeature<'_> {
        let ranges = self
            .blocks()
            .iter()
            .map(|seg| PixelRange {
                lend: window.to_pixel(seg.start),
                rend: window.to_pixel(seg.stop),
            })
            .collect();
        PlacedFeature { feature: self, ranges }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Pixel-space bounds of one block, already rescaled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRange {
    pub lend: f64,
    pub rend: f64,
}

impl PixelRange {
    pub fn width(&self) -> f64 {
        self.rend - self.lend
    }
}

/// A feature together with its pixel ranges for one draw pass.
#[derive(Debug, Clone)]
pub struct PlacedFeature<'a> {
    pub feature: &'a Feature,
    pub ranges: Vec<PixelRange>,
}

impl<'a> PlacedFeature<'a> {
    /// Construct directly from pixel ranges, bypassing a display window.
    pub fn from_ranges(feature: &'a Feature, ranges: Vec<PixelRange>) -> Self {
        Self { feature, ranges }
    }

    /// The first (leftmost) pixel range
    pub fn position(&self) -> PixelRange {
        self.ranges.first().copied().unwrap_or(PixelRange { lend: 0.0, rend: 0.0 })
    }

    pub fn lend(&self) -> f64 {
        self.position().lend
    }

    pub fn rend(&self) -> f64 {
        self.ranges.last().map(|r| r.rend).unwrap_or(0.0)
    }
}
