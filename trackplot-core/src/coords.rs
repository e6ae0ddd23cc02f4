use crate::error::{Result, TrackplotError};

/// Logical coordinate (base pairs). Signed so that callers may pass unclamped window bounds.
pub type Position = i64;

/// The logical sub-range rendered by a panel, together with its pixel scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayWindow {
    start: Position,
    stop: Position,
    width: u32,
    rescale_factor: f64,
}

impl DisplayWindow {
    /// Normalise a requested window against `length` and derive the rescale factor.
    ///
    /// A missing or negative start clamps to 0, a missing or over-long stop clamps to
    /// `length`. The clamped window must still satisfy `start < stop`.
    pub fn new(
        length: Position,
        width: u32,
        start: Option<Position>,
        stop: Option<Position>,
    ) -> Result<Self> {
        if length <= 0 {
            return Err(TrackplotError::configuration(format!(
                "length must be positive (got {})",
                length
            )));
        }
        if width == 0 {
            return Err(TrackplotError::configuration("width must be positive"));
        }

        let start = start.unwrap_or(0).max(0);
        let stop = stop.unwrap_or(length).min(length);
        if stop <= start {
            return Err(TrackplotError::configuration(format!(
                "display stop ({}) must be greater than display start ({})",
                stop, start
            )));
        }

        let rescale_factor = (stop - start) as f64 / width as f64;
        Ok(Self {
            start,
            stop,
            width,
            rescale_factor,
        })
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn stop(&self) -> Position {
        self.stop
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical units per pixel
    pub fn rescale_factor(&self) -> f64 {
        self.rescale_factor
    }

    pub fn span(&self) -> Position {
        self.stop - self.start
    }

    pub fn to_pixel(&self, x: Position) -> f64 {
        (x - self.start) as f64 / self.rescale_factor
    }

    pub fn to_logical(&self, px: f64) -> f64 {
        self.start as f64 + px * self.rescale_factor
    }

    /// True when `[start, stop]` touches the window (bounds inclusive so point features count).
    pub fn overlaps(&self, start: Position, stop: Position) -> bool {
        start <= self.stop && self.start <= stop
    }
}

/// Format a basepair position in human-friendly units
pub fn format_bp(bp: f64) -> String {
    if bp >= 1e9 {
        format!("{:.2} Gb", bp / 1e9)
    } else if bp >= 1e6 {
        format!("{:.2} Mb", bp / 1e6)
    } else if bp >= 1e3 {
        format!("{:.2} kb", bp / 1e3)
    } else {
        format!("{:.0} bp", bp)
    }
}

/// Round a length up to the next 1, 2 or 5 × 10^k
pub fn nice_round_length(x: f64) -> f64 {
    if x <= 1.0 {
        return 1.0;
    }
    let base = 10f64.powf(x.log10().floor());
    let mantissa = x / base;
    let nice = if mantissa <= 1.0 {
        1.0
    } else if mantissa <= 2.0 {
        2.0
    } else if mantissa <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}
