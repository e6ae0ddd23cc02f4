use crate::color::Rgba;
use crate::config::LayoutConfig;
use crate::coords::{format_bp, nice_round_length, DisplayWindow, Position};
use crate::surface::{ShapePath, Surface};

const MAJOR_TICK_LENGTH: u32 = 10;
const MINOR_TICK_LENGTH: u32 = 4;
const BOTTOM_MARGIN: u32 = 5;

/// Ruler height excluding the label band
pub(crate) const RULER_FIXED_HEIGHT: u32 = MAJOR_TICK_LENGTH + BOTTOM_MARGIN;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub position: Position,
    pub pixel: f64,
    pub major: bool,
}

/// Coordinate axis drawn across the top of a panel
#[derive(Debug, Clone)]
pub struct Ruler {
    text_height: u32,
    min_tick_pixel_spacing: u32,
    color: Rgba,
}

impl Ruler {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            text_height: config.ruler_text_height,
            min_tick_pixel_spacing: config.min_tick_pixel_spacing,
            color: config.ruler_color,
        }
    }

    pub fn height(&self) -> u32 {
        self.text_height.saturating_add(RULER_FIXED_HEIGHT)
    }

    /// Logical distance between major ticks, at least `min_tick_pixel_spacing` apart
    pub fn tick_step(&self, window: &DisplayWindow) -> Position {
        let raw = self.min_tick_pixel_spacing as f64 * window.rescale_factor();
        nice_round_length(raw) as Position
    }

    pub fn ticks(&self, window: &DisplayWindow) -> Vec<Tick> {
        let step = self.tick_step(window).max(1);
        let minor_step = if step % 5 == 0 { step / 5 } else { (step / 2).max(1) };

        let mut ticks = Vec::new();
        // First multiple of minor_step >= window start
        let mut pos = (window.start() + minor_step - 1).div_euclid(minor_step) * minor_step;
        while pos <= window.stop() {
            ticks.push(Tick {
                position: pos,
                pixel: window.to_pixel(pos),
                major: pos % step == 0,
            });
            pos += minor_step;
        }
        ticks
    }

    pub fn draw(&self, surface: &mut dyn Surface, vertical_offset: u32, window: &DisplayWindow) {
        let baseline = (vertical_offset + self.text_height + MAJOR_TICK_LENGTH) as f64;
        let axis = ShapePath::new()
            .move_to(0.0, baseline)
            .line_to(window.width() as f64, baseline);
        surface.stroke_path(&axis, self.color, 1.0);

        let ticks = self.ticks(window);
        for tick in &ticks {
            let length = if tick.major { MAJOR_TICK_LENGTH } else { MINOR_TICK_LENGTH };
            let length = length as f64;
            // Keep the edge ticks fully on the surface
            let x = tick.pixel.clamp(0.5, window.width() as f64 - 0.5);
            let mark = ShapePath::new().move_to(x, baseline - length).line_to(x, baseline);
            surface.stroke_path(&mark, self.color, 1.0);
        }

        log::debug!(
            "Ruler: {} ticks, major every {} ({} to {})",
            ticks.len(),
            format_bp(self.tick_step(window) as f64),
            format_bp(window.start() as f64),
            format_bp(window.stop() as f64)
        );
    }
}
