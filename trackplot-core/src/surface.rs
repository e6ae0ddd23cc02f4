/*!
# Drawing surfaces

`Surface` is the small set of primitives glyphs, tracks and the ruler draw with.
`PixmapSurface` implements it over a `tiny_skia::Pixmap` and adds the operations only
the panel needs: allocation, top-left region copy and PNG encoding (through `image`).
*/

use crate::color::Rgba;
use crate::error::{Result, TrackplotError};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tiny_skia::{
    BlendMode, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};

/// A polyline path built from move/line/close commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapePath {
    commands: Vec<PathCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

impl ShapePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(x, y));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(x, y));
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Closed axis-aligned rectangle
    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new()
            .move_to(x, y)
            .line_to(x + w, y)
            .line_to(x + w, y + h)
            .line_to(x, y + h)
            .close()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Horizontal span touched by the path's points
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                PathCommand::MoveTo(x, _) | PathCommand::LineTo(x, _) => Some(x),
                PathCommand::Close => None,
            })
            .fold(None, |acc, x| match acc {
                None => Some((x, x)),
                Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
            })
    }

    fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(x, y) => pb.move_to(x as f32, y as f32),
                PathCommand::LineTo(x, y) => pb.line_to(x as f32, y as f32),
                PathCommand::Close => pb.close(),
            }
        }
        pb.finish()
    }
}

/// Drawing primitives consumed by glyphs, tracks and the ruler.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn fill_background(&mut self, color: Rgba);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);

    fn fill_path(&mut self, path: &ShapePath, color: Rgba);

    fn stroke_path(&mut self, path: &ShapePath, color: Rgba, line_width: f64);
}

/// Raster surface backed by a tiny-skia pixmap
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            TrackplotError::resource(format!(
                "failed to allocate {}x{} drawing surface",
                width, height
            ))
        })?;
        Ok(Self { pixmap })
    }

    /// Copy the top-left `width` x `height` region into a freshly allocated surface.
    pub fn copy_region(&self, width: u32, height: u32) -> Result<PixmapSurface> {
        if width > self.pixmap.width() || height > self.pixmap.height() {
            return Err(TrackplotError::resource(format!(
                "region {}x{} exceeds source surface {}x{}",
                width,
                height,
                self.pixmap.width(),
                self.pixmap.height()
            )));
        }
        let mut target = PixmapSurface::new(width, height)?;
        let paint = PixmapPaint {
            blend_mode: BlendMode::Source,
            ..PixmapPaint::default()
        };
        target
            .pixmap
            .draw_pixmap(0, 0, self.pixmap.as_ref(), &paint, Transform::identity(), None);
        Ok(target)
    }

    /// Straight-alpha colour at `(x, y)`, `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        // tiny-skia only bounds-checks the flat index, so a wide x wraps to the next row
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Rgba::rgba(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.to_rgba_image()
            .write_to(&mut buf, image::ImageOutputFormat::Png)?;
        Ok(buf.into_inner())
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.to_rgba_image()
            .save_with_format(path, ImageFormat::Png)
            .map_err(|err| match err {
                image::ImageError::IoError(source) => TrackplotError::io(path, source),
                other => TrackplotError::from(other),
            })
    }

    fn paint(color: Rgba) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;
        paint
    }
}

impl Surface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn fill_background(&mut self, color: Rgba) {
        self.pixmap.fill(color.to_skia());
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        // Degenerate rectangles are silently dropped
        if let Some(rect) = Rect::from_xywh(x as f32, y as f32, w as f32, h as f32) {
            let mut paint = Self::paint(color);
            paint.anti_alias = false;
            self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    fn fill_path(&mut self, path: &ShapePath, color: Rgba) {
        if let Some(path) = path.to_skia() {
            self.pixmap.fill_path(
                &path,
                &Self::paint(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_path(&mut self, path: &ShapePath, color: Rgba, line_width: f64) {
        if let Some(path) = path.to_skia() {
            let stroke = Stroke {
                width: line_width as f32,
                ..Stroke::default()
            };
            self.pixmap.stroke_path(
                &path,
                &Self::paint(color),
                &stroke,
                Transform::identity(),
                None,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_failure_is_resource_error() {
        let err = PixmapSurface::new(0, 10).err().unwrap();
        assert!(matches!(err, TrackplotError::Resource { .. }));
    }

    #[test]
    fn test_fill_rect_and_pixel() {
        let mut surface = PixmapSurface::new(20, 20).unwrap();
        surface.fill_background(Rgba::WHITE);
        surface.fill_rect(5.0, 5.0, 5.0, 5.0, Rgba::rgb(255, 0, 0));
        assert_eq!(surface.pixel(7, 7), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(surface.pixel(1, 1), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(25, 1), None);
    }

    #[test]
    fn test_pixel_outside_bounds_does_not_wrap() {
        let mut surface = PixmapSurface::new(20, 20).unwrap();
        surface.fill_background(Rgba::WHITE);
        assert_eq!(surface.pixel(19, 19), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(20, 0), None);
        assert_eq!(surface.pixel(39, 5), None);
        assert_eq!(surface.pixel(0, 20), None);
    }

    #[test]
    fn test_copy_region_keeps_top_left() {
        let mut surface = PixmapSurface::new(10, 100).unwrap();
        surface.fill_background(Rgba::WHITE);
        surface.fill_rect(0.0, 0.0, 10.0, 4.0, Rgba::BLACK);
        let cropped = surface.copy_region(10, 8).unwrap();
        assert_eq!(cropped.height(), 8);
        assert_eq!(cropped.pixel(3, 2), Some(Rgba::BLACK));
        assert_eq!(cropped.pixel(3, 6), Some(Rgba::WHITE));
    }

    #[test]
    fn test_copy_region_too_large() {
        let surface = PixmapSurface::new(10, 10).unwrap();
        assert!(matches!(
            surface.copy_region(10, 11),
            Err(TrackplotError::Resource { .. })
        ));
    }

    #[test]
    fn test_encode_png_decodes() {
        let mut surface = PixmapSurface::new(12, 6).unwrap();
        surface.fill_background(Rgba::WHITE);
        let bytes = surface.encode_png().unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (12, 6));
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_path_x_bounds() {
        let path = ShapePath::new().move_to(4.0, 0.0).line_to(-1.0, 5.0).line_to(9.0, 5.0).close();
        assert_eq!(path.x_bounds(), Some((-1.0, 9.0)));
        assert_eq!(ShapePath::new().x_bounds(), None);
    }
}
