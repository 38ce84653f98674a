//! A surface that records draw calls.

use crate::image_source;
use crate::surface::{Surface, SurfaceError};
use image::{Rgba, RgbaImage};
use inkmark_core::elements::{Font, TextMetrics};
use inkmark_core::Rgba8;
use kurbo::{BezPath, PathEl, Point, Rect, Size};
use peniko::Color;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    FillRect { rect: Rect, color: Rgba8 },
    StrokeRect { rect: Rect, color: Rgba8, width: f64 },
    FillText { text: String, origin: Point, color: Rgba8, font: String },
    StrokePath { points: Vec<Point>, color: Rgba8, width: f64 },
    DrawImage { origin: Point, width: u32, height: u32 },
}

/// Headless surface for tests and tooling.
///
/// Every call is appended to a command log. Clears, fills and images are also
/// applied to a pixel buffer so snapshots show the background; strokes and
/// text are recorded only.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pixels: RgbaImage,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Everything drawn since creation (or the last [`take_commands`](Self::take_commands)).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands issued since the most recent clear, i.e. the current frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    fn fill_pixels(&mut self, region: Rect, color: Rgba8) {
        let region = region.abs();
        let (width, height) = self.pixels.dimensions();
        let x0 = region.x0.max(0.0).floor() as u32;
        let y0 = region.y0.max(0.0).floor() as u32;
        let x1 = (region.x1.ceil().max(0.0) as u32).min(width);
        let y1 = (region.y1.ceil().max(0.0) as u32).min(height);

        let pixel = Rgba([color.r, color.g, color.b, color.a]);
        for y in y0..y1 {
            for x in x0..x1 {
                self.pixels.put_pixel(x, y, pixel);
            }
        }
    }
}

impl TextMetrics for RecordingSurface {
    /// Rough estimate: half the font size per character.
    fn measure_text_width(&self, text: &str, font: &Font) -> f64 {
        text.chars().count() as f64 * font.size * 0.5
    }
}

impl Surface for RecordingSurface {
    type Image = RgbaImage;

    fn size(&self) -> Size {
        let (width, height) = self.pixels.dimensions();
        Size::new(width as f64, height as f64)
    }

    fn clear(&mut self, region: Rect) {
        self.fill_pixels(region, Rgba8::transparent());
        self.commands.push(DrawCommand::Clear(region));
    }

    fn fill_rect(&mut self, region: Rect, color: Color) {
        let color = Rgba8::from(color);
        self.fill_pixels(region, color);
        self.commands.push(DrawCommand::FillRect { rect: region, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color: color.into(),
            width,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, color: Color, font: &Font) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            origin,
            color: color.into(),
            font: font.css(),
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let points = path
            .elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect();
        self.commands.push(DrawCommand::StrokePath {
            points,
            color: color.into(),
            width,
        });
    }

    fn draw_image(&mut self, image: &RgbaImage, origin: Point) {
        image::imageops::overlay(&mut self.pixels, image, origin.x as i64, origin.y as i64);
        self.commands.push(DrawCommand::DrawImage {
            origin,
            width: image.width(),
            height: image.height(),
        });
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        image_source::encode_png_data_url(&self.pixels).map_err(|e| SurfaceError::Snapshot(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_and_clear_pixels() {
        let mut surface = RecordingSurface::new(4, 4);
        surface.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::from_rgba8(255, 255, 255, 255));
        assert_eq!(surface.pixels().get_pixel(3, 3), &Rgba([255, 255, 255, 255]));

        surface.clear(Rect::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(surface.pixels().get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
        assert_eq!(surface.pixels().get_pixel(2, 2), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_fill_outside_bounds_is_clipped() {
        let mut surface = RecordingSurface::new(2, 2);
        surface.fill_rect(Rect::new(-5.0, -5.0, 50.0, 50.0), Color::from_rgba8(1, 2, 3, 255));
        assert_eq!(surface.pixels().get_pixel(1, 1), &Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_last_frame() {
        let mut surface = RecordingSurface::new(4, 4);
        let region = Rect::new(0.0, 0.0, 4.0, 4.0);
        surface.clear(region);
        surface.stroke_rect(region, Color::from_rgba8(0, 0, 0, 255), 1.0);
        surface.clear(region);
        surface.fill_rect(region, Color::from_rgba8(0, 0, 0, 255));

        assert_eq!(surface.last_frame().len(), 2);
        assert_eq!(surface.commands().len(), 4);
    }

    #[test]
    fn test_draw_image_copies_pixels() {
        let mut surface = RecordingSurface::new(4, 4);
        let image = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]));
        surface.draw_image(&image, Point::new(1.0, 1.0));

        assert_eq!(surface.pixels().get_pixel(2, 2), &Rgba([9, 9, 9, 255]));
        assert_eq!(surface.pixels().get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_snapshot_is_png_data_url() {
        let surface = RecordingSurface::new(3, 2);
        let url = surface.to_data_url().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let decoded = image_source::decode_data_url(&url).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
    }

    #[test]
    fn test_measure_text() {
        let surface = RecordingSurface::new(1, 1);
        let width = surface.measure_text_width("abcd", &Font::default());
        assert!((width - 40.0).abs() < f64::EPSILON);
    }
}
