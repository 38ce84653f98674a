//! Drawing-surface trait.

use inkmark_core::TextMetrics;
use inkmark_core::elements::Font;
use kurbo::{BezPath, Point, Rect, Size};
use peniko::Color;
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Snapshot failed: {0}")]
    Snapshot(String),
}

/// An immediate-mode 2D drawing target.
///
/// The render pipeline only ever talks to the surface through these calls;
/// rasterization is entirely the implementation's business.
pub trait Surface: TextMetrics {
    /// Decoded image type this surface can draw.
    type Image;

    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Reset `region` to transparent.
    fn clear(&mut self, region: Rect);

    fn fill_rect(&mut self, region: Rect, color: Color);

    /// Stroke the outline of `rect`.
    ///
    /// `rect` is not normalized: `x0 > x1` or `y0 > y1` describes a rectangle
    /// drawn up or left of its anchor and must be drawn as such.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);

    /// Fill `text` with its baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, color: Color, font: &Font);

    /// Stroke `path` as one continuous polyline.
    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);

    /// Draw `image` at natural size with its top-left corner at `origin`.
    fn draw_image(&mut self, image: &Self::Image, origin: Point);

    /// Encode the current surface contents as a data URI.
    fn to_data_url(&self) -> Result<String, SurfaceError>;
}
