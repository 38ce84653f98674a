//! Rectangle element.

use super::ElementStyle;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A stroked rectangle.
///
/// `width` and `height` are signed: a rectangle dragged up or left of its
/// anchor keeps negative extents, and renderers draw them as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Anchor x (where the drag started).
    pub x: f64,
    /// Anchor y (where the drag started).
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(flatten)]
    pub style: ElementStyle,
}

impl Rectangle {
    /// Create a zero-size rectangle at `anchor`.
    pub fn new(anchor: Point, style: ElementStyle) -> Self {
        Self {
            x: anchor.x,
            y: anchor.y,
            width: 0.0,
            height: 0.0,
            style,
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Update the signed extents while a drag is in progress.
    pub fn set_extent(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// The rectangle exactly as drawn, corners not reordered.
    ///
    /// `x0 > x1` (or `y0 > y1`) when the extent is negative.
    pub fn raw_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Normalized bounding box, used for hit-testing.
    pub fn bounds(&self) -> Rect {
        self.raw_rect().abs()
    }

    /// Whether the normalized bounds intersect `other` on both axes.
    /// Touching edges count as overlapping.
    pub fn overlaps(&self, other: Rect) -> bool {
        let bounds = self.bounds();
        let other = other.abs();
        bounds.x0 <= other.x1 && other.x0 <= bounds.x1 && bounds.y0 <= other.y1 && other.y0 <= bounds.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), ElementStyle::default());
        assert!((rect.x - 10.0).abs() < f64::EPSILON);
        assert!((rect.y - 20.0).abs() < f64::EPSILON);
        assert!(rect.width.abs() < f64::EPSILON);
        assert!(rect.height.abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_extent_kept_raw() {
        let mut rect = Rectangle::new(Point::new(100.0, 100.0), ElementStyle::default());
        rect.set_extent(-40.0, -30.0);

        let raw = rect.raw_rect();
        assert!((raw.x0 - 100.0).abs() < f64::EPSILON);
        assert!((raw.x1 - 60.0).abs() < f64::EPSILON);

        let bounds = rect.bounds();
        assert!((bounds.x0 - 60.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 70.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlaps() {
        let mut rect = Rectangle::new(Point::new(0.0, 0.0), ElementStyle::default());
        rect.set_extent(100.0, 50.0);

        assert!(rect.overlaps(Rect::new(90.0, 40.0, 110.0, 60.0)));
        assert!(rect.overlaps(Rect::new(100.0, 0.0, 120.0, 10.0))); // Touching edge
        assert!(!rect.overlaps(Rect::new(101.0, 0.0, 120.0, 10.0)));
        assert!(!rect.overlaps(Rect::new(10.0, 60.0, 20.0, 70.0)));
    }

    #[test]
    fn test_overlaps_negative_extent() {
        let mut rect = Rectangle::new(Point::new(100.0, 100.0), ElementStyle::default());
        rect.set_extent(-50.0, -50.0);

        assert!(rect.overlaps(Rect::new(45.0, 45.0, 55.0, 55.0)));
        assert!(!rect.overlaps(Rect::new(110.0, 110.0, 120.0, 120.0)));
    }
}
