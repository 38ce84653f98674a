//! Text label element.

use super::ElementStyle;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Font used for every text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Size in pixels. Also used as the label height for hit-testing.
    pub size: f64,
    pub family: String,
}

impl Font {
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }

    /// CSS shorthand, e.g. `20px Arial`.
    pub fn css(&self) -> String {
        format!("{}px {}", self.size, self.family)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(20.0, "Arial")
    }
}

/// Text measurement, provided by whatever surface draws the text.
pub trait TextMetrics {
    /// Advance width of `text` rendered in `font`.
    fn measure_text_width(&self, text: &str, font: &Font) -> f64;
}

/// A single-line text label. `(x, y)` is the left end of the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub text: String,
    #[serde(flatten)]
    pub style: ElementStyle,
}

impl Text {
    /// Create a label. Returns `None` when `text` is empty.
    pub fn new(anchor: Point, text: &str, style: ElementStyle) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(Self {
            x: anchor.x,
            y: anchor.y,
            text: text.to_string(),
            style,
        })
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Box from the baseline up one font height, as wide as the measured text.
    pub fn bounds(&self, metrics: &impl TextMetrics, font: &Font) -> Rect {
        let width = metrics.measure_text_width(&self.text, font);
        Rect::new(self.x, self.y - font.size, self.x + width, self.y)
    }

    /// Whether `point` lies inside [`Text::bounds`], edges included.
    pub fn contains(&self, point: Point, metrics: &impl TextMetrics, font: &Font) -> bool {
        let bounds = self.bounds(metrics, font);
        point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
    }
}
