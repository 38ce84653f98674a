//! `Surface` over a 2D canvas context.

use crate::css::css_color;
use inkmark_core::{Font, TextMetrics};
use inkmark_render::{Surface, SurfaceError};
use kurbo::{BezPath, PathEl, Point, Rect, Size};
use peniko::Color;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// A canvas element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Resize the backing store. The canvas is cleared by the browser.
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl TextMetrics for CanvasSurface {
    fn measure_text_width(&self, text: &str, font: &Font) -> f64 {
        self.context.set_font(&font.css());
        match self.context.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(e) => {
                log::warn!("measureText failed: {:?}", e);
                0.0
            }
        }
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self, region: Rect) {
        self.context
            .clear_rect(region.x0, region.y0, region.width(), region.height());
    }

    fn fill_rect(&mut self, region: Rect, color: Color) {
        self.context.set_fill_style_str(&css_color(color));
        self.context
            .fill_rect(region.x0, region.y0, region.width(), region.height());
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        // Negative extents are drawn as-is; the canvas mirrors them.
        self.context.set_stroke_style_str(&css_color(color));
        self.context.set_line_width(width);
        self.context
            .stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill_text(&mut self, text: &str, origin: Point, color: Color, font: &Font) {
        self.context.set_font(&font.css());
        self.context.set_fill_style_str(&css_color(color));
        if let Err(e) = self.context.fill_text(text, origin.x, origin.y) {
            log::warn!("fillText failed: {:?}", e);
        }
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let context = &self.context;
        context.set_stroke_style_str(&css_color(color));
        context.set_line_width(width);
        context.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => context.move_to(p.x, p.y),
                PathEl::LineTo(p) => context.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => context.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => {
                    context.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y)
                }
                PathEl::ClosePath => context.close_path(),
            }
        }
        context.stroke();
    }

    fn draw_image(&mut self, image: &HtmlImageElement, origin: Point) {
        if let Err(e) = self
            .context
            .draw_image_with_html_image_element(image, origin.x, origin.y)
        {
            log::warn!("drawImage failed: {:?}", e);
        }
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        self.canvas
            .to_data_url()
            .map_err(|e| SurfaceError::Snapshot(format!("{:?}", e)))
    }
}
