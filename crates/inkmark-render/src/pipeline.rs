//! Full redraw and single-element drawing.

use crate::surface::Surface;
use inkmark_core::elements::{Element, Font};
use inkmark_core::{AnnotatorConfig, Redraw, Session};
use kurbo::{Point, Rect};
use peniko::Color;

/// Paints a session onto a surface.
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    /// Solid fill under everything.
    pub background_color: Color,
    /// Font for text labels.
    pub font: Font,
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::from_config(&AnnotatorConfig::default())
    }
}

impl RenderPipeline {
    pub fn new(background_color: Color, font: Font) -> Self {
        Self {
            background_color,
            font,
        }
    }

    pub fn from_config(config: &AnnotatorConfig) -> Self {
        Self::new(config.background().into(), config.font.clone())
    }

    /// Clear, fill the background, draw the background image if it has
    /// loaded, then replay every element in order.
    pub fn redraw<S: Surface>(&self, surface: &mut S, session: &Session<S::Image>) {
        let region = Rect::from_origin_size(Point::ZERO, surface.size());
        surface.clear(region);
        surface.fill_rect(region, self.background_color);

        if let Some(image) = session.background().image() {
            surface.draw_image(image, Point::ZERO);
        }

        for element in session.elements() {
            self.draw_element(surface, element);
        }
    }

    /// Paint one element on top of whatever is already on the surface.
    pub fn draw_element<S: Surface>(&self, surface: &mut S, element: &Element) {
        match element {
            Element::Rectangle(rect) => {
                surface.stroke_rect(
                    rect.raw_rect(),
                    rect.style.render_color().into(),
                    rect.style.stroke_width,
                );
            }
            Element::Text(text) => {
                surface.fill_text(
                    &text.text,
                    text.anchor(),
                    text.style.render_color().into(),
                    &self.font,
                );
            }
            Element::Freedraw(freedraw) => {
                if freedraw.is_empty() {
                    return;
                }
                surface.stroke_path(
                    &freedraw.to_path(),
                    freedraw.style.render_color().into(),
                    freedraw.style.stroke_width,
                );
            }
            Element::Unknown(_) => {}
        }
    }

    /// Carry out a redraw request from the gesture controller.
    pub fn apply<S: Surface>(&self, surface: &mut S, session: &Session<S::Image>, redraw: Redraw) {
        match redraw {
            Redraw::None => {}
            Redraw::Full => self.redraw(surface, session),
            Redraw::FullThenElement(index) => {
                self.redraw(surface, session);
                if let Some(element) = session.element(index) {
                    self.draw_element(surface, element);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use image::RgbaImage;
    use inkmark_core::elements::ElementStyle;
    use inkmark_core::Rgba8;

    fn pipeline() -> RenderPipeline {
        RenderPipeline::default()
    }

    fn session_with(elements: Vec<Element>) -> Session<RgbaImage> {
        let mut session = Session::new();
        for element in elements {
            session.push(element);
        }
        session
    }

    #[test]
    fn test_empty_redraw() {
        let mut surface = RecordingSurface::new(400, 300);
        pipeline().redraw(&mut surface, &Session::new());

        let region = Rect::new(0.0, 0.0, 400.0, 300.0);
        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Clear(region),
                DrawCommand::FillRect { rect: region, color: Rgba8::white() },
            ]
        );
    }

    #[test]
    fn test_image_drawn_only_when_loaded() {
        let mut surface = RecordingSurface::new(50, 50);
        let mut session: Session<RgbaImage> = Session::new();
        let ticket = session.background_mut().begin_load();

        pipeline().redraw(&mut surface, &session);
        assert!(!surface.commands().iter().any(|c| matches!(c, DrawCommand::DrawImage { .. })));

        session.background_mut().complete(ticket, RgbaImage::new(10, 20));
        surface.take_commands();
        pipeline().redraw(&mut surface, &session);
        assert_eq!(
            surface.commands()[2],
            DrawCommand::DrawImage { origin: Point::ZERO, width: 10, height: 20 }
        );
    }

    #[test]
    fn test_elements_replayed_in_order() {
        let mut rect = Element::rectangle(Point::new(10.0, 10.0), ElementStyle::default());
        rect.as_rectangle_mut().unwrap().set_extent(-5.0, 20.0);
        let mut stroke = Element::freedraw(Point::new(0.0, 0.0), ElementStyle::new("#000000", 3.0, "#ff0000"));
        stroke.as_freedraw_mut().unwrap().push_point(Point::new(4.0, 4.0));
        let text = Element::text(Point::new(1.0, 2.0), "hi", ElementStyle::default()).unwrap();

        let mut surface = RecordingSurface::new(100, 100);
        pipeline().redraw(&mut surface, &session_with(vec![rect, stroke, text]));

        let commands = &surface.commands()[2..];
        assert_eq!(
            commands,
            &[
                DrawCommand::StrokeRect {
                    rect: Rect::new(10.0, 10.0, 5.0, 30.0),
                    color: Rgba8::black(),
                    width: 2.0,
                },
                DrawCommand::StrokePath {
                    points: vec![Point::new(0.0, 0.0), Point::new(4.0, 4.0)],
                    color: Rgba8::new(255, 0, 0, 255),
                    width: 3.0,
                },
                DrawCommand::FillText {
                    text: "hi".into(),
                    origin: Point::new(1.0, 2.0),
                    color: Rgba8::black(),
                    font: "20px Arial".into(),
                },
            ]
        );
    }

    #[test]
    fn test_legacy_color_falls_back_to_stroke_color() {
        let mut style = ElementStyle::new("#0000ff", 2.0, "#000000");
        style.color = None;
        let mut surface = RecordingSurface::new(10, 10);
        pipeline().draw_element(&mut surface, &Element::rectangle(Point::ZERO, style));

        assert!(matches!(
            surface.commands()[0],
            DrawCommand::StrokeRect { color, .. } if color == Rgba8::new(0, 0, 255, 255)
        ));
    }

    #[test]
    fn test_unknown_and_empty_elements_not_drawn() {
        let mut stroke = Element::freedraw(Point::ZERO, ElementStyle::default());
        stroke.as_freedraw_mut().unwrap().points.clear();
        let unknown = Element::Unknown(serde_json::json!({ "type": "ellipse" }));

        let mut surface = RecordingSurface::new(10, 10);
        pipeline().draw_element(&mut surface, &stroke);
        pipeline().draw_element(&mut surface, &unknown);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_incremental_matches_last_element() {
        let mut rect = Element::rectangle(Point::new(1.0, 1.0), ElementStyle::default());
        rect.as_rectangle_mut().unwrap().set_extent(5.0, 5.0);
        let session = session_with(vec![rect]);

        let mut surface = RecordingSurface::new(10, 10);
        pipeline().apply(&mut surface, &session, Redraw::FullThenElement(0));

        let commands = surface.commands();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[2], commands[3]);
    }

    #[test]
    fn test_apply_none_draws_nothing() {
        let mut surface = RecordingSurface::new(10, 10);
        pipeline().apply(&mut surface, &Session::new(), Redraw::None);
        assert!(surface.commands().is_empty());
    }
}
