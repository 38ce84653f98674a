//! Annotation elements drawn over the background image.

mod freedraw;
mod rectangle;
mod text;

pub use freedraw::Freedraw;
pub use rectangle::Rectangle;
pub use text::{Font, Text, TextMetrics};

use crate::color::Rgba8;
use kurbo::{Point, Rect};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default stroke color for elements that do not carry one.
pub const DEFAULT_STROKE_COLOR: &str = "#000000";

/// Default stroke width for elements that do not carry one.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

fn default_stroke_color() -> String {
    DEFAULT_STROKE_COLOR.to_string()
}

fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

/// Style fields shared by every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    /// Legacy stroke color. Only used for rendering when `color` is absent.
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    /// Stroke width in surface units.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Color used for rendering. Missing in documents written before it existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ElementStyle {
    pub fn new(stroke_color: impl Into<String>, stroke_width: f64, color: impl Into<String>) -> Self {
        Self {
            stroke_color: stroke_color.into(),
            stroke_width,
            color: Some(color.into()),
        }
    }

    /// The color string rendering should use.
    pub fn render_color_str(&self) -> &str {
        self.color.as_deref().unwrap_or(&self.stroke_color)
    }

    /// The parsed color rendering should use.
    pub fn render_color(&self) -> Rgba8 {
        Rgba8::parse(self.render_color_str())
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self::new(DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, DEFAULT_STROKE_COLOR)
    }
}

/// The element kinds this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Rectangle,
    Text,
    Freedraw,
}

impl ElementKind {
    /// The `type` tag used in serialized documents.
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Rectangle => "rectangle",
            ElementKind::Text => "text",
            ElementKind::Freedraw => "freedraw",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "rectangle" => Some(ElementKind::Rectangle),
            "text" => Some(ElementKind::Text),
            "freedraw" => Some(ElementKind::Freedraw),
            _ => None,
        }
    }
}

/// One annotation.
///
/// Documents may contain element types this version does not know; those
/// objects are kept as raw JSON in [`Element::Unknown`] so they survive a
/// load/save cycle. They are never painted and never erased. Entries that are
/// not objects are malformed.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rectangle(Rectangle),
    Text(Text),
    Freedraw(Freedraw),
    Unknown(serde_json::Value),
}

impl Element {
    /// Create a zero-size rectangle anchored at `anchor`.
    pub fn rectangle(anchor: Point, style: ElementStyle) -> Self {
        Element::Rectangle(Rectangle::new(anchor, style))
    }

    /// Create a text label. Returns `None` for empty text.
    pub fn text(anchor: Point, text: &str, style: ElementStyle) -> Option<Self> {
        Text::new(anchor, text, style).map(Element::Text)
    }

    /// Create a freehand stroke seeded with `anchor` as its first point.
    pub fn freedraw(anchor: Point, style: ElementStyle) -> Self {
        Element::Freedraw(Freedraw::new(anchor, style))
    }

    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            Element::Rectangle(_) => Some(ElementKind::Rectangle),
            Element::Text(_) => Some(ElementKind::Text),
            Element::Freedraw(_) => Some(ElementKind::Freedraw),
            Element::Unknown(_) => None,
        }
    }

    pub fn style(&self) -> Option<&ElementStyle> {
        match self {
            Element::Rectangle(r) => Some(&r.style),
            Element::Text(t) => Some(&t.style),
            Element::Freedraw(f) => Some(&f.style),
            Element::Unknown(_) => None,
        }
    }

    /// The anchor point recorded at creation.
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Element::Rectangle(r) => Some(r.anchor()),
            Element::Text(t) => Some(t.anchor()),
            Element::Freedraw(f) => Some(f.anchor()),
            Element::Unknown(_) => None,
        }
    }

    /// Bounding box, when it can be known without text metrics.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Element::Rectangle(r) => Some(r.bounds()),
            Element::Freedraw(f) => f.bounds(),
            Element::Text(_) | Element::Unknown(_) => None,
        }
    }

    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match self {
            Element::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_rectangle_mut(&mut self) -> Option<&mut Rectangle> {
        match self {
            Element::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_freedraw(&self) -> Option<&Freedraw> {
        match self {
            Element::Freedraw(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_freedraw_mut(&mut self) -> Option<&mut Freedraw> {
        match self {
            Element::Freedraw(f) => Some(f),
            _ => None,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedRef<'a> {
    Rectangle(&'a Rectangle),
    Text(&'a Text),
    Freedraw(&'a Freedraw),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Tagged {
    Rectangle(Rectangle),
    Text(Text),
    Freedraw(Freedraw),
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Element::Rectangle(r) => TaggedRef::Rectangle(r).serialize(serializer),
            Element::Text(t) => TaggedRef::Text(t).serialize(serializer),
            Element::Freedraw(f) => TaggedRef::Freedraw(f).serialize(serializer),
            Element::Unknown(value) => value.serialize(serializer),
        }
    }
}

fn unexpected(value: &serde_json::Value) -> serde::de::Unexpected<'_> {
    use serde::de::Unexpected;
    match value {
        serde_json::Value::Null => Unexpected::Unit,
        serde_json::Value::Bool(b) => Unexpected::Bool(*b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => Unexpected::Float(f),
            None => Unexpected::Other("number"),
        },
        serde_json::Value::String(s) => Unexpected::Str(s),
        serde_json::Value::Array(_) => Unexpected::Seq,
        serde_json::Value::Object(_) => Unexpected::Map,
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Err(D::Error::invalid_type(unexpected(&value), &"an element object"));
        }

        let known = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .and_then(ElementKind::from_tag)
            .is_some();

        if !known {
            log::debug!("Keeping element of unknown type: {:?}", value.get("type"));
            return Ok(Element::Unknown(value));
        }

        let tagged = Tagged::deserialize(value).map_err(D::Error::custom)?;
        Ok(match tagged {
            Tagged::Rectangle(r) => Element::Rectangle(r),
            Tagged::Text(t) => Element::Text(t),
            Tagged::Freedraw(f) => Element::Freedraw(f),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rectangle_wire_shape() {
        let mut element = Element::rectangle(Point::new(50.0, 50.0), ElementStyle::default());
        if let Some(rect) = element.as_rectangle_mut() {
            rect.set_extent(100.0, 70.0);
        }

        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "rectangle",
                "x": 50.0,
                "y": 50.0,
                "width": 100.0,
                "height": 70.0,
                "strokeColor": "#000000",
                "strokeWidth": 2.0,
                "color": "#000000",
            })
        );
    }

    #[test]
    fn test_freedraw_points_are_pairs() {
        let mut element = Element::freedraw(Point::new(0.0, 0.0), ElementStyle::default());
        element.as_freedraw_mut().unwrap().push_point(Point::new(5.0, 5.0));

        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["type"], "freedraw");
        assert_eq!(value["points"], json!([[0.0, 0.0], [5.0, 5.0]]));
    }

    #[test]
    fn test_text_wire_shape() {
        let element = Element::text(Point::new(10.0, 10.0), "A", ElementStyle::default()).unwrap();
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["text"], "A");
        assert!(value.get("points").is_none());
        assert!(value.get("width").is_none());
    }

    #[test]
    fn test_legacy_element_without_color() {
        let element: Element = serde_json::from_value(json!({
            "type": "rectangle",
            "x": 1,
            "y": 2,
            "width": 3,
            "height": -4,
            "strokeColor": "#ff0000",
            "strokeWidth": 2
        }))
        .unwrap();

        let rect = element.as_rectangle().unwrap();
        assert_eq!(rect.style.color, None);
        assert!((rect.height + 4.0).abs() < f64::EPSILON);
        assert_eq!(rect.style.render_color_str(), "#ff0000");
    }

    #[test]
    fn test_missing_style_fields_use_defaults() {
        let element: Element = serde_json::from_value(json!({
            "type": "text",
            "x": 0,
            "y": 0,
            "text": "note"
        }))
        .unwrap();

        let style = element.style().unwrap();
        assert_eq!(style.stroke_color, DEFAULT_STROKE_COLOR);
        assert!((style.stroke_width - DEFAULT_STROKE_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let raw = json!({ "type": "ellipse", "x": 1, "y": 2, "rx": 3 });
        let element: Element = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(element.kind(), None);
        assert_eq!(serde_json::to_value(&element).unwrap(), raw);
    }

    #[test]
    fn test_non_object_is_rejected() {
        for raw in [json!(5), json!("rectangle"), json!(null), json!([1, 2])] {
            assert!(serde_json::from_value::<Element>(raw).is_err());
        }
    }

    #[test]
    fn test_malformed_known_type_is_rejected() {
        let result: Result<Element, _> = serde_json::from_value(json!({
            "type": "freedraw",
            "x": "left",
            "y": 0
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_tags() {
        for kind in [ElementKind::Rectangle, ElementKind::Text, ElementKind::Freedraw] {
            assert_eq!(ElementKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ElementKind::from_tag("eraser"), None);
    }
}
