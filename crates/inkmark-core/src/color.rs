//! CSS color strings as stored on elements, and their RGBA form.

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a CSS color string.
    ///
    /// Anything CSS accepts (hex, named colors, `rgb()`, `hsl()`, ...) is
    /// understood. Unparseable strings fall back to black, which is what a
    /// canvas does with a stroke style it cannot parse on a fresh context.
    pub fn parse(color: &str) -> Self {
        Self::try_parse(color).unwrap_or_else(|| {
            log::debug!("Unrecognized color {:?}, using black", color);
            Self::black()
        })
    }

    /// Parse a CSS color string, returning `None` when it is not understood.
    pub fn try_parse(color: &str) -> Option<Self> {
        let parsed = parse_color(color).ok()?;
        Some(parsed.to_alpha_color::<Srgb>().into())
    }

    /// Format as a `#rrggbb` (or `#rrggbbaa` when not opaque) string.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for Rgba8 {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba8> for Color {
    fn from(color: Rgba8) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Rgba8::parse("#000000"), Rgba8::black());
        assert_eq!(Rgba8::parse("#fff"), Rgba8::white());
        assert_eq!(Rgba8::parse("#ff000080"), Rgba8::new(255, 0, 0, 128));
        assert_eq!(Rgba8::parse("#1E90FF"), Rgba8::new(30, 144, 255, 255));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Rgba8::parse("white"), Rgba8::white());
        assert_eq!(Rgba8::parse("Transparent"), Rgba8::transparent());
        assert_eq!(Rgba8::parse("red"), Rgba8::new(255, 0, 0, 255));
        assert_eq!(Rgba8::parse("orange"), Rgba8::new(255, 165, 0, 255));
        assert_eq!(Rgba8::parse("RebeccaPurple"), Rgba8::new(102, 51, 153, 255));
    }

    #[test]
    fn test_parse_functional_forms() {
        assert_eq!(Rgba8::parse("rgb(255, 165, 0)"), Rgba8::new(255, 165, 0, 255));
        assert_eq!(Rgba8::parse("rgba(0, 0, 255, 0.4)"), Rgba8::new(0, 0, 255, 102));
        assert_eq!(Rgba8::parse("hsl(0, 100%, 50%)"), Rgba8::new(255, 0, 0, 255));
    }

    #[test]
    fn test_unparseable_falls_back_to_black() {
        assert_eq!(Rgba8::try_parse("#12"), None);
        assert_eq!(Rgba8::try_parse("#zzzzzz"), None);
        assert_eq!(Rgba8::parse("chartreuse-ish"), Rgba8::black());
    }

    #[test]
    fn test_hex_round_trip() {
        let color = Rgba8::new(18, 52, 86, 255);
        assert_eq!(color.to_hex(), "#123456");
        assert_eq!(Rgba8::parse(&color.to_hex()), color);
        assert_eq!(Rgba8::new(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn test_peniko_conversion() {
        let color: Color = Rgba8::new(10, 20, 30, 255).into();
        assert_eq!(Rgba8::from(color), Rgba8::new(10, 20, 30, 255));
    }
}
