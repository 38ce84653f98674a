//! Canvas style strings.

use inkmark_core::Rgba8;
use peniko::Color;

/// `rgba(r, g, b, a)` for a canvas fill or stroke style.
pub fn css_color(color: Color) -> String {
    let Rgba8 { r, g, b, a } = Rgba8::from(color);
    if a == 255 {
        return format!("rgb({}, {}, {})", r, g, b);
    }
    let alpha = (a as f64 / 255.0 * 1000.0).round() / 1000.0;
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_color() {
        assert_eq!(css_color(Color::from_rgba8(255, 0, 16, 255)), "rgb(255, 0, 16)");
    }

    #[test]
    fn test_translucent_color() {
        assert_eq!(css_color(Color::from_rgba8(0, 0, 0, 0)), "rgba(0, 0, 0, 0)");
        assert_eq!(css_color(Color::from_rgba8(1, 2, 3, 128)), "rgba(1, 2, 3, 0.502)");
    }
}
