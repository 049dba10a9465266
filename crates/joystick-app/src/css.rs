//! CSS color strings for the canvas backend.

use peniko::Color;

/// Format a color as a CSS `rgba()` string.
pub fn css_color(color: Color) -> String {
    let c = color.to_rgba8();
    if c.a == u8::MAX {
        format!("rgb({}, {}, {})", c.r, c.g, c.b)
    } else {
        format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, c.a as f64 / 255.0)
    }
}
