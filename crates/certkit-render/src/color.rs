//! Hex color parsing.

use tiny_skia::Color;

/// Parses a CSS-style hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`) into a
/// paint color, folding an object opacity percentage into the alpha channel.
///
/// Returns `None` for the keyword `transparent` and for anything malformed;
/// callers skip the paint rather than guessing a color.
pub fn parse_color(hex: &str, opacity: f64) -> Option<Color> {
    let hex = hex.trim();
    if hex.eq_ignore_ascii_case("transparent") {
        return None;
    }
    let digits = hex.strip_prefix('#')?;

    let (r, g, b, a) = match digits.len() {
        3 => {
            let r = u8::from_str_radix(&digits[0..1], 16).ok()?;
            let g = u8::from_str_radix(&digits[1..2], 16).ok()?;
            let b = u8::from_str_radix(&digits[2..3], 16).ok()?;
            (r * 17, g * 17, b * 17, 255)
        }
        6 => (
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
            255,
        ),
        8 => (
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
            u8::from_str_radix(&digits[6..8], 16).ok()?,
        ),
        _ => return None,
    };

    let opacity = (opacity / 100.0).clamp(0.0, 1.0) as f32;
    let alpha = (a as f32 / 255.0) * opacity;
    Color::from_rgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        alpha,
    )
}
