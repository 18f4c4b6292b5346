//! Color conversion between hex notation and CSS `rgba()`

use crate::{ModelError, Result};
use regex_lite::Regex;
use std::sync::OnceLock;

/// A color parsed out of CSS text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedColor {
    /// Six-digit hex color with a leading `#`
    pub hex: String,
    /// Opacity percentage, `0..=100`
    pub opacity: u8,
}

fn rgba_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(\d*\.?\d+)\s*)?\)$",
            )
            .ok()
        })
        .as_ref()
}

/// Expand `#rgb` to `#rrggbb` and validate. Returns the six digits without `#`.
fn expand_hex(hex: &str) -> Option<String> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => Some(digits.chars().flat_map(|c| [c, c]).collect()),
        6 => Some(digits.to_string()),
        _ => None,
    }
}

/// Normalize a user supplied hex color to `#rrggbb`
pub fn normalize_hex(hex: &str) -> Result<String> {
    expand_hex(hex)
        .map(|digits| format!("#{}", digits))
        .ok_or_else(|| ModelError::InvalidColor(hex.to_string()))
}

/// Render a hex color and opacity percentage as `rgba(r, g, b, a)`.
///
/// Unparseable colors render as black so the alpha is still honoured.
pub fn hex_to_rgba(hex: &str, opacity: u8) -> String {
    let alpha = f64::from(opacity) / 100.0;
    let channels = expand_hex(hex).and_then(|digits| {
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    });

    let (r, g, b) = channels.unwrap_or((0, 0, 0));
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

/// Parse an `rgba()`, `rgb()`, `#rgb` or `#rrggbb` token
pub fn parse_css_color(token: &str) -> Option<ParsedColor> {
    let token = token.trim();

    if token.starts_with('#') {
        return expand_hex(token).map(|digits| ParsedColor {
            hex: format!("#{}", digits.to_ascii_lowercase()),
            opacity: 100,
        });
    }

    let caps = rgba_pattern()?.captures(token)?;
    let mut hex = String::from("#");
    for i in 1..=3 {
        let value: u16 = caps.get(i)?.as_str().parse().ok()?;
        if value > 255 {
            return None;
        }
        hex.push_str(&format!("{:02x}", value));
    }

    let opacity = match caps.get(4) {
        Some(alpha) => {
            let alpha: f64 = alpha.as_str().parse().ok()?;
            (alpha.clamp(0.0, 1.0) * 100.0).round() as u8
        }
        None => 100,
    };

    Some(ParsedColor { hex, opacity })
}

/// Strip the leading `#` for compact encodings
pub fn strip_hash(hex: &str) -> &str {
    hex.strip_prefix('#').unwrap_or(hex)
}

/// Restore the leading `#` after compact decoding
pub fn with_hash(hex: &str) -> String {
    if hex.starts_with('#') {
        hex.to_string()
    } else {
        format!("#{}", hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgba() {
        assert_eq!(hex_to_rgba("#000000", 20), "rgba(0, 0, 0, 0.2)");
        assert_eq!(hex_to_rgba("#ff8000", 100), "rgba(255, 128, 0, 1)");
        assert_eq!(hex_to_rgba("#fff", 5), "rgba(255, 255, 255, 0.05)");
        assert_eq!(hex_to_rgba("112233", 0), "rgba(17, 34, 51, 0)");
    }

    #[test]
    fn test_hex_to_rgba_invalid_falls_back_to_black() {
        assert_eq!(hex_to_rgba("not-a-color", 50), "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_hex("#abc").unwrap(), "#aabbcc");
        assert_eq!(normalize_hex("112233").unwrap(), "#112233");
        assert!(normalize_hex("#12345").is_err());
    }

    #[test]
    fn test_parse_rgba() {
        let parsed = parse_css_color("rgba(0,0,0,0.2)").unwrap();
        assert_eq!(parsed.hex, "#000000");
        assert_eq!(parsed.opacity, 20);

        let parsed = parse_css_color("rgba(255, 16, 1, .14)").unwrap();
        assert_eq!(parsed.hex, "#ff1001");
        assert_eq!(parsed.opacity, 14);
    }

    #[test]
    fn test_parse_rgb_and_hex() {
        assert_eq!(parse_css_color("rgb(1, 2, 3)").unwrap().opacity, 100);
        assert_eq!(parse_css_color("#ABC").unwrap().hex, "#aabbcc");
        assert!(parse_css_color("rgba(300, 0, 0, 1)").is_none());
        assert!(parse_css_color("blue").is_none());
    }

    #[test]
    fn test_hash_helpers() {
        assert_eq!(strip_hash("#112233"), "112233");
        assert_eq!(with_hash("112233"), "#112233");
        assert_eq!(with_hash("#112233"), "#112233");
    }
}
