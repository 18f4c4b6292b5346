//! Literal CSS `box-shadow` values
//!
//! The first version of the editor put the CSS value itself in the query
//! string, e.g. `0px 8px 6px 3px rgba(0,0,0,0.2), 0px 1px 2px #000`. Offsets are
//! authoritative here, so angle and distance are derived from them.

use super::{DecodeOutcome, Payload, PayloadDecoder};
use shadow_model::{parse_css_color, round_half_up, LayerId, ShadowLayer};

/// Split on `separator` outside parentheses
fn split_top_level(input: &str, separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && separator(c) => {
                parts.push(&input[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

/// Strip an optional `box-shadow:` prefix and trailing `;`
fn strip_declaration(input: &str) -> &str {
    let trimmed = input.trim();
    let value = trimmed
        .strip_prefix("box-shadow:")
        .map(str::trim_start)
        .unwrap_or(trimmed);
    value.trim_end_matches(';').trim_end()
}

fn looks_like_css(value: &str) -> bool {
    value.contains("px")
        || value.starts_with("rgb")
        || value.starts_with('#')
        || value.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.')
}

fn parse_length(token: &str) -> Result<i32, String> {
    let number = token.strip_suffix("px").unwrap_or(token);
    let value: f64 = number
        .parse()
        .map_err(|_| format!("'{}' is not a length", token))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a length", token));
    }
    Ok(round_half_up(value) as i32)
}

fn parse_layer(text: &str) -> Result<ShadowLayer, String> {
    let mut lengths = Vec::with_capacity(4);
    let mut color = None;

    for token in split_top_level(text, char::is_whitespace) {
        if token.is_empty() {
            continue;
        }
        if token.eq_ignore_ascii_case("inset") {
            return Err("inset shadows are not supported".to_string());
        }
        if token.starts_with("rgb") || token.starts_with('#') {
            if color.is_some() {
                return Err(format!("more than one color in '{}'", text));
            }
            color = Some(parse_css_color(token).ok_or_else(|| format!("unrecognized color '{}'", token))?);
            continue;
        }
        lengths.push(parse_length(token)?);
    }

    if lengths.len() < 2 || lengths.len() > 4 {
        return Err(format!("expected 2 to 4 lengths in '{}'", text));
    }

    let blur = match lengths.get(2) {
        Some(&blur) => u32::try_from(blur).map_err(|_| "blur must not be negative".to_string())?,
        None => 0,
    };
    let color = color.unwrap_or_else(|| shadow_model::ParsedColor {
        hex: "#000000".to_string(),
        opacity: 100,
    });

    let mut layer = ShadowLayer::with_defaults(LayerId::new(0));
    layer.blur = blur;
    layer.spread = lengths.get(3).copied().unwrap_or(0);
    layer.color = color.hex;
    layer.opacity = color.opacity;
    layer.set_xy(lengths[0], lengths[1]);
    Ok(layer)
}

/// Reads literal CSS `box-shadow` values
#[derive(Debug, Clone, Copy, Default)]
pub struct CssStringDecoder;

impl PayloadDecoder for CssStringDecoder {
    fn format(&self) -> &'static str {
        "css"
    }

    fn decode(&self, payload: &Payload<'_>) -> DecodeOutcome {
        let value = strip_declaration(payload.literal);
        if value.is_empty() || !looks_like_css(value) {
            return DecodeOutcome::NotMine;
        }

        let mut shadows = Vec::new();
        for layer in split_top_level(value, |c| c == ',') {
            match parse_layer(layer.trim()) {
                Ok(layer) => shadows.push(layer),
                Err(reason) => return DecodeOutcome::Invalid(reason),
            }
        }

        DecodeOutcome::Decoded {
            shadows,
            background: None,
        }
    }
}
