//! CSS rendering of shadow layers

use crate::{hex_to_rgba, offset_from_polar, ShadowLayer};

/// Render one layer as `Xpx Ypx Bpx Spx rgba(...)`
pub fn layer_css(layer: &ShadowLayer) -> String {
    let offset = offset_from_polar(layer.angle, layer.distance);
    format!(
        "{}px {}px {}px {}px {}",
        offset.x,
        offset.y,
        layer.blur,
        layer.spread,
        hex_to_rgba(&layer.color, layer.opacity)
    )
}

/// The `box-shadow` value for all visible layers, or an empty string
pub fn box_shadow_value<'a>(layers: impl IntoIterator<Item = &'a ShadowLayer>) -> String {
    layers
        .into_iter()
        .filter(|layer| layer.visible)
        .map(layer_css)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A full `box-shadow: ...;` declaration, or an empty string when nothing is visible
pub fn css_declaration<'a>(layers: impl IntoIterator<Item = &'a ShadowLayer>) -> String {
    let value = box_shadow_value(layers);
    if value.is_empty() {
        return String::new();
    }
    format!("box-shadow: {};", value)
}

/// The declaration followed by `-webkit-` and `-moz-` prefixed copies
pub fn css_with_vendor_prefixes<'a>(layers: impl IntoIterator<Item = &'a ShadowLayer>) -> String {
    let base = css_declaration(layers);
    if base.is_empty() {
        return base;
    }
    format!("{base}\n-webkit-{base}\n-moz-{base}")
}
