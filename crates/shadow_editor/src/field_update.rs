//! Typed single-field edits on a shadow layer

use serde::{Deserialize, Serialize};
use shadow_model::{normalize_angle, normalize_hex, ShadowLayer};

/// One field edit. Angle and distance travel together because both feed the
/// x/y projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    Offset { angle: i32, distance: u32 },
    Blur(u32),
    Spread(i32),
    Color(String),
    Opacity(u8),
}

impl FieldUpdate {
    /// Apply the edit, recomputing x/y for offset changes.
    ///
    /// Colors are normalized to `#rrggbb`; opacity is capped at 100.
    pub fn apply(&self, layer: &mut ShadowLayer) -> shadow_model::Result<()> {
        match self {
            FieldUpdate::Offset { angle, distance } => {
                layer.set_offset(normalize_angle(*angle), *distance);
            }
            FieldUpdate::Blur(blur) => layer.blur = *blur,
            FieldUpdate::Spread(spread) => layer.spread = *spread,
            FieldUpdate::Color(color) => layer.color = normalize_hex(color)?,
            FieldUpdate::Opacity(opacity) => layer.opacity = (*opacity).min(100),
        }
        Ok(())
    }

    /// Field name for logs
    pub fn name(&self) -> &'static str {
        match self {
            FieldUpdate::Offset { .. } => "offset",
            FieldUpdate::Blur(_) => "blur",
            FieldUpdate::Spread(_) => "spread",
            FieldUpdate::Color(_) => "color",
            FieldUpdate::Opacity(_) => "opacity",
        }
    }
}
