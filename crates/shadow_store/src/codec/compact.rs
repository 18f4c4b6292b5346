//! Compact record format
//!
//! `[[[visible, angle, distance, blur, spread, "rrggbb", opacity], ...], ["rrggbb", opacity]]`
//!
//! Positional arrays instead of named fields, `0`/`1` for visibility, colors
//! without `#`. The background pair is optional on read.

use super::{DecodeOutcome, Payload, PayloadDecoder};
use serde::Serialize;
use shadow_model::{normalize_angle, normalize_hex, strip_hash, with_hash, Background, LayerId, LayerTemplate, ShadowLayer};

type CompactLayer = (u8, i32, u32, u32, i32, String, u8);
type CompactBackground = (String, u8);

#[derive(Debug, Serialize)]
pub(crate) struct CompactRecord(Vec<CompactLayer>, Option<CompactBackground>);

impl CompactRecord {
    /// Build the record from visible layers only
    pub(crate) fn from_layers(shadows: &[ShadowLayer], background: &Background) -> Self {
        let layers = shadows
            .iter()
            .filter(|layer| layer.visible)
            .map(|layer| {
                (
                    1,
                    layer.angle,
                    layer.distance,
                    layer.blur,
                    layer.spread,
                    strip_hash(&layer.color).to_string(),
                    layer.opacity,
                )
            })
            .collect();
        Self(
            layers,
            Some((strip_hash(&background.color).to_string(), background.opacity)),
        )
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn check_color(color: &str) -> Result<String, String> {
    normalize_hex(&with_hash(color)).map_err(|e| e.to_string())
}

fn check_opacity(opacity: u8) -> Result<u8, String> {
    if opacity > 100 {
        Err(format!("opacity {} is out of range", opacity))
    } else {
        Ok(opacity)
    }
}

/// Reads [`CompactRecord`] payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactDecoder;

impl CompactDecoder {
    fn parse(items: Vec<serde_json::Value>) -> serde_json::Result<CompactRecord> {
        let mut items = items.into_iter();
        let layers = serde_json::from_value(items.next().unwrap_or_default())?;
        let background = match items.next() {
            Some(serde_json::Value::Null) | None => None,
            Some(value) => Some(serde_json::from_value(value)?),
        };
        Ok(CompactRecord(layers, background))
    }

    fn convert(record: CompactRecord) -> Result<DecodeOutcome, String> {
        if record.0.is_empty() {
            return Err("payload contains no shadows".to_string());
        }

        let mut shadows = Vec::with_capacity(record.0.len());
        for (_visible, angle, distance, blur, spread, color, opacity) in record.0 {
            let template = LayerTemplate {
                visible: true,
                angle: normalize_angle(angle),
                distance,
                blur,
                spread,
                color: check_color(&color)?,
                opacity: check_opacity(opacity)?,
            };
            shadows.push(template.into_layer(LayerId::new(0)));
        }

        let background = match record.1 {
            Some((color, opacity)) => Some(Background::new(check_color(&color)?, check_opacity(opacity)?)),
            None => None,
        };

        Ok(DecodeOutcome::Decoded { shadows, background })
    }
}

impl PayloadDecoder for CompactDecoder {
    fn format(&self) -> &'static str {
        "compact"
    }

    fn decode(&self, payload: &Payload<'_>) -> DecodeOutcome {
        let Some(text) = payload.text else {
            return DecodeOutcome::NotMine;
        };

        // Claim only arrays whose first element is the layer list
        let items = match serde_json::from_str::<serde_json::Value>(text) {
            Ok(serde_json::Value::Array(items)) if items.first().is_some_and(|v| v.is_array()) => items,
            _ => return DecodeOutcome::NotMine,
        };

        match Self::parse(items) {
            Ok(record) => Self::convert(record).unwrap_or_else(DecodeOutcome::Invalid),
            Err(e) => DecodeOutcome::Invalid(e.to_string()),
        }
    }
}
