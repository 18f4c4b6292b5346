//! Verbose record format
//!
//! Older links carried the layers with full field names:
//! `{"shadows":[{"id":1,"visible":true,"angle":90,...}],"background":{...}}`.
//! Stored ids and x/y are ignored.

use super::{DecodeOutcome, Payload, PayloadDecoder};
use serde::Deserialize;
use shadow_model::{normalize_hex, round_half_up, Background, LayerId, LayerTemplate, ShadowLayer};

#[derive(Debug, Deserialize)]
struct VerboseRecord {
    shadows: Vec<VerboseLayer>,
    #[serde(default)]
    background: Option<VerboseBackground>,
}

#[derive(Debug, Deserialize)]
struct VerboseLayer {
    angle: f64,
    distance: f64,
    blur: f64,
    spread: f64,
    color: String,
    opacity: f64,
}

#[derive(Debug, Deserialize)]
struct VerboseBackground {
    color: String,
    opacity: f64,
}

fn whole(value: f64, field: &str) -> Result<i64, String> {
    if value.is_finite() {
        Ok(round_half_up(value) as i64)
    } else {
        Err(format!("{} is not a number", field))
    }
}

fn non_negative(value: f64, field: &str) -> Result<u32, String> {
    u32::try_from(whole(value, field)?).map_err(|_| format!("{} must not be negative", field))
}

fn percent(value: f64) -> Result<u8, String> {
    match whole(value, "opacity")? {
        v @ 0..=100 => Ok(v as u8),
        v => Err(format!("opacity {} is out of range", v)),
    }
}

fn color(value: &str) -> Result<String, String> {
    normalize_hex(value).map_err(|e| e.to_string())
}

/// Reads [`VerboseRecord`] payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct VerboseDecoder;

impl VerboseDecoder {
    fn convert(record: VerboseRecord) -> Result<DecodeOutcome, String> {
        if record.shadows.is_empty() {
            return Err("payload contains no shadows".to_string());
        }

        let mut shadows = Vec::with_capacity(record.shadows.len());
        for layer in record.shadows {
            let angle = i32::try_from(whole(layer.angle, "angle")?.rem_euclid(360))
                .map_err(|e| e.to_string())?;
            let spread = i32::try_from(whole(layer.spread, "spread")?).map_err(|e| e.to_string())?;
            let template = LayerTemplate {
                visible: true,
                angle,
                distance: non_negative(layer.distance, "distance")?,
                blur: non_negative(layer.blur, "blur")?,
                spread,
                color: color(&layer.color)?,
                opacity: percent(layer.opacity)?,
            };
            shadows.push(template.into_layer(LayerId::new(0)));
        }

        let background = match record.background {
            Some(bg) => Some(Background::new(color(&bg.color)?, percent(bg.opacity)?)),
            None => None,
        };

        Ok(DecodeOutcome::Decoded { shadows, background })
    }
}

impl PayloadDecoder for VerboseDecoder {
    fn format(&self) -> &'static str {
        "verbose"
    }

    fn decode(&self, payload: &Payload<'_>) -> DecodeOutcome {
        let Some(text) = payload.text else {
            return DecodeOutcome::NotMine;
        };

        let value = match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) if value.get("shadows").is_some() => value,
            _ => return DecodeOutcome::NotMine,
        };

        match serde_json::from_value::<VerboseRecord>(value) {
            Ok(record) => Self::convert(record).unwrap_or_else(DecodeOutcome::Invalid),
            Err(e) => DecodeOutcome::Invalid(e.to_string()),
        }
    }
}
