//! Shareable document encoding
//!
//! A document is written as a compact JSON record, deflated, and base64
//! encoded with the URL-safe alphabet and no padding. Reading goes through an
//! ordered list of [`PayloadDecoder`]s so links produced by older versions keep
//! working:
//!
//! 1. [`CompactDecoder`]: the current compact record
//! 2. [`VerboseDecoder`]: full field names, from before compaction
//! 3. [`CssStringDecoder`]: a literal `box-shadow` value
//!
//! The first decoder that recognises the payload decides the outcome.

mod envelope;
mod compact;
mod verbose;
mod css_string;
mod query;

pub use compact::CompactDecoder;
pub use css_string::CssStringDecoder;
pub use envelope::{unwrap_payload, wrap_payload};
pub use query::{decode_query, to_query, LEGACY_CSS_PARAMS, SHADOW_PARAM};
pub use verbose::VerboseDecoder;

use crate::CodecError;
use shadow_model::{Background, LayerId, ShadowLayer};

/// Decoded document content. Ids are fresh and every layer is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDocument {
    pub shadows: Vec<ShadowLayer>,
    pub background: Background,
}

/// An encoded string prepared for the decoders
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    /// The string exactly as received
    pub literal: &'a str,
    /// Text recovered from base64 (inflated when compressed), if any
    pub text: Option<&'a str>,
}

/// What a decoder made of a payload
#[derive(Debug)]
pub enum DecodeOutcome {
    /// Not this decoder's format; try the next one
    NotMine,
    /// This decoder's format, decoded. Ids are assigned by the codec.
    Decoded {
        shadows: Vec<ShadowLayer>,
        background: Option<Background>,
    },
    /// This decoder's format, but the content is unusable
    Invalid(String),
}

/// One wire format the codec can read
pub trait PayloadDecoder: Send + Sync {
    /// Short name used in logs and error messages
    fn format(&self) -> &'static str;

    /// Attempt to decode the payload
    fn decode(&self, payload: &Payload<'_>) -> DecodeOutcome;
}

/// Encoder plus the ordered decoder cascade
pub struct ShadowCodec {
    decoders: Vec<Box<dyn PayloadDecoder>>,
}

impl ShadowCodec {
    /// A codec reading every known format
    pub fn new() -> Self {
        Self {
            decoders: vec![
                Box::new(CompactDecoder),
                Box::new(VerboseDecoder),
                Box::new(CssStringDecoder),
            ],
        }
    }

    /// A codec with an explicit decoder order
    pub fn with_decoders(decoders: Vec<Box<dyn PayloadDecoder>>) -> Self {
        Self { decoders }
    }

    /// Append a decoder, tried after the existing ones
    pub fn push_decoder(&mut self, decoder: Box<dyn PayloadDecoder>) {
        self.decoders.push(decoder);
    }

    /// Names of the decoders in the order they are tried
    pub fn formats(&self) -> Vec<&'static str> {
        self.decoders.iter().map(|d| d.format()).collect()
    }

    /// Encode the visible layers and background.
    ///
    /// Returns an empty string when no layer is visible.
    pub fn encode(&self, shadows: &[ShadowLayer], background: &Background) -> Result<String, CodecError> {
        let record = compact::CompactRecord::from_layers(shadows, background);
        if record.is_empty() {
            return Ok(String::new());
        }
        let json = serde_json::to_string(&record)?;
        Ok(wrap_payload(json.as_bytes())?)
    }

    /// Decode a string produced by [`ShadowCodec::encode`] or any older format
    pub fn decode(&self, encoded: &str) -> Result<DecodedDocument, CodecError> {
        let literal = encoded.trim();
        if literal.is_empty() {
            return Err(CodecError::Empty);
        }

        let text = unwrap_payload(literal);
        let payload = Payload {
            literal,
            text: text.as_deref(),
        };

        for decoder in &self.decoders {
            match decoder.decode(&payload) {
                DecodeOutcome::NotMine => continue,
                DecodeOutcome::Decoded { shadows, background } => {
                    tracing::debug!("Decoded {} shadows as {}", shadows.len(), decoder.format());
                    return Ok(finish(shadows, background));
                }
                DecodeOutcome::Invalid(reason) => {
                    return Err(CodecError::InvalidPayload {
                        format: decoder.format(),
                        reason,
                    });
                }
            }
        }

        Err(CodecError::UnrecognizedFormat)
    }
}

impl Default for ShadowCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Assign fresh ids from 1 and force visibility
fn finish(mut shadows: Vec<ShadowLayer>, background: Option<Background>) -> DecodedDocument {
    for (index, layer) in shadows.iter_mut().enumerate() {
        layer.id = LayerId::new(index as u32 + 1);
        layer.visible = true;
    }
    DecodedDocument {
        shadows,
        background: background.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shadow_model::{LayerTemplate, ShadowDocument};

    fn sample_document() -> ShadowDocument {
        let mut document = ShadowDocument::default();
        let mut second = LayerTemplate::default();
        second.angle = 200;
        second.distance = 14;
        second.blur = 30;
        second.spread = -4;
        second.color = "#3366ff".to_string();
        second.opacity = 45;
        document.push_template(second);

        let mut hidden = LayerTemplate::default();
        hidden.visible = false;
        hidden.color = "#ff0000".to_string();
        document.push_template(hidden);

        document.background = Background::new("#112233", 50);
        document
    }

    #[test]
    fn test_round_trip_keeps_visible_layers() {
        let codec = ShadowCodec::new();
        let document = sample_document();
        let encoded = codec.encode(&document.shadows, &document.background).unwrap();
        let decoded = codec.decode(&encoded).unwrap();

        assert_eq!(decoded.shadows.len(), 2);
        assert_eq!(decoded.background, Background::new("#112233", 50));
        for (decoded, original) in decoded.shadows.iter().zip(document.visible_layers()) {
            assert_eq!(decoded.to_template(), original.to_template());
        }
        let ids: Vec<u32> = decoded.shadows.iter().map(|l| l.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_encoding_is_url_safe() {
        let codec = ShadowCodec::new();
        let document = sample_document();
        let encoded = codec.encode(&document.shadows, &document.background).unwrap();
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_no_visible_layers_encodes_empty() {
        let codec = ShadowCodec::new();
        let mut document = ShadowDocument::default();
        document.shadows[0].visible = false;
        assert_eq!(codec.encode(&document.shadows, &document.background).unwrap(), "");
        assert_eq!(codec.encode(&[], &document.background).unwrap(), "");
    }

    #[test]
    fn test_encoding_beats_plain_json() {
        let codec = ShadowCodec::new();
        let document = sample_document();
        let encoded = codec.encode(&document.shadows, &document.background).unwrap();
        let plain = serde_json::to_string(&document).unwrap();
        assert!(encoded.len() < plain.len());
    }

    #[test]
    fn test_empty_input_reports_no_data() {
        let err = ShadowCodec::new().decode("").unwrap_err();
        assert!(matches!(err, CodecError::Empty));
        assert_eq!(err.to_string(), "No shadow data found in URL");
    }

    #[test]
    fn test_garbage_input_reports_error() {
        let codec = ShadowCodec::new();
        for input in ["hello world", "abcd", "%%%", "eNo", "[1,2,3]"] {
            let err = codec.decode(input).unwrap_err();
            assert!(!err.to_string().is_empty(), "input {input:?}");
        }
    }

    #[test]
    fn test_decoder_order() {
        assert_eq!(ShadowCodec::new().formats(), vec!["compact", "verbose", "css"]);
    }

    struct Rejecting;

    impl PayloadDecoder for Rejecting {
        fn format(&self) -> &'static str {
            "rejecting"
        }

        fn decode(&self, _payload: &Payload<'_>) -> DecodeOutcome {
            DecodeOutcome::Invalid("never valid".to_string())
        }
    }

    #[test]
    fn test_invalid_outcome_stops_the_cascade() {
        let codec = ShadowCodec::with_decoders(vec![Box::new(Rejecting), Box::new(CssStringDecoder)]);
        let err = codec.decode("0px 8px 6px 3px rgba(0,0,0,0.2)").unwrap_err();
        assert_eq!(err.to_string(), "Invalid rejecting shadow data: never valid");
    }

    fn arb_template() -> impl Strategy<Value = LayerTemplate> {
        (0i32..360, 0u32..200, 0u32..200, -100i32..100, 0u32..0x1000000, 0u8..=100).prop_map(
            |(angle, distance, blur, spread, rgb, opacity)| LayerTemplate {
                visible: true,
                angle,
                distance,
                blur,
                spread,
                color: format!("#{:06x}", rgb),
                opacity,
            },
        )
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(
            templates in prop::collection::vec(arb_template(), 1..8),
            bg_rgb in 0u32..0x1000000,
            bg_opacity in 0u8..=100,
        ) {
            let mut document = ShadowDocument::empty();
            document.replace_layers(templates.clone());
            document.background = Background::new(format!("#{:06x}", bg_rgb), bg_opacity);

            let codec = ShadowCodec::new();
            let encoded = codec.encode(&document.shadows, &document.background).unwrap();
            let decoded = codec.decode(&encoded).unwrap();

            let round_tripped: Vec<LayerTemplate> =
                decoded.shadows.iter().map(|l| l.to_template()).collect();
            prop_assert_eq!(round_tripped, templates);
            prop_assert_eq!(decoded.background, document.background);
        }
    }
}
