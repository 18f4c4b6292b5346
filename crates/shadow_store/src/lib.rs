//! Shadow Store - Encoding and persistence
//!
//! This crate turns documents into compact URL-safe strings and back,
//! provides the key/value storage seam standing in for browser local storage,
//! the reversible obfuscation applied to persisted payloads, and the preview
//! card settings kept next to the editor history.

mod error;
mod storage;
mod obfuscate;
mod preview_settings;
pub mod codec;

pub use error::*;
pub use storage::*;
pub use obfuscate::*;
pub use preview_settings::*;

pub use codec::{
    decode_query, to_query, DecodeOutcome, DecodedDocument, Payload, PayloadDecoder,
    ShadowCodec, SHADOW_PARAM,
};
