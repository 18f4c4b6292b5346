//! Error types for encoding and storage operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Obfuscated payload could not be read: {0}")]
    Obfuscation(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors produced while decoding a shared document
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("No shadow data found in URL")]
    Empty,

    #[error("Unrecognized shadow data format")]
    UnrecognizedFormat,

    #[error("Invalid {format} shadow data: {reason}")]
    InvalidPayload { format: &'static str, reason: String },

    #[error("Compression error: {0}")]
    Compression(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
