//! Error types for editing operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Codec(#[from] shadow_store::CodecError),

    #[error(transparent)]
    Model(#[from] shadow_model::ModelError),
}

pub type Result<T> = std::result::Result<T, EditError>;

/// Errors reported by a [`crate::Clipboard`]
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable")]
    Unavailable,

    #[error("Clipboard write denied: {0}")]
    Denied(String),
}
