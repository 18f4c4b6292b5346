//! Error types for shadow model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
