//! Reversible obfuscation for persisted payloads
//!
//! This is base64 over UTF-8 text. It keeps casual readers from editing the
//! stored JSON by hand and offers no confidentiality at all.

use crate::{KeyValueStore, Result, StoreError};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Obfuscate text for storage
pub fn obfuscate(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Reverse [`obfuscate`]
pub fn reveal(encoded: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| StoreError::Obfuscation(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| StoreError::Obfuscation(e.to_string()))
}

/// Serialize a value to JSON and store it obfuscated
pub fn save_obfuscated<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &obfuscate(&json))
}

/// Parse a stored value, accepting both the obfuscated form and plain JSON
/// written before obfuscation was introduced
pub fn parse_stored<T: DeserializeOwned>(raw: &str) -> Result<T> {
    match reveal(raw) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(value) => return Ok(value),
            Err(e) => tracing::debug!("Revealed payload is not valid JSON, trying plain text: {}", e),
        },
        Err(e) => tracing::debug!("Stored payload is not obfuscated, trying plain text: {}", e),
    }
    Ok(serde_json::from_str(raw)?)
}

/// Load a value stored by [`save_obfuscated`].
///
/// Missing keys, unreadable storage and corrupt payloads all yield `None`.
pub fn load_obfuscated<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read {} from storage: {}", key, e);
            return None;
        }
    };

    match parse_stored(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Discarding unreadable {} payload: {}", key, e);
            None
        }
    }
}
