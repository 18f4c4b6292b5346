//! Query string handling
//!
//! The current format travels as `?s=<payload>`. Legacy links put a CSS value
//! under `css=`/`shadow=`, or used the whole query as the value.

use super::{DecodedDocument, ShadowCodec};
use crate::CodecError;

/// Query parameter carrying the encoded document
pub const SHADOW_PARAM: &str = "s";

/// Query parameters older links used for a literal CSS value
pub const LEGACY_CSS_PARAMS: [&str; 3] = ["css", "shadow", "box-shadow"];

/// Build the query string (without `?`) for an encoded document.
///
/// An empty payload yields an empty query.
pub fn to_query(encoded: &str) -> String {
    if encoded.is_empty() {
        String::new()
    } else {
        format!("{}={}", SHADOW_PARAM, encoded)
    }
}

/// Form-decode a query component: `+` is a space, then percent escapes
fn form_decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

fn params(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            Some((form_decode(name), form_decode(value)))
        })
        .collect()
}

/// Decode whatever document a query string carries
pub fn decode_query(codec: &ShadowCodec, query: &str) -> Result<DecodedDocument, CodecError> {
    let query = query.trim().trim_start_matches('?');
    if query.is_empty() {
        return Err(CodecError::Empty);
    }

    let params = params(query);
    let find = |name: &str| params.iter().find(|(key, _)| key == name).map(|(_, value)| value);

    if let Some(value) = find(SHADOW_PARAM) {
        return codec.decode(value);
    }
    if let Some(value) = LEGACY_CSS_PARAMS.iter().find_map(|name| find(name)) {
        tracing::debug!("Reading legacy CSS shadow parameter");
        return codec.decode(value);
    }
    if !query.contains('=') {
        return codec.decode(&form_decode(query));
    }

    Err(CodecError::Empty)
}
