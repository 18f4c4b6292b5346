//! Compression and URL-safe base64 around the JSON record

use base64::{engine::general_purpose::STANDARD, Engine};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Deflate at maximum level and base64 encode with `-`/`_` and no padding
pub fn wrap_payload(data: &[u8]) -> std::io::Result<String> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;

    let base64 = STANDARD.encode(compressed);
    Ok(base64
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect())
}

/// Recover the text inside an encoded payload.
///
/// Undoes the URL-safe remap, restores padding and base64 decodes. The bytes
/// are inflated when they hold a zlib stream; otherwise they are taken as the
/// uncompressed text older links carried. Returns `None` when the input is not
/// base64 or the result is not UTF-8.
pub fn unwrap_payload(encoded: &str) -> Option<String> {
    let mut base64: String = encoded
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    while base64.len() % 4 != 0 {
        base64.push('=');
    }

    let bytes = STANDARD.decode(base64.as_bytes()).ok()?;

    let mut inflated = Vec::new();
    match ZlibDecoder::new(bytes.as_slice()).read_to_end(&mut inflated) {
        Ok(_) if !inflated.is_empty() => String::from_utf8(inflated).ok(),
        _ => {
            tracing::debug!("Payload is not compressed, reading it as plain text");
            String::from_utf8(bytes).ok()
        }
    }
}
