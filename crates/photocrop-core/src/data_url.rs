//! Base64 data URI formatting and parsing.
//!
//! Both directions are pure functions over byte slices; the exported data
//! URI is always derived from the exact blob bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::decode::DecodeError;

/// Format `bytes` as a `data:<mime>;base64,...` URI.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    let mut url = String::with_capacity(mime.len() + encoded.len() + 13);
    url.push_str("data:");
    url.push_str(mime);
    url.push_str(";base64,");
    url.push_str(&encoded);
    url
}

/// Split a base64 data URI into its media type and decoded payload.
///
/// Parameters between the media type and `;base64` (e.g. `charset=`) are
/// ignored. A missing media type defaults to `text/plain` per RFC 2397.
///
/// # Errors
///
/// Returns `DecodeError::InvalidSource` for anything that is not a base64
/// data URI.
pub fn parse_data_url(url: &str) -> Result<(String, Vec<u8>), DecodeError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| DecodeError::InvalidSource("missing data: scheme".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidSource("data URI has no payload".to_string()))?;

    let mut params = header.split(';');
    let mime = match params.next() {
        Some(m) if !m.is_empty() => m.to_ascii_lowercase(),
        _ => "text/plain".to_string(),
    };
    if !params.any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(DecodeError::InvalidSource(
            "only base64 data URIs are supported".to_string(),
        ));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| DecodeError::InvalidSource(format!("bad base64 payload: {e}")))?;

    Ok((mime, bytes))
}
