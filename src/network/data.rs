//! data: URL payload decoding

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::utils::error::NetworkError;

/// Decode a `data:` URL payload (everything after the `data:` prefix).
///
/// The segment before the first comma is the media type; a `;base64`
/// marker there selects base64 decoding, otherwise the data segment is
/// percent-decoded.
pub fn decode_data_payload(payload: &str) -> Result<Vec<u8>, NetworkError> {
    let (meta, data) = payload
        .split_once(',')
        .ok_or_else(|| NetworkError::InvalidDataUrl("missing comma separator".to_string()))?;
    if meta.contains(";base64") {
        STANDARD
            .decode(data)
            .map_err(|e| NetworkError::InvalidDataUrl(e.to_string()))
    } else {
        percent_decode(data)
    }
}

/// Decode `%XX` escapes; all other bytes pass through unchanged.
///
/// A `%` must be followed by two hex digits (either case) or decoding
/// fails at that byte offset.
pub fn percent_decode(input: &str) -> Result<Vec<u8>, NetworkError> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len() {
                return Err(NetworkError::InvalidPercentEncoding(i));
            }
            let high =
                hex_digit(bytes[i + 1]).ok_or(NetworkError::InvalidPercentEncoding(i))?;
            let low = hex_digit(bytes[i + 2]).ok_or(NetworkError::InvalidPercentEncoding(i))?;
            decoded.push((high << 4) | low);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    Ok(decoded)
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
