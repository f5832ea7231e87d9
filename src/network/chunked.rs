//! Chunked transfer-encoding decoder

use crate::utils::error::NetworkError;

/// Re-assemble a chunked body into contiguous bytes.
///
/// Each chunk is a hexadecimal size token terminated by CRLF, followed by
/// exactly that many data bytes and another CRLF. A zero-size chunk ends
/// the body; trailers after it are ignored.
pub fn decode_chunked(body: &[u8]) -> Result<Vec<u8>, NetworkError> {
    let mut decoded = Vec::new();
    let mut i = 0;
    while i < body.len() {
        let mut j = i;
        while j < body.len() && body[j] != b'\r' {
            j += 1;
        }
        if j + 1 >= body.len() || body[j] != b'\r' || body[j + 1] != b'\n' {
            return Err(NetworkError::ChunkedDecode(
                "missing size delimiter".to_string(),
            ));
        }
        let size_token = std::str::from_utf8(&body[i..j])
            .map_err(|_| NetworkError::ChunkedDecode("size token is not text".to_string()))?;
        let size = usize::from_str_radix(size_token, 16).map_err(|_| {
            NetworkError::ChunkedDecode(format!("invalid chunk size {size_token:?}"))
        })?;
        if size == 0 {
            break;
        }
        i = j + 2;
        if i + size > body.len() {
            return Err(NetworkError::ChunkedDecode(
                "chunk size exceeds remaining data".to_string(),
            ));
        }
        decoded.extend_from_slice(&body[i..i + size]);
        i += size;
        if i + 1 >= body.len() || body[i] != b'\r' || body[i + 1] != b'\n' {
            return Err(NetworkError::ChunkedDecode(
                "missing delimiter after chunk data".to_string(),
            ));
        }
        i += 2;
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_two_chunks() {
        let body = b"7\r\nMozilla\r\n9\r\nDeveloper\r\n0\r\n\r\n";
        assert_eq!(decode_chunked(body).unwrap(), b"MozillaDeveloper");
    }

    #[test]
    fn test_decode_single_chunk() {
        let body = b"5\r\nhello\r\n0\r\n\r\n";
        assert_eq!(decode_chunked(body).unwrap(), b"hello");
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(decode_chunked(b"").unwrap(), b"");
    }

    #[test]
    fn test_zero_chunk_ignores_trailers() {
        let body = b"2\r\nok\r\n0\r\nExpires: 0\r\n\r\n";
        assert_eq!(decode_chunked(body).unwrap(), b"ok");
    }

    #[test]
    fn test_missing_size_delimiter() {
        let err = decode_chunked(b"5hello").unwrap_err();
        assert!(matches!(err, NetworkError::ChunkedDecode(_)));
    }

    #[test]
    fn test_invalid_size_token() {
        let err = decode_chunked(b"xyz\r\ndata\r\n").unwrap_err();
        assert!(matches!(err, NetworkError::ChunkedDecode(_)));
    }

    #[test]
    fn test_size_exceeds_remaining_data() {
        let err = decode_chunked(b"ff\r\nshort\r\n").unwrap_err();
        assert!(matches!(err, NetworkError::ChunkedDecode(_)));
    }

    #[test]
    fn test_missing_delimiter_after_data() {
        let err = decode_chunked(b"5\r\nhelloXX0\r\n\r\n").unwrap_err();
        assert!(matches!(err, NetworkError::ChunkedDecode(_)));
    }
}
