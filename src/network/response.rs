//! HTTP response types

use std::borrow::Cow;
use std::collections::HashMap;

/// A fully received HTTP response
///
/// The body is already chunk-decoded and truncated to any declared
/// `Content-Length`. Header keys keep the exact case the peer sent;
/// duplicate header lines resolve to the last occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    url: String,
    status_code: u16,
    headers: HashMap<String, String>,
    body: Vec<u8>,
    view_source: bool,
}

impl Response {
    /// Create a new response
    pub fn new(
        url: String,
        status_code: u16,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        view_source: bool,
    ) -> Self {
        Self {
            url,
            status_code,
            headers,
            body,
            view_source,
        }
    }

    /// Canonical string of the URL that produced this response
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the status code
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Check if the response was successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Check if the response is a redirect (3xx)
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    /// Get response headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Get a specific header
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// Raw body bytes
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Whether the request URL carried a `view-source:` prefix
    pub fn view_source(&self) -> bool {
        self.view_source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> Response {
        Response::new(
            "http://example.com/".to_string(),
            status,
            HashMap::new(),
            b"hi".to_vec(),
            false,
        )
    }

    #[test]
    fn test_status_classification() {
        assert!(response(200).is_success());
        assert!(!response(200).is_redirect());
        assert!(response(302).is_redirect());
        assert!(!response(404).is_success());
    }

    #[test]
    fn test_header_lookup() {
        let mut headers = HashMap::new();
        headers.insert("Content-Length".to_string(), "2".to_string());
        let response = Response::new(
            "http://example.com/".to_string(),
            200,
            headers,
            b"hi".to_vec(),
            false,
        );
        assert_eq!(response.header("Content-Length"), Some("2"));
        assert_eq!(response.header("Missing"), None);
        assert_eq!(response.body_text(), "hi");
    }
}
