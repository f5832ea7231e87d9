//! URL parsing
//!
//! Recognizes `http`, `https`, `file` and `data` URLs plus the
//! `view-source:` wrapper. The grammar is intentionally small: split on the
//! first `://`, then split the remainder on the first `/`. An explicit
//! `host:port` stays inside `host` and takes precedence over the scheme
//! default when the engine picks a dial address.

use std::fmt;

use crate::utils::error::NetworkError;

const VIEW_SOURCE_PREFIX: &str = "view-source:";
const DATA_PREFIX: &str = "data:";

/// URL schemes understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
    File,
    Data,
}

impl Scheme {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            "file" => Some(Self::File),
            "data" => Some(Self::Data),
            _ => None,
        }
    }

    /// Default port, for the schemes that have one
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Http => Some(80),
            Self::Https => Some(443),
            Self::File | Self::Data => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::File => "file",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed URL
///
/// For `data:` URLs the whole payload after the prefix lives in `path`.
/// `redirect_count` is bumped once per redirect hop and `view_source`
/// survives both parsing and redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    scheme: Scheme,
    host: String,
    port: Option<u16>,
    path: String,
    redirect_count: u32,
    view_source: bool,
}

impl Url {
    /// Parse a URL string
    pub fn parse(input: &str) -> Result<Self, NetworkError> {
        if let Some(rest) = input.strip_prefix(VIEW_SOURCE_PREFIX) {
            let mut url = Self::parse(rest)?;
            url.view_source = true;
            return Ok(url);
        }

        if let Some(payload) = input.strip_prefix(DATA_PREFIX) {
            return Ok(Self {
                scheme: Scheme::Data,
                host: String::new(),
                port: None,
                path: payload.to_string(),
                redirect_count: 0,
                view_source: false,
            });
        }

        let (scheme_str, rest) = input
            .split_once("://")
            .ok_or_else(|| NetworkError::InvalidUrlFormat(input.to_string()))?;
        let scheme = Scheme::parse(scheme_str)
            .ok_or_else(|| NetworkError::UnsupportedScheme(scheme_str.to_string()))?;

        let (host, path) = match rest.split_once('/') {
            Some((host, tail)) => (host.to_string(), format!("/{tail}")),
            None => (rest.to_string(), "/".to_string()),
        };

        Ok(Self {
            scheme,
            host,
            port: scheme.default_port(),
            path,
            redirect_count: 0,
            view_source: false,
        })
    }

    /// Build the next-hop URL for a `Location` target.
    ///
    /// Relative targets (leading `/`) are resolved against this URL's
    /// scheme and host. The hop counter carries over incremented and the
    /// view-source flag is propagated.
    pub fn redirect(&self, location: &str) -> Result<Self, NetworkError> {
        let resolved = if location.starts_with('/') {
            format!("{}://{}{}", self.scheme, self.host, location)
        } else {
            location.to_string()
        };
        let mut next = Self::parse(&resolved)?;
        next.redirect_count = self.redirect_count + 1;
        next.view_source = self.view_source;
        Ok(next)
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Host as written, including any explicit `:port`
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Host with any explicit `:port` stripped (TLS server name)
    pub fn host_without_port(&self) -> &str {
        match self.host.split_once(':') {
            Some((name, _)) => name,
            None => &self.host,
        }
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn redirect_count(&self) -> u32 {
        self.redirect_count
    }

    pub fn view_source(&self) -> bool {
        self.view_source
    }

    /// Dial address: the host as written, with the scheme default port
    /// appended when the host does not already carry one
    pub fn host_port(&self) -> String {
        if self.host.contains(':') {
            return self.host.clone();
        }
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

/// Canonical form `scheme://host<path>` without a port. Used as the cache
/// key and as `Response::url`.
impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_http_url() {
        let url = Url::parse("http://example.com/path").unwrap();
        assert_eq!(url.scheme(), Scheme::Http);
        assert_eq!(url.host(), "example.com");
        assert_eq!(url.path(), "/path");
        assert_eq!(url.port(), Some(80));
        assert!(!url.view_source());
    }

    #[test]
    fn test_parse_https_default_port() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(url.port(), Some(443));
        assert_eq!(url.host_port(), "example.com:443");
    }

    #[test]
    fn test_parse_without_path() {
        let url = Url::parse("http://example.com").unwrap();
        assert_eq!(url.path(), "/");
    }

    #[test]
    fn test_parse_explicit_port_stays_in_host() {
        let url = Url::parse("http://localhost:8080/test").unwrap();
        assert_eq!(url.host(), "localhost:8080");
        assert_eq!(url.host_without_port(), "localhost");
        assert_eq!(url.host_port(), "localhost:8080");
    }

    #[test]
    fn test_parse_unsupported_scheme() {
        let err = Url::parse("ftp://example.com/path").unwrap_err();
        assert!(matches!(err, NetworkError::UnsupportedScheme(s) if s == "ftp"));
    }

    #[test]
    fn test_parse_invalid_format() {
        let err = Url::parse("invalid-url").unwrap_err();
        assert!(matches!(err, NetworkError::InvalidUrlFormat(_)));
    }

    #[test]
    fn test_parse_view_source() {
        let url = Url::parse("view-source:http://example.com/src").unwrap();
        assert!(url.view_source());
        assert_eq!(url.scheme(), Scheme::Http);
        assert_eq!(url.path(), "/src");
    }

    #[test]
    fn test_parse_data_url_keeps_payload_opaque() {
        let url = Url::parse("data:text/plain;base64,SGVsbG8=").unwrap();
        assert_eq!(url.scheme(), Scheme::Data);
        assert_eq!(url.host(), "");
        assert_eq!(url.port(), None);
        assert_eq!(url.path(), "text/plain;base64,SGVsbG8=");
    }

    #[test]
    fn test_parse_file_url() {
        let url = Url::parse("file:///etc/hosts").unwrap();
        assert_eq!(url.scheme(), Scheme::File);
        assert_eq!(url.host(), "");
        assert_eq!(url.path(), "/etc/hosts");
    }

    #[test]
    fn test_display_is_canonical() {
        let url = Url::parse("http://example.com/a/b").unwrap();
        assert_eq!(url.to_string(), "http://example.com/a/b");
    }

    #[test]
    fn test_redirect_relative() {
        let url = Url::parse("http://example.com/old").unwrap();
        let next = url.redirect("/new").unwrap();
        assert_eq!(next.to_string(), "http://example.com/new");
        assert_eq!(next.redirect_count(), 1);
    }

    #[test]
    fn test_redirect_absolute() {
        let url = Url::parse("http://example.com/old").unwrap();
        let next = url.redirect("https://other.example/landing").unwrap();
        assert_eq!(next.scheme(), Scheme::Https);
        assert_eq!(next.host(), "other.example");
        assert_eq!(next.redirect_count(), 1);
    }

    #[test]
    fn test_redirect_propagates_view_source() {
        let url = Url::parse("view-source:http://example.com/old").unwrap();
        let next = url.redirect("/new").unwrap();
        assert!(next.view_source());
    }

    #[test]
    fn test_redirect_count_accumulates() {
        let url = Url::parse("http://example.com/a").unwrap();
        let hop = url.redirect("/b").unwrap().redirect("/c").unwrap();
        assert_eq!(hop.redirect_count(), 2);
    }
}
