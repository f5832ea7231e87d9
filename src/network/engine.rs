//! Request engine: cache lookup, connection reuse, wire exchange
//!
//! One engine owns at most one live connection per `host:port` plus a TTL
//! response cache keyed by canonical URL. A single call walks the whole
//! pipeline: cache lookup, connection acquisition, request framing, raw
//! read to end-of-stream, header parsing, redirect or body decode, cache
//! population. The engine is not synchronized; concurrent use requires an
//! external lock.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Read as _, Write as _};

use crate::network::cache::CacheEntry;
use crate::network::chunked::decode_chunked;
use crate::network::data::decode_data_payload;
use crate::network::response::Response;
use crate::network::transport::{Dialer, TcpDialer, Transport};
use crate::network::url::{Scheme, Url};
use crate::utils::Result;
use crate::utils::error::NetworkError;

/// Redirect hops followed before giving up
pub const MAX_REDIRECTS: u32 = 3;

/// Socket read granularity
const READ_BUF_SIZE: usize = 1024;

/// A single request or response header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse a `Key: Value` line; both sides are trimmed. Lines without a
    /// colon yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let (key, value) = line.split_once(':')?;
        Some(Self::new(key.trim(), value.trim()))
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Fetch engine with connection pooling and response caching
pub struct Engine {
    dialer: Box<dyn Dialer>,
    pool: HashMap<String, Box<dyn Transport>>,
    cache: HashMap<String, CacheEntry<Response>>,
}

impl Engine {
    /// Engine dialing real sockets
    pub fn new() -> Self {
        Self::with_dialer(Box::new(TcpDialer::new()))
    }

    /// Engine with a custom dialer; lets tests substitute transports
    pub fn with_dialer(dialer: Box<dyn Dialer>) -> Self {
        Self {
            dialer,
            pool: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    /// Fetch `url`, following redirects and honoring the response cache.
    ///
    /// `overrides` are extra request headers. `Host` is always set from
    /// the URL, and `Connection: close` is added unless the caller
    /// supplies its own `Connection` value. On failure no partial response
    /// is returned and the cache is left unwritten.
    pub fn request(
        &mut self,
        url: &Url,
        overrides: Option<&HashMap<String, String>>,
    ) -> Result<Response> {
        let key = url.to_string();
        match self.cache.get(&key) {
            Some(entry) if !entry.is_expired() => {
                log::debug!("cache hit for {key}");
                return Ok(entry.value().clone());
            }
            Some(_) => {
                log::debug!("evicting expired cache entry for {key}");
                self.cache.remove(&key);
            }
            None => {}
        }

        match url.scheme() {
            Scheme::File => return self.fetch_file(url),
            Scheme::Data => return self.fetch_data(url),
            Scheme::Http | Scheme::Https => {}
        }

        let host_port = url.host_port();
        let mut conn = match self.pool.remove(&host_port) {
            Some(conn) => {
                log::debug!("reusing pooled connection to {host_port}");
                conn
            }
            None if url.scheme() == Scheme::Https => {
                self.dialer.dial_tls(&host_port, url.host_without_port())?
            }
            None => self.dialer.dial(&host_port)?,
        };

        let request = build_request(url, overrides);
        conn.write_all(request.as_bytes())
            .map_err(NetworkError::Write)?;
        conn.flush().map_err(NetworkError::Write)?;

        let raw = read_raw(conn.as_mut())?;
        let (status_code, headers, mut body) = parse_response(&raw)?;

        if (300..400).contains(&status_code) {
            if let Some(location) = headers.get("Location") {
                log::debug!("redirect {status_code} to {location}");
                let next = url.redirect(location)?;
                if next.redirect_count() > MAX_REDIRECTS {
                    return Err(NetworkError::MaxRedirectsExceeded.into());
                }
                return self.request(&next, overrides);
            }
        }

        // Trailing bytes past a declared Content-Length are dropped; a
        // short body is never padded.
        if let Some(cl) = headers
            .get("Content-Length")
            .and_then(|v| v.parse::<usize>().ok())
        {
            if body.len() > cl {
                body.truncate(cl);
            }
        }

        match headers.get("Connection") {
            Some(value) if value.eq_ignore_ascii_case("keep-alive") => {
                log::debug!("pooling connection to {host_port}");
                self.pool.insert(host_port, conn);
            }
            // `close`, any other value, or no header at all: drop the
            // socket. Absent means close here, not the HTTP/1.1 default.
            _ => drop(conn),
        }

        if headers
            .get("Transfer-Encoding")
            .is_some_and(|v| v.eq_ignore_ascii_case("chunked"))
        {
            log::debug!("decoding chunked body ({} raw bytes)", body.len());
            body = decode_chunked(&body)?;
        }

        let response = Response::new(key.clone(), status_code, headers, body, url.view_source());
        self.cache_populate(&key, &response);
        Ok(response)
    }

    /// file: short-circuit — serve bytes straight from local storage
    fn fetch_file(&self, url: &Url) -> Result<Response> {
        let body = fs::read(url.path()).map_err(|source| NetworkError::FileRead {
            path: url.path().to_string(),
            source,
        })?;
        Ok(Response::new(
            url.to_string(),
            200,
            HashMap::new(),
            body,
            url.view_source(),
        ))
    }

    /// data: short-circuit — decode the payload carried in the URL itself
    fn fetch_data(&self, url: &Url) -> Result<Response> {
        log::debug!("data URL detected: {}", url.path());
        let body = decode_data_payload(url.path())?;
        Ok(Response::new(
            url.to_string(),
            200,
            HashMap::new(),
            body,
            url.view_source(),
        ))
    }

    /// Store the response when `Cache-Control` carries a usable max-age.
    ///
    /// Only the exact single `max-age=N` form is understood. A header that
    /// mentions `max-age` but does not split into exactly two parts on `=`
    /// with a positive integer leaves the cache untouched; a response
    /// without `max-age` drops any stale entry for the URL.
    fn cache_populate(&mut self, key: &str, response: &Response) {
        match response.header("Cache-Control") {
            Some(value) if value.contains("max-age") => {
                let parts: Vec<&str> = value.split('=').collect();
                if parts.len() != 2 {
                    return;
                }
                if let Ok(max_age) = parts[1].trim().parse::<i64>() {
                    if max_age > 0 {
                        log::debug!("caching {key} for {max_age}s");
                        self.cache.insert(
                            key.to_string(),
                            CacheEntry::new(response.clone(), max_age as u64),
                        );
                    }
                }
            }
            _ => {
                self.cache.remove(key);
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose the request line and header block, CRLF-terminated
fn build_request(url: &Url, overrides: Option<&HashMap<String, String>>) -> String {
    let mut headers: HashMap<String, String> = overrides.cloned().unwrap_or_default();
    headers.insert("Host".to_string(), url.host().to_string());
    headers
        .entry("Connection".to_string())
        .or_insert_with(|| "close".to_string());

    let mut request = format!("GET {} HTTP/1.1\r\n", url.path());
    for (key, value) in &headers {
        let line = Header::new(key.as_str(), value.as_str());
        request.push_str(&format!("{line}\r\n"));
    }
    request.push_str("\r\n");
    request
}

/// Read until the peer closes or stops producing bytes.
///
/// No framing is assumed and no deadline applies; a peer that holds the
/// connection open without closing stalls the call.
fn read_raw(conn: &mut dyn Transport) -> std::result::Result<Vec<u8>, NetworkError> {
    let mut accumulated = Vec::new();
    let mut buf = [0u8; READ_BUF_SIZE];
    loop {
        match conn.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => accumulated.extend_from_slice(&buf[..n]),
            // a TLS peer closing without close_notify surfaces as
            // UnexpectedEof; that is end-of-stream, not a failure
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(NetworkError::Read(e)),
        }
    }
    Ok(accumulated)
}

/// Split raw response bytes into status code, header map and body block
fn parse_response(
    raw: &[u8],
) -> std::result::Result<(u16, HashMap<String, String>, Vec<u8>), NetworkError> {
    let header_end = find_subsequence(raw, b"\r\n\r\n").ok_or_else(|| {
        NetworkError::MalformedResponse("no header terminator".to_string())
    })?;
    let header_block = &raw[..header_end];
    let body = raw[header_end + 4..].to_vec();

    let header_text = String::from_utf8_lossy(header_block);
    let mut lines = header_text.split("\r\n");
    let status_line = lines
        .next()
        .ok_or_else(|| NetworkError::MalformedResponse("missing status line".to_string()))?;
    if !status_line.starts_with("HTTP/1.1") {
        return Err(NetworkError::UnsupportedHttpVersion(status_line.to_string()));
    }
    let status_code = status_line
        .split(' ')
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| NetworkError::MalformedResponse("bad status code".to_string()))?;

    let mut headers = HashMap::new();
    for line in lines {
        // lines without a colon are skipped; later duplicates win
        if let Some(header) = Header::parse(line) {
            headers.insert(header.key, header.value);
        }
    }

    Ok((status_code, headers, body))
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
