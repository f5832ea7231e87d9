//! Error types for the Ferrix fetch engine

use std::io;

use thiserror::Error;

/// Network-specific errors
///
/// Every failure mode of a fetch is a distinct variant so callers can react
/// to the exact stage that failed. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// URL string could not be split into scheme and remainder
    #[error("invalid URL format: {0:?}")]
    InvalidUrlFormat(String),
    /// Scheme is not one of http, https, file, data
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
    /// TCP connect failed
    #[error("failed to dial {addr}: {source}")]
    Dial { addr: String, source: io::Error },
    /// TLS negotiation or client setup failed
    #[error("TLS error for {host}: {source}")]
    Tls { host: String, source: rustls::Error },
    /// Writing the request buffer failed
    #[error("failed to write request: {0}")]
    Write(io::Error),
    /// Reading the response stream failed before end-of-stream
    #[error("failed to read response: {0}")]
    Read(io::Error),
    /// Response bytes violate HTTP/1.1 framing
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// Status line does not announce HTTP/1.1
    #[error("unsupported HTTP version in status line {0:?}")]
    UnsupportedHttpVersion(String),
    /// Redirect chain grew past the hop limit
    #[error("maximum redirects exceeded")]
    MaxRedirectsExceeded,
    /// data: URL payload is structurally invalid or not decodable
    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),
    /// A `%` escape was not followed by two hex digits
    #[error("invalid percent encoding at byte {0}")]
    InvalidPercentEncoding(usize),
    /// Chunked body framing is broken
    #[error("invalid chunked encoding: {0}")]
    ChunkedDecode(String),
    /// file: URL target could not be read
    #[error("failed to read file {path}: {source}")]
    FileRead { path: String, source: io::Error },
}

/// Main error type for Ferrix operations
#[derive(Debug, Error)]
pub enum FerrixError {
    /// Network-related errors
    #[error("network error: {0}")]
    Network(#[from] NetworkError),
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Generic error with message
    #[error("error: {0}")]
    Other(String),
}

/// Convenience Result type for Ferrix operations
pub type Result<T> = std::result::Result<T, FerrixError>;
