//! # Ferrix - Minimal Web Fetch Engine
//!
//! A small browser fetch core written in Rust. Every piece of HTTP/1.1
//! framing — status line, header block, body length, chunked re-assembly,
//! persistent-connection lifecycle — is parsed by hand from raw byte
//! streams rather than delegated to a client library.
//!
//! ## Architecture
//!
//! - **network**: URL parsing, blocking TCP/TLS transports, the request
//!   engine with per-host connection reuse and a TTL response cache,
//!   chunked-transfer decoding, data: payload decoding
//! - **renderer**: tag-stripping text output for fetched documents
//! - **utils**: shared error types

pub mod network;
pub mod renderer;
pub mod utils;

// Re-export main types for convenience
pub use network::{Engine, Response, Url};
pub use utils::error::{FerrixError, Result};

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "Ferrix";
