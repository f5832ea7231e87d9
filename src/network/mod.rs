//! Network stack for the Ferrix fetch engine
//!
//! Hand-parsed HTTP/1.1 over blocking sockets: connection reuse per
//! host:port, a TTL response cache, bounded redirect following and manual
//! chunked-transfer decoding.

mod cache;
mod chunked;
mod data;
mod engine;
mod response;
mod transport;
mod url;

pub use cache::CacheEntry;
pub use chunked::decode_chunked;
pub use data::{decode_data_payload, percent_decode};
pub use engine::{Engine, Header, MAX_REDIRECTS};
pub use response::Response;
pub use transport::{Dialer, TcpDialer, Transport};
pub use url::{Scheme, Url};
