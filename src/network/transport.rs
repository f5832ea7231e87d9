//! Blocking TCP and TLS transports
//!
//! The engine reaches the network through the [`Dialer`] seam so the
//! exchange logic stays independent of the socket implementation; tests
//! substitute scripted transports here.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConnection, StreamOwned};

use crate::utils::error::NetworkError;

/// A bidirectional byte stream carrying HTTP exchanges
pub trait Transport: Read + Write + Send {}

impl<T: Read + Write + Send> Transport for T {}

/// Opens transports on behalf of the engine
pub trait Dialer: Send {
    /// Open a plain TCP stream to `addr` (`host:port`)
    fn dial(&self, addr: &str) -> Result<Box<dyn Transport>, NetworkError>;

    /// Open a TCP stream to `addr` and negotiate TLS for `server_name`
    fn dial_tls(&self, addr: &str, server_name: &str)
    -> Result<Box<dyn Transport>, NetworkError>;
}

/// Default dialer using the operating system's TCP stack and rustls
pub struct TcpDialer {
    tls_config: Arc<rustls::ClientConfig>,
}

impl TcpDialer {
    pub fn new() -> Self {
        Self {
            tls_config: Arc::new(Self::create_tls_config()),
        }
    }

    /// Create client TLS config
    fn create_tls_config() -> rustls::ClientConfig {
        // Install ring as the default crypto provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        // Use platform's native root certificates
        let mut roots = rustls::RootCertStore::empty();
        for cert in rustls_native_certs::load_native_certs().certs {
            roots.add(cert).ok();
        }

        rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth()
    }
}

impl Default for TcpDialer {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialer for TcpDialer {
    fn dial(&self, addr: &str) -> Result<Box<dyn Transport>, NetworkError> {
        log::debug!("dialing {addr}");
        let stream = TcpStream::connect(addr).map_err(|source| NetworkError::Dial {
            addr: addr.to_string(),
            source,
        })?;
        Ok(Box::new(stream))
    }

    fn dial_tls(
        &self,
        addr: &str,
        server_name: &str,
    ) -> Result<Box<dyn Transport>, NetworkError> {
        log::debug!("dialing {addr} with TLS for {server_name}");
        let name = ServerName::try_from(server_name.to_string()).map_err(|_| {
            NetworkError::Tls {
                host: server_name.to_string(),
                source: rustls::Error::General("invalid server name".to_string()),
            }
        })?;
        let conn =
            ClientConnection::new(self.tls_config.clone(), name).map_err(|source| {
                NetworkError::Tls {
                    host: server_name.to_string(),
                    source,
                }
            })?;
        let stream = TcpStream::connect(addr).map_err(|source| NetworkError::Dial {
            addr: addr.to_string(),
            source,
        })?;
        Ok(Box::new(StreamOwned::new(conn, stream)))
    }
}
