use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use serde::{Deserialize, Serialize};

use super::error::ClientError;
use crate::protocols::artnet::layout;

/// Destination and transport options for a [`crate::Client`].
///
/// # Examples
/// ```
/// use artcast_core::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{"destination": "10.0.0.5"}"#)?;
/// assert_eq!(config.effective_port(), 6454);
/// assert!(!config.broadcast);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// IP literal, `ip:port`, or resolvable host name of the node.
    pub destination: String,
    /// UDP port; `None` or 0 selects the Art-Net port 6454.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Local address to bind; defaults to the unspecified address of the
    /// destination's family with an ephemeral port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<SocketAddr>,
    /// Enable `SO_BROADCAST`, required for broadcast destinations.
    #[serde(default)]
    pub broadcast: bool,
}

impl ClientConfig {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            port: None,
            bind: None,
            broadcast: false,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = Some(bind);
        self
    }

    pub fn with_broadcast(mut self, broadcast: bool) -> Self {
        self.broadcast = broadcast;
        self
    }

    pub fn effective_port(&self) -> u16 {
        match self.port {
            Some(port) if port != 0 => port,
            _ => layout::DEFAULT_PORT,
        }
    }

    /// Resolve the destination to a single socket address.
    ///
    /// An explicit `port` wins over a port embedded in `destination`.
    pub fn resolve(&self) -> Result<SocketAddr, ClientError> {
        if let Ok(mut addr) = self.destination.parse::<SocketAddr>() {
            if matches!(self.port, Some(port) if port != 0) || addr.port() == 0 {
                addr.set_port(self.effective_port());
            }
            return Ok(addr);
        }

        let resolution_error = |source| ClientError::AddressResolution {
            address: self.destination.clone(),
            source,
        };
        let candidates = (self.destination.as_str(), self.effective_port())
            .to_socket_addrs()
            .map_err(resolution_error)?;

        let mut fallback = None;
        for candidate in candidates {
            match self.bind {
                Some(bind) if bind.is_ipv4() != candidate.is_ipv4() => {
                    fallback.get_or_insert(candidate);
                }
                _ => return Ok(candidate),
            }
        }
        fallback.ok_or_else(|| {
            resolution_error(io::Error::new(
                io::ErrorKind::NotFound,
                "no addresses found",
            ))
        })
    }
}
