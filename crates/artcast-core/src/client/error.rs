use std::net::SocketAddr;

use thiserror::Error;

/// Errors returned by [`crate::Client`].
///
/// # Examples
/// ```
/// use artcast_core::ClientError;
///
/// let err = ClientError::InvalidArgument("client is closed");
/// assert!(err.to_string().contains("client is closed"));
/// ```
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("cannot resolve address '{address}': {source}")]
    AddressResolution {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot open UDP transport to {address}: {source}")]
    TransportOpen {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("failed to send datagram to {destination}: {source}")]
    TransportWrite {
        destination: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// Releasing the transport failed. `std::net::UdpSocket` reports no
    /// error on drop, so the std-backed client never returns this today.
    #[error("failed to close UDP transport: {0}")]
    TransportClose(#[source] std::io::Error),
}
