//! UDP transmitter for ArtDMX packets.
//!
//! A [`Client`] owns one connected UDP socket and one sequence counter per
//! universe. Sending stamps the next sequence into the packet header and hands
//! the packet bytes to the socket as a single datagram. Delivery is
//! best-effort: there is no acknowledgement, retry or buffering, and every
//! transport failure is returned to the caller as it happens.

pub mod config;
pub mod error;
pub mod sequence;

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::sync::{PoisonError, RwLock};

use tracing::{debug, trace, warn};

pub use config::ClientConfig;
pub use error::ClientError;
pub use sequence::SequenceTable;

use crate::protocols::artnet::Packet;

/// Art-Net client sending ArtDMX datagrams to one node.
///
/// `send` takes `&self`, so a client can be shared between threads; counters
/// are advanced atomically per universe.
///
/// # Examples
/// ```no_run
/// use artcast_core::{Client, Packet};
///
/// let client = Client::connect("192.168.0.60", None)?;
/// let mut packet = Packet::new(0, 0);
/// for (i, slot) in packet.dmx_mut().iter_mut().enumerate() {
///     *slot = i as u8;
/// }
/// client.send(&mut packet)?;
/// client.close()?;
/// # Ok::<(), artcast_core::ClientError>(())
/// ```
#[derive(Debug)]
pub struct Client {
    destination: SocketAddr,
    local_addr: SocketAddr,
    socket: RwLock<Option<UdpSocket>>,
    sequences: SequenceTable,
}

impl Client {
    /// Open a client to `addr`; port 0 selects the Art-Net port 6454.
    pub fn new(addr: SocketAddr) -> Result<Self, ClientError> {
        Self::with_config(&ClientConfig::new(addr.to_string()))
    }

    /// Resolve `host` and open a client to it.
    pub fn connect(host: &str, port: Option<u16>) -> Result<Self, ClientError> {
        let mut config = ClientConfig::new(host);
        config.port = port;
        Self::with_config(&config)
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let destination = config.resolve()?;
        let open_error = |source| ClientError::TransportOpen {
            address: destination,
            source,
        };

        let bind = config.bind.unwrap_or_else(|| unspecified_for(&destination));
        let socket = UdpSocket::bind(bind).map_err(open_error)?;
        if config.broadcast {
            socket.set_broadcast(true).map_err(open_error)?;
        }
        socket.connect(destination).map_err(open_error)?;
        let local_addr = socket.local_addr().map_err(open_error)?;

        debug!(%destination, %local_addr, broadcast = config.broadcast, "Art-Net client opened");

        Ok(Self {
            destination,
            local_addr,
            socket: RwLock::new(Some(socket)),
            sequences: SequenceTable::new(),
        })
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Last sequence sent for `universe`, 0 if nothing was sent yet.
    pub fn sequence(&self, universe: u8) -> u8 {
        self.sequences.current(universe)
    }

    pub fn is_closed(&self) -> bool {
        self.socket
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Stamp the next sequence for the packet's universe and transmit it.
    ///
    /// The packet's sequence byte is overwritten. Success means the datagram
    /// was handed to the OS, not that it arrived.
    pub fn send(&self, packet: &mut Packet) -> Result<(), ClientError> {
        let guard = self.socket.read().unwrap_or_else(PoisonError::into_inner);
        let socket = guard
            .as_ref()
            .ok_or(ClientError::InvalidArgument("client is closed"))?;

        let universe = packet.universe();
        let sequence = self.sequences.advance(universe);
        packet.set_sequence(sequence);

        let bytes = packet.as_bytes();
        let written = socket.send(bytes).map_err(|source| {
            warn!(destination = %self.destination, universe, error = %source, "ArtDMX send failed");
            ClientError::TransportWrite {
                destination: self.destination,
                source,
            }
        })?;
        if written != bytes.len() {
            return Err(ClientError::TransportWrite {
                destination: self.destination,
                source: std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    format!("short write: {written} of {} bytes", bytes.len()),
                ),
            });
        }

        trace!(destination = %self.destination, universe, sequence, "ArtDMX sent");
        Ok(())
    }

    /// Release the socket.
    ///
    /// Not idempotent: closing an already closed client returns
    /// [`ClientError::InvalidArgument`]. Errors left on the socket by earlier
    /// datagrams (ICMP port unreachable and the like) belong to those sends
    /// and are not reported here.
    pub fn close(&self) -> Result<(), ClientError> {
        let socket = self
            .socket
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(ClientError::InvalidArgument("client already closed"))?;
        drop(socket);

        debug!(destination = %self.destination, "Art-Net client closed");
        Ok(())
    }
}

fn unspecified_for(destination: &SocketAddr) -> SocketAddr {
    match destination {
        SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
    }
}
