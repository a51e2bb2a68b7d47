//! artcast core library: an Art-Net ArtDMX transmitter.
//!
//! The crate has two layers. `protocols` encodes ArtDMX datagrams into a
//! fixed 530-byte buffer (18-byte header, 512 DMX slots) and has no I/O.
//! `client` owns a connected UDP socket plus one sequence counter per
//! universe, and stamps the sequence byte before each datagram leaves.
//!
//! Invariants:
//! - A serialized packet is always exactly 530 bytes.
//! - Header fields other than sequence, universe and net never change after
//!   construction.
//! - Each universe has its own counter; transmitted sequences cycle 1..=255.
//!
//! Version française (résumé):
//! Cette crate construit des trames ArtDMX de taille fixe (530 octets) et les
//! envoie en UDP. Le client tient un compteur de séquence par univers (1 à 255,
//! jamais 0). Aucune réception, découverte ni relance n'est prise en charge.
//!
//! # Examples
//! ```no_run
//! use artcast_core::{Client, Packet};
//!
//! let client = Client::connect("192.168.0.60", None)?;
//! let mut packet = Packet::new(0, 1);
//! packet.set_channel(1, 255)?;
//! client.send(&mut packet)?;
//! assert_eq!(packet.sequence(), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod protocols;

pub use client::{Client, ClientConfig, ClientError, SequenceTable};
pub use protocols::artnet::layout::{DEFAULT_PORT, DMX_MAX_SLOTS, HEADER_LEN, PACKET_LEN};
pub use protocols::artnet::{ArtNetError, Packet};
