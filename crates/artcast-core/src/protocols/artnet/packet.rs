use super::error::ArtNetError;
use super::layout;

/// One ArtDMX datagram: the 18-byte header followed by 512 DMX slots.
///
/// Header and payload share one contiguous buffer, so [`Packet::as_bytes`]
/// hands the whole datagram to the socket without copying. Build a packet
/// once per universe and reuse it; [`crate::Client::send`] stamps the sequence
/// byte on every send.
///
/// # Examples
/// ```
/// use artcast_core::Packet;
///
/// let mut packet = Packet::new(0, 3);
/// packet.dmx_mut()[0] = 255;
/// assert_eq!(packet.as_bytes().len(), 530);
/// assert_eq!(packet.universe(), 3);
/// assert_eq!(packet.sequence(), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Packet {
    bytes: [u8; layout::PACKET_LEN],
}

impl Packet {
    /// Create a zeroed packet addressed to `net`/`universe`.
    pub fn new(net: u8, universe: u8) -> Self {
        let mut bytes = [0u8; layout::PACKET_LEN];
        bytes[..layout::HEADER_LEN].copy_from_slice(&layout::HEADER_TEMPLATE);
        bytes[layout::UNIVERSE_OFFSET] = universe;
        bytes[layout::NET_OFFSET] = net;
        Self { bytes }
    }

    /// Header followed by the DMX payload. Borrows the packet storage.
    pub fn as_bytes(&self) -> &[u8; layout::PACKET_LEN] {
        &self.bytes
    }

    pub fn header(&self) -> &[u8] {
        &self.bytes[..layout::HEADER_LEN]
    }

    /// DMX slot values; always 512 long.
    pub fn dmx(&self) -> &[u8] {
        &self.bytes[layout::DMX_DATA_OFFSET..]
    }

    pub fn dmx_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[layout::DMX_DATA_OFFSET..]
    }

    pub fn net(&self) -> u8 {
        self.bytes[layout::NET_OFFSET]
    }

    pub fn universe(&self) -> u8 {
        self.bytes[layout::UNIVERSE_OFFSET]
    }

    /// Raw 16-bit little-endian view of the universe and net bytes. Only equals
    /// the 15-bit Art-Net Port-Address when `net` is below 128.
    pub fn port_address(&self) -> u16 {
        u16::from_le_bytes([
            self.bytes[layout::PORT_ADDRESS_RANGE.start],
            self.bytes[layout::PORT_ADDRESS_RANGE.start + 1],
        ])
    }

    /// Last sequence stamped by a client, `None` before the first send.
    pub fn sequence(&self) -> Option<u8> {
        match self.bytes[layout::SEQUENCE_OFFSET] {
            0 => None,
            sequence => Some(sequence),
        }
    }

    pub(crate) fn set_sequence(&mut self, sequence: u8) {
        self.bytes[layout::SEQUENCE_OFFSET] = sequence;
    }

    /// Copy `data` to the start of the payload and zero the remaining slots.
    pub fn set_dmx(&mut self, data: &[u8]) -> Result<(), ArtNetError> {
        if data.len() > layout::DMX_MAX_SLOTS {
            return Err(ArtNetError::TooLong {
                max: layout::DMX_MAX_SLOTS,
                actual: data.len(),
            });
        }
        let dmx = self.dmx_mut();
        dmx[..data.len()].copy_from_slice(data);
        dmx[data.len()..].fill(0);
        Ok(())
    }

    /// Set a 1-based DMX channel.
    pub fn set_channel(&mut self, channel: u16, value: u8) -> Result<(), ArtNetError> {
        let index = slot_index(channel).ok_or(ArtNetError::InvalidChannel { channel })?;
        self.dmx_mut()[index] = value;
        Ok(())
    }

    /// Read a 1-based DMX channel.
    pub fn channel(&self, channel: u16) -> Option<u8> {
        slot_index(channel).map(|index| self.dmx()[index])
    }

    pub fn fill(&mut self, value: u8) {
        self.dmx_mut().fill(value);
    }

    pub fn blackout(&mut self) {
        self.fill(0);
    }
}

fn slot_index(channel: u16) -> Option<usize> {
    let channel = channel as usize;
    if (1..=layout::DMX_MAX_SLOTS).contains(&channel) {
        Some(channel - 1)
    } else {
        None
    }
}

impl std::fmt::Debug for Packet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packet")
            .field("net", &self.net())
            .field("universe", &self.universe())
            .field("sequence", &self.sequence())
            .finish_non_exhaustive()
    }
}
