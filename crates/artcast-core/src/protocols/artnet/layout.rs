pub const ARTNET_ID: &[u8; 8] = b"Art-Net\0";

pub const ID_RANGE: std::ops::Range<usize> = 0..8;
pub const OP_CODE_RANGE: std::ops::Range<usize> = 8..10;
pub const PROTOCOL_VERSION_RANGE: std::ops::Range<usize> = 10..12;
pub const SEQUENCE_OFFSET: usize = 12;
pub const PHYSICAL_OFFSET: usize = 13;
pub const UNIVERSE_OFFSET: usize = 14;
pub const NET_OFFSET: usize = 15;
pub const PORT_ADDRESS_RANGE: std::ops::Range<usize> = 14..16;
pub const LENGTH_RANGE: std::ops::Range<usize> = 16..18;

pub const HEADER_LEN: usize = 18;
pub const DMX_DATA_OFFSET: usize = HEADER_LEN;
pub const DMX_MAX_SLOTS: usize = 512;
pub const PACKET_LEN: usize = HEADER_LEN + DMX_MAX_SLOTS;

pub const ARTDMX_OPCODE: u16 = 0x5000;
pub const PROTOCOL_VERSION: u16 = 14;
pub const DEFAULT_PORT: u16 = 6454;

/// Fixed ArtDMX header with sequence, universe and net left at zero.
pub const HEADER_TEMPLATE: [u8; HEADER_LEN] = header_template();

const fn header_template() -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];

    let mut i = 0;
    while i < ARTNET_ID.len() {
        header[ID_RANGE.start + i] = ARTNET_ID[i];
        i += 1;
    }

    let opcode = ARTDMX_OPCODE.to_le_bytes();
    header[OP_CODE_RANGE.start] = opcode[0];
    header[OP_CODE_RANGE.start + 1] = opcode[1];

    let version = PROTOCOL_VERSION.to_be_bytes();
    header[PROTOCOL_VERSION_RANGE.start] = version[0];
    header[PROTOCOL_VERSION_RANGE.start + 1] = version[1];

    header[PHYSICAL_OFFSET] = 0;

    let length = (DMX_MAX_SLOTS as u16).to_be_bytes();
    header[LENGTH_RANGE.start] = length[0];
    header[LENGTH_RANGE.start + 1] = length[1];

    header
}
