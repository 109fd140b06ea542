//! Protocol constants

/// Every frame starts with this marker byte.
pub const PREAMBLE: u8 = 0x17;

/// Fixed frame size in bytes. Requests are zero-padded up to this,
/// responses are read at fixed offsets within it.
pub const FRAME_SIZE: usize = 64;

/// Frame size in hex characters (2 per byte).
pub const FRAME_HEX_LEN: usize = FRAME_SIZE * 2;

/// Common header: preamble + verb + 2 reserved bytes + 4-byte serial.
pub const HEADER_SIZE: usize = 8;

/// Header size in hex characters.
pub const HEADER_HEX_LEN: usize = HEADER_SIZE * 2;

/// Room left for a verb-specific payload, in hex characters.
pub const MAX_PAYLOAD_HEX_LEN: usize = FRAME_HEX_LEN - HEADER_HEX_LEN;

/// Sentinel event index: asks the board for its newest log entry.
pub const LATEST_EVENT: u32 = 0xFFFF_FFFF;
