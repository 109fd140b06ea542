//! Error types for doorlink-core

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Protocol codec errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Hex text with an odd number of characters cannot be split into bytes
    #[error("Odd-length hex string: {len} characters")]
    OddLengthHex { len: usize },

    /// A character outside `[0-9a-fA-F]` in hex text
    #[error("Invalid hex digit: {ch:?}")]
    InvalidHexDigit { ch: char },

    /// Verb-specific payload would push the frame past its fixed size
    #[error("Payload too long: {len} bytes (max: {max} bytes)")]
    PayloadTooLong { len: usize, max: usize },

    /// Received datagram is shorter than one full frame
    #[error("Response too short: expected {expected} bytes, got {actual} bytes")]
    ResponseTooShort { expected: usize, actual: usize },

    /// Scanned tag value does not fit the 24-bit credential space
    #[error("Tag value {tag} out of range (max: {max})")]
    TagOutOfRange { tag: u32, max: u32 },

    /// Unknown command verb byte
    #[error("Unknown verb: 0x{0:02X}")]
    UnknownVerb(u8),

    /// Board serial number is not 4 bytes of hex text
    #[error("Invalid serial number: {0:?}")]
    InvalidSerial(String),

    /// A frame field that should hold a hex integer does not parse as one
    #[error("Bad numeric field: {0:?}")]
    BadNumericField(String),

    /// Timestamp field does not match the `YYYYMMDDhhmmss` layout
    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// Hex decode failure when turning frame text into wire bytes
    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl Error {
    /// Whether this error was caused by malformed caller input rather
    /// than by anything the device sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::OddLengthHex { .. }
                | Self::InvalidHexDigit { .. }
                | Self::PayloadTooLong { .. }
                | Self::TagOutOfRange { .. }
                | Self::InvalidSerial(_)
        )
    }
}
