//! Frame construction and parsing

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use tracing::trace;

use crate::{
    constants::{FRAME_HEX_LEN, FRAME_SIZE, HEADER_HEX_LEN, MAX_PAYLOAD_HEX_LEN, PREAMBLE},
    error::{Error, Result},
    hexstr,
    verb::Verb,
};

/// The board's 4-byte unique identifier, typically the last four bytes
/// of its MAC address. Printed configuration gives it in natural
/// big-endian hex (`AABBCCDD`); the wire wants it byte-reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerialNumber([u8; 4]);

impl SerialNumber {
    pub fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> [u8; 4] {
        self.0
    }

    /// Natural (big-endian) hex form, as printed on the board label.
    pub fn natural_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Byte-reversed hex form, as carried in every frame header.
    pub fn wire_hex(&self) -> String {
        let mut le = self.0;
        le.reverse();
        hex::encode(le)
    }
}

impl FromStr for SerialNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 8 {
            return Err(Error::InvalidSerial(s.to_string()));
        }
        let raw = hex::decode(s).map_err(|_| Error::InvalidSerial(s.to_string()))?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&raw);
        Ok(Self(bytes))
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.natural_hex())
    }
}

/// Request frame
///
/// # Frame Structure
///
/// ```text
/// ┌──────────┬──────────┬──────────┬───────────────┬───────────────────┐
/// │ Preamble │   Verb   │ Reserved │ SerialNumber  │      Payload      │
/// │  1 byte  │  1 byte  │ 2 bytes  │   4 bytes     │  up to 56 bytes   │
/// │  (0x17)  │          │ (zeroed) │ (byte-rev'd)  │  (zero-padded)    │
/// └──────────┴──────────┴──────────┴───────────────┴───────────────────┘
/// ```
///
/// Every frame is exactly 64 bytes; the payload is zero-padded on the
/// right and must never overflow the fixed size. The whole frame is
/// assembled as hex text because several payload fields (dates,
/// timestamps) are literal digit characters, then decoded to raw bytes
/// only at the transport boundary.
///
/// # Examples
///
/// ```
/// use doorlink_core::{Frame, SerialNumber, Verb};
///
/// let serial: SerialNumber = "AABBCCDD".parse().unwrap();
/// let frame = Frame::new(Verb::GetTime, serial);
/// let hex = frame.encode().unwrap();
/// assert_eq!(hex.len(), 128);
/// assert!(hex.starts_with("17320000ddccbbaa"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    verb: Verb,
    serial: SerialNumber,
    payload: String,
}

impl Frame {
    /// Create a frame with an empty payload
    pub fn new(verb: Verb, serial: SerialNumber) -> Self {
        Self {
            verb,
            serial,
            payload: String::new(),
        }
    }

    /// Create a frame with a verb-specific payload (hex text)
    pub fn with_payload(verb: Verb, serial: SerialNumber, payload: impl Into<String>) -> Self {
        Self {
            verb,
            serial,
            payload: payload.into(),
        }
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The common header: preamble + verb + zeroed reserved field +
    /// byte-reversed serial number.
    pub fn header_hex(&self) -> String {
        format!(
            "{:02x}{}0000{}",
            PREAMBLE,
            self.verb.as_hex(),
            self.serial.wire_hex()
        )
    }

    /// Encode to the full 128-hex-character frame text.
    ///
    /// # Errors
    ///
    /// Rejects payloads that are not well-formed hex pairs or that would
    /// push the frame past its fixed 64-byte size.
    pub fn encode(&self) -> Result<String> {
        hexstr::ensure_hex_pairs(&self.payload)?;
        if self.payload.len() > MAX_PAYLOAD_HEX_LEN {
            return Err(Error::PayloadTooLong {
                len: self.payload.len() / 2,
                max: MAX_PAYLOAD_HEX_LEN / 2,
            });
        }

        let mut out = self.header_hex();
        out.push_str(&self.payload);
        let pad = FRAME_HEX_LEN - out.len();
        out.push_str(&"0".repeat(pad));

        trace!(verb = %self.verb, frame = %out, "Encoded frame");

        Ok(out)
    }

    /// Encode to raw wire bytes.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let hex = self.encode()?;
        Ok(Bytes::from(hex::decode(hex)?))
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("verb", &self.verb)
            .field("serial", &self.serial.natural_hex())
            .field("payload_len", &(self.payload.len() / 2))
            .finish()
    }
}

/// The common header fields parsed back out of a response.
///
/// Parsed defensively on every response even though most callers only
/// need the payload; the reserved field echoes device state and is kept
/// raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prelude {
    pub preamble: u8,
    /// Raw verb byte as echoed by the board (may not map to a known [`Verb`])
    pub verb: u8,
    pub reserved: [u8; 2],
    /// Serial number restored to its natural form
    pub serial: SerialNumber,
}

impl Prelude {
    /// Whether the response carries the expected protocol marker.
    pub fn has_valid_preamble(&self) -> bool {
        self.preamble == PREAMBLE
    }
}

/// A received frame, held as hex text and sliced at fixed offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    hex: String,
}

impl Response {
    /// Wrap a received datagram.
    ///
    /// The board always answers with one 64-byte frame; anything shorter
    /// is a protocol-level failure. Trailing bytes past the frame (some
    /// firmware pads its reply) are ignored, matching the fixed-offset
    /// contract both ends rely on.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < FRAME_SIZE {
            return Err(Error::ResponseTooShort {
                expected: FRAME_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self {
            hex: hex::encode(&data[..FRAME_SIZE]),
        })
    }

    /// Full frame as hex text (always 128 characters).
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// The verb-specific payload (everything after the common header).
    pub fn payload(&self) -> &str {
        &self.hex[HEADER_HEX_LEN..]
    }

    /// Fixed-offset slice, measured in hex characters from frame start.
    pub(crate) fn field(&self, start: usize, end: usize) -> &str {
        &self.hex[start..end]
    }

    /// Parse the common header fields.
    pub fn prelude(&self) -> Result<Prelude> {
        let preamble = hexstr::hex_byte(self.field(0, 2))?;
        let verb = hexstr::hex_byte(self.field(2, 4))?;
        let reserved = [
            hexstr::hex_byte(self.field(4, 6))?,
            hexstr::hex_byte(self.field(6, 8))?,
        ];
        let serial = hexstr::flip_bytes(self.field(8, 16))?.parse()?;

        Ok(Prelude {
            preamble,
            verb,
            reserved,
            serial,
        })
    }
}
