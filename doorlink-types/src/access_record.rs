//! Access event records read from the board's circular log

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};

/// Tag serial the board reports for keypad (PIN) entries instead of a
/// scanned credential.
pub const KEYPAD_TAG_SERIAL: u32 = 10;

/// Timestamp layout used everywhere on the wire (`YYYYMMDDhhmmss`).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// One access event from the board's event log.
///
/// Records are read-only: each is built fresh from a response frame and
/// never written back to the device. Several fields are opaque status
/// bytes whose meaning the board vendor does not document; they are kept
/// as raw values rather than guessed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord {
    /// Position in the board's circular event log
    pub index: u32,

    /// Opaque record classification byte
    pub record_type: u8,

    /// Whether access was granted for this event
    pub access_granted: bool,

    /// Door (or device) identifier byte
    pub door_id: u8,

    /// Opaque door status byte
    pub door_status: u8,

    /// Tag serial that triggered the event, in its decoded decimal form
    pub tag_serial: u32,

    /// Event timestamp, verbatim from the wire (`YYYYMMDDhhmmss`).
    ///
    /// Kept as the raw 14-character string on the presumption that
    /// converting it is operation-dependent (a report wants a different
    /// shape than a database row).
    pub timestamp: String,

    /// Second opaque classification byte
    pub record_type_2: u8,
}

impl AccessRecord {
    /// Whether this event came from a keypad entry rather than a tag scan.
    pub fn is_keypad_entry(&self) -> bool {
        self.tag_serial == KEYPAD_TAG_SERIAL
    }

    /// Parse the raw timestamp into a calendar date-time.
    ///
    /// # Errors
    ///
    /// Returns a parse error when the board sent something other than
    /// 14 digits in `YYYYMMDDhhmmss` layout.
    pub fn timestamp_parsed(&self) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| Error::Parse(format!("bad timestamp {:?}: {}", self.timestamp, e)))
    }
}

impl fmt::Display for AccessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event[#{} tag={} door=0x{:02x} granted={} at {}]",
            self.index, self.tag_serial, self.door_id, self.access_granted, self.timestamp
        )
    }
}
