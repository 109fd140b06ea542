//! Access-event wire codec
//!
//! Get-event-count takes an empty payload and answers with a
//! byte-reversed count. Get-event takes one byte-reversed log index and
//! answers with a record at fixed offsets:
//!
//! ```text
//! hex chars  0..16   common header
//!           16..24   index (byte-reversed)
//!           24..26   record type (opaque)
//!           26..28   access granted (01) / denied
//!           28..30   door id
//!           30..32   door status (opaque)
//!           32..40   tag serial (byte-reversed)
//!           40..54   timestamp, YYYYMMDDhhmmss digit text
//!           54..56   second record type byte (opaque)
//! ```

use doorlink_types::AccessRecord;

use crate::{error::Result, frame::Response, hexstr};

pub use crate::constants::LATEST_EVENT;

/// The byte-reversed index carried in a get-event payload.
///
/// [`LATEST_EVENT`] asks for the newest record; it is its own byte
/// reversal.
pub fn index_payload(index: u32) -> String {
    hex::encode(index.to_le_bytes())
}

/// Decode a get-event-count response.
pub fn parse_count(resp: &Response) -> Result<u32> {
    hexstr::hex_field_to_u32(resp.field(16, 24))
}

/// Decode a get-event response into a record.
pub fn parse_record(resp: &Response) -> Result<AccessRecord> {
    Ok(AccessRecord {
        index: hexstr::hex_field_to_u32(resp.field(16, 24))?,
        record_type: hexstr::hex_byte(resp.field(24, 26))?,
        access_granted: resp.field(26, 28) == "01",
        door_id: hexstr::hex_byte(resp.field(28, 30))?,
        door_status: hexstr::hex_byte(resp.field(30, 32))?,
        tag_serial: hexstr::hex_field_to_u32(resp.field(32, 40))?,
        timestamp: resp.field(40, 54).to_string(),
        record_type_2: hexstr::hex_byte(resp.field(54, 56))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(hex: &str) -> Response {
        Response::from_bytes(&hex::decode(hex).unwrap()).unwrap()
    }

    fn record_response(index: u32, tag: u32, timestamp: &str) -> Response {
        let mut hex = String::from("17b00000ddccbbaa");
        hex.push_str(&index_payload(index));
        hex.push_str("00"); // record type
        hex.push_str("01"); // access granted
        hex.push_str("02"); // door id
        hex.push_str("00"); // door status
        hex.push_str(&hex::encode(tag.to_le_bytes()));
        hex.push_str(timestamp);
        hex.push_str("05"); // second record type byte
        hex.push_str(&"0".repeat(128 - hex.len()));
        response(&hex)
    }

    #[test]
    fn test_index_payload() {
        assert_eq!(index_payload(10), "0a000000");
        assert_eq!(index_payload(0x63), "63000000");
        assert_eq!(index_payload(LATEST_EVENT), "ffffffff");
    }

    #[test]
    fn test_parse_count() {
        let hex = format!("17b40000ddccbbaa64000000{}", "0".repeat(104));
        assert_eq!(parse_count(&response(&hex)).unwrap(), 100);
    }

    #[test]
    fn test_parse_record() {
        let resp = record_response(10, 16733723, "20180312105832");
        let record = parse_record(&resp).unwrap();

        assert_eq!(record.index, 10);
        assert_eq!(record.record_type, 0);
        assert!(record.access_granted);
        assert_eq!(record.door_id, 2);
        assert_eq!(record.door_status, 0);
        assert_eq!(record.tag_serial, 16733723);
        assert_eq!(record.timestamp, "20180312105832");
        assert_eq!(record.record_type_2, 5);
    }

    #[test]
    fn test_parse_record_denied() {
        let mut hex = String::from("17b00000ddccbbaa");
        hex.push_str(&index_payload(7));
        hex.push_str("0000010a"); // type, denied (00), door, status
        hex.push_str(&hex::encode(10u32.to_le_bytes()));
        hex.push_str("2018031210583200");
        hex.push_str(&"0".repeat(128 - hex.len()));

        let record = parse_record(&response(&hex)).unwrap();
        assert!(!record.access_granted);
        assert!(record.is_keypad_entry());
    }
}
