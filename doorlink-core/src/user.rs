//! User management wire codec
//!
//! Add-user carries the device-form tag, a sixteen-digit validity
//! window and the four systems-mask bytes. Get-user and delete-user
//! carry the device-form tag alone.
//!
//! Add/delete answer with a single status byte; get-user answers with
//! the stored record at fixed offsets:
//!
//! ```text
//! hex chars  0..16   common header
//!           16..24   tag serial (byte-reversed)
//!           24..32   valid-from date, YYYYMMDD digit text
//!           32..40   valid-until date, YYYYMMDD digit text
//!           40..48   systems mask, one flag byte per class
//! ```
//!
//! A tag field of all-zero or all-`f` bytes means the board holds no
//! such user: absence, not an error.

use doorlink_types::{SystemsMask, UserRecord, ValidityWindow};

use crate::{error::Result, frame::Response, hexstr, tag::TagId};

/// Status byte the board sends for an accepted add/delete.
const STATUS_OK: &str = "01";

/// Payload for get-user and delete-user requests.
pub fn tag_payload(tag: TagId) -> String {
    tag.device_form()
}

/// Payload for an add-user request.
pub fn add_payload(tag: TagId, window: &ValidityWindow, systems: SystemsMask) -> String {
    format!("{}{}{}", tag.device_form(), window.wire(), systems.as_hex())
}

/// Decode the accept/reject status of an add or delete response.
///
/// Anything other than `01` is a device-side rejection, reported as
/// `false` rather than an error: the frame itself was well-formed.
pub fn parse_status(resp: &Response) -> bool {
    resp.field(16, 18) == STATUS_OK
}

/// Decode a get-user response. `None` when the board has no such user.
pub fn parse_user(resp: &Response) -> Result<Option<UserRecord>> {
    let tag_field = resp.field(16, 24);
    if tag_absent(tag_field) {
        return Ok(None);
    }

    let systems = SystemsMask([
        hexstr::hex_byte(resp.field(40, 42))?,
        hexstr::hex_byte(resp.field(42, 44))?,
        hexstr::hex_byte(resp.field(44, 46))?,
        hexstr::hex_byte(resp.field(46, 48))?,
    ]);

    Ok(Some(UserRecord {
        tag_serial: hexstr::hex_field_to_u32(tag_field)?,
        valid_from: resp.field(24, 32).to_string(),
        valid_until: resp.field(32, 40).to_string(),
        systems,
    }))
}

fn tag_absent(field: &str) -> bool {
    field.chars().all(|c| c == '0') || field.chars().all(|c| c.eq_ignore_ascii_case(&'f'))
}
