//! Clock synchronization wire codec
//!
//! Get-time takes an empty payload and answers with fourteen digit
//! characters at the payload start. Set-time carries the same fourteen
//! digits out; the board sends only its generic response frame back.

use chrono::NaiveDateTime;
use doorlink_types::access_record::TIMESTAMP_FORMAT;

use crate::{
    error::{Error, Result},
    frame::Response,
};

/// The `YYYYMMDDhhmmss` digit text carried in a set-time payload.
pub fn time_payload(when: NaiveDateTime) -> String {
    when.format(TIMESTAMP_FORMAT).to_string()
}

/// Decode a get-time response into a calendar instant.
///
/// # Errors
///
/// A field that does not parse as `YYYYMMDDhhmmss` is surfaced as
/// [`Error::InvalidTimestamp`], never silently swallowed.
pub fn parse_time(resp: &Response) -> Result<NaiveDateTime> {
    let raw = resp.field(16, 30);
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| Error::InvalidTimestamp(raw.to_string()))
}
