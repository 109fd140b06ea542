//! Byte-order transform over hex text
//!
//! The board encodes multi-byte fields little-endian while the rest of
//! the protocol is built and sliced as big-endian hex text, so every
//! serial number, tag value and record index passes through
//! [`flip_bytes`] on its way in or out of a frame.

use crate::error::{Error, Result};

/// Check that `hex` splits cleanly into 2-character byte groups.
pub fn ensure_hex_pairs(hex: &str) -> Result<()> {
    if hex.len() % 2 != 0 {
        return Err(Error::OddLengthHex { len: hex.len() });
    }
    if let Some(ch) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(Error::InvalidHexDigit { ch });
    }
    Ok(())
}

/// Reverse the byte-pair order of a hex string: `"AABBCC"` -> `"CCBBAA"`.
///
/// Self-inverse: `flip_bytes(flip_bytes(s)?) == s`.
///
/// # Errors
///
/// Odd-length input or non-hex characters are caller errors and are
/// reported rather than truncated.
pub fn flip_bytes(hex: &str) -> Result<String> {
    ensure_hex_pairs(hex)?;

    let bytes = hex.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    for pair in bytes.chunks(2).rev() {
        out.push(pair[0] as char);
        out.push(pair[1] as char);
    }
    Ok(out)
}

/// Decode one byte-reversed hex integer field (count, index, tag serial).
pub fn hex_field_to_u32(field: &str) -> Result<u32> {
    let natural = flip_bytes(field)?;
    u32::from_str_radix(&natural, 16).map_err(|_| Error::BadNumericField(field.to_string()))
}

/// Decode a single 2-character hex byte.
pub fn hex_byte(field: &str) -> Result<u8> {
    if field.len() != 2 {
        return Err(Error::BadNumericField(field.to_string()));
    }
    u8::from_str_radix(field, 16).map_err(|_| Error::BadNumericField(field.to_string()))
}
