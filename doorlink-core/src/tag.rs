//! Tag number representation conversions
//!
//! A credential's number exists in three incompatible shapes:
//!
//! 1. The raw 24-bit value reported by an RFID scanner.
//! 2. The *split-decimal* form: the 24-bit value split into an 8-bit
//!    prefix and 16-bit suffix, each reinterpreted as decimal and
//!    concatenated. The resulting digit string, read back as a plain
//!    decimal number, is the tag id the board actually stores.
//! 3. The *device form*: the tag id rendered as 8 zero-padded hex
//!    characters, byte-reversed, as carried inside request frames.

use std::fmt;

use crate::error::{Error, Result};

/// Scanner credentials are 24-bit values.
pub const SCANNER_TAG_BITS: u32 = 24;

const SCANNER_TAG_MAX: u32 = (1 << SCANNER_TAG_BITS) - 1;

/// Split a raw scanner value into its 8-bit prefix and 16-bit suffix.
///
/// # Errors
///
/// Values above 24 bits have no defined split and are rejected.
pub fn split_decimal_parts(raw: u32) -> Result<(u8, u16)> {
    if raw > SCANNER_TAG_MAX {
        return Err(Error::TagOutOfRange {
            tag: raw,
            max: SCANNER_TAG_MAX,
        });
    }
    Ok(((raw >> 16) as u8, (raw & 0xFFFF) as u16))
}

/// Render a raw scanner value in split-decimal form, e.g.
/// `10978235` (`0xA783BB`) -> `"16733723"` (`167` ++ `33723`).
pub fn split_decimal(raw: u32) -> Result<String> {
    let (prefix, suffix) = split_decimal_parts(raw)?;
    Ok(format!("{}{}", prefix, suffix))
}

/// A tag identifier as the board understands it.
///
/// The `u32` representation bounds the device form to its 8 hex
/// characters by construction; larger values are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagId(u32);

impl TagId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Convert a raw scanner read into the board-facing tag id by way
    /// of the split-decimal reinterpretation.
    ///
    /// # Errors
    ///
    /// Rejects values above 24 bits rather than silently truncating.
    pub fn from_scanner(raw: u32) -> Result<Self> {
        let digits = split_decimal(raw)?;
        let value = digits
            .parse::<u32>()
            .map_err(|_| Error::BadNumericField(digits))?;
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Device form: 8 zero-padded hex characters, byte-reversed.
    pub fn device_form(&self) -> String {
        hex::encode(self.0.to_le_bytes())
    }
}

impl From<u32> for TagId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
