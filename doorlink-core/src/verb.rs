//! Command verb definitions
//!
//! One byte in every frame selects the operation. The values are wire
//! constants reverse-engineered from board traffic and must be kept
//! bit-for-bit stable.

use std::fmt;

use crate::error::{Error, Result};

/// Protocol command verbs
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Verb {
    // Clock operations
    SetTime = 0x30,
    GetTime = 0x32,

    // User management
    AddUser = 0x50,
    DeleteUser = 0x52,
    GetUser = 0x5A,

    // Event history
    GetEvent = 0xB0,
    GetEventCount = 0xB4,
}

impl Verb {
    /// Two lowercase hex characters as placed in a frame
    pub fn as_hex(self) -> String {
        format!("{:02x}", self as u8)
    }

    /// Get verb name
    pub fn name(self) -> &'static str {
        match self {
            Self::SetTime => "SET_TIME",
            Self::GetTime => "GET_TIME",
            Self::AddUser => "ADD_USER",
            Self::DeleteUser => "DELETE_USER",
            Self::GetUser => "GET_USER",
            Self::GetEvent => "GET_EVENT",
            Self::GetEventCount => "GET_EVENT_COUNT",
        }
    }
}

impl From<Verb> for u8 {
    fn from(verb: Verb) -> u8 {
        verb as u8
    }
}

impl TryFrom<u8> for Verb {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x30 => Ok(Self::SetTime),
            0x32 => Ok(Self::GetTime),
            0x50 => Ok(Self::AddUser),
            0x52 => Ok(Self::DeleteUser),
            0x5A => Ok(Self::GetUser),
            0xB0 => Ok(Self::GetEvent),
            0xB4 => Ok(Self::GetEventCount),
            _ => Err(Error::UnknownVerb(value)),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_conversion() {
        assert_eq!(u8::from(Verb::AddUser), 0x50);
        assert_eq!(Verb::try_from(0x50).unwrap(), Verb::AddUser);
        assert_eq!(Verb::try_from(0xB4).unwrap(), Verb::GetEventCount);
    }

    #[test]
    fn test_unknown_verb() {
        assert!(matches!(Verb::try_from(0x99), Err(Error::UnknownVerb(0x99))));
    }

    #[test]
    fn test_verb_hex() {
        assert_eq!(Verb::GetUser.as_hex(), "5a");
        assert_eq!(Verb::SetTime.as_hex(), "30");
    }

    #[test]
    fn test_verb_display() {
        assert_eq!(Verb::GetEvent.to_string(), "GET_EVENT(0xB0)");
    }
}
