//! # doorlink-core
//!
//! Codec for the access-control board's binary command protocol.
//!
//! This crate provides the low-level protocol primitives:
//! - Fixed 64-byte frame construction and header parsing
//! - Byte-order transform over hex text
//! - Tag number representation conversions
//! - Per-operation payload builders and response parsers
//!
//! Frames are assembled and sliced as hex text (the protocol mixes
//! binary fields with literal digit characters) and only decoded to raw
//! bytes at the transport boundary.

pub mod clock;
pub mod constants;
pub mod error;
pub mod event;
pub mod frame;
pub mod hexstr;
pub mod tag;
pub mod user;
pub mod verb;

pub use error::{Error, Result};
pub use frame::{Frame, Prelude, Response, SerialNumber};
pub use tag::TagId;
pub use verb::Verb;

pub use constants::{FRAME_SIZE, LATEST_EVENT, PREAMBLE};
