//! # doorlink
//!
//! Client library for a door access-control board driven over UDP with
//! fixed 64-byte command frames.
//!
//! ## Features
//!
//! - Type-safe frame codec (verbs, serial numbers, tag conversions)
//! - Async/await API using Tokio, one transaction at a time
//! - Explicit errors for malformed input, transport failure and
//!   device-side rejection
//! - User management, access-event history and clock synchronization
//!
//! ## Quick Start
//!
//! ```no_run
//! use doorlink::{Board, TagId};
//!
//! #[tokio::main]
//! async fn main() -> doorlink::Result<()> {
//!     // Serial number as printed on the board, usually the last four
//!     // bytes of its MAC address
//!     let serial = "00E04C01".parse()?;
//!     let mut board = Board::new("192.168.1.200", 60000, serial);
//!
//!     // Enroll a tag as reported by the RFID scanner
//!     let tag = TagId::from_scanner(10978235)?;
//!     if board.add_user(tag).await? {
//!         println!("Tag {} enrolled", tag);
//!     }
//!
//!     // Pull the five most recent access events
//!     for record in board.access_list(5).await? {
//!         println!("{}", record);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod error;

// Re-exports
pub use board::Board;
pub use error::{Error, Result};

// Re-export types
pub use doorlink_core::{Frame, Prelude, Response, SerialNumber, TagId, Verb};
pub use doorlink_types::{AccessRecord, SystemsMask, UserRecord, ValidityWindow};
