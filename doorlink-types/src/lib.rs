//! Type definitions for doorlink

pub mod access_record;
pub mod error;
pub mod user_record;

pub use access_record::AccessRecord;
pub use error::{Error, Result};
pub use user_record::{SystemsMask, UserRecord, ValidityWindow};
