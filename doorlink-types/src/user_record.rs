//! User (tag) records stored on the board

use std::fmt;

use chrono::{Local, Months, NaiveDate};

/// Wire layout for validity dates (`YYYYMMDD`).
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Default validity span for newly added users.
pub const DEFAULT_VALIDITY_YEARS: u32 = 10;

/// One enable/disable flag byte per system class (doors, machines, ...).
///
/// The board treats each of the four payload bytes as an independent
/// boolean; `01` enables the corresponding class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemsMask(pub [u8; 4]);

impl SystemsMask {
    /// Every system class enabled.
    pub const ALL: SystemsMask = SystemsMask([1, 1, 1, 1]);

    /// Every system class disabled.
    pub const NONE: SystemsMask = SystemsMask([0, 0, 0, 0]);

    /// Hex text form as it appears in a request payload (e.g. `01010101`).
    pub fn as_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl Default for SystemsMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for SystemsMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

/// First/last day a user's tag is accepted by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    pub from: NaiveDate,
    pub until: NaiveDate,
}

impl ValidityWindow {
    pub fn new(from: NaiveDate, until: NaiveDate) -> Self {
        Self { from, until }
    }

    /// Default policy: valid from today through ten years out.
    pub fn starting_today() -> Self {
        let from = Local::now().date_naive();
        let until = from + Months::new(12 * DEFAULT_VALIDITY_YEARS);
        Self { from, until }
    }

    /// The sixteen digit characters carried in an add-user payload.
    pub fn wire(&self) -> String {
        format!(
            "{}{}",
            self.from.format(DATE_FORMAT),
            self.until.format(DATE_FORMAT)
        )
    }
}

/// What the board stores against one tag.
///
/// Validity dates stay in their literal `YYYYMMDD` wire form; nothing in
/// this layer needs them as calendar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Tag serial in its decoded decimal form
    pub tag_serial: u32,

    /// First valid day (`YYYYMMDD`)
    pub valid_from: String,

    /// Last valid day (`YYYYMMDD`)
    pub valid_until: String,

    /// Which system classes the tag may operate
    pub systems: SystemsMask,
}

impl fmt::Display for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User[tag={} valid {}..{} systems={}]",
            self.tag_serial, self.valid_from, self.valid_until, self.systems
        )
    }
}
