//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Read timeout")]
    ReadTimeout,

    #[error("Empty response from device")]
    EmptyResponse,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

impl Error {
    /// Whether a retransmission of the same frame might succeed.
    ///
    /// The datagram transport is unreliable and this layer never
    /// retries on its own; the caller decides what to do with a
    /// retriable failure.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::ReadTimeout | Self::EmptyResponse | Self::Io(_))
    }
}
