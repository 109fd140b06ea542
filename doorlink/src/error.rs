//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Protocol codec error: {0}")]
    Core(#[from] doorlink_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] doorlink_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] doorlink_types::Error),

    #[error("Invalid response from board: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Whether retransmitting the transaction might succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_retriable())
    }
}
