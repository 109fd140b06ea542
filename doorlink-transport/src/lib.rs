//! Transport layer for the board protocol
//!
//! One transaction is one datagram out and one datagram back; there is
//! no session, no sequence numbering and no retry at this layer. The
//! protocol carries no request/response correlation, so a single client
//! must serialize its transactions — `exchange` takes `&mut self` to
//! make overlapping calls on one transport unrepresentable.

pub mod error;
pub mod udp;

pub use error::{Error, Result};
pub use udp::UdpTransport;

use async_trait::async_trait;
use bytes::BytesMut;

/// One synchronous send-then-receive round trip.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request datagram and await its reply.
    async fn exchange(&mut self, data: &[u8]) -> Result<BytesMut>;

    /// Get remote address
    fn remote_addr(&self) -> String;
}
