//! UDP transport for the access-control board
//!
//! The board speaks plain UDP with fixed 64-byte frames. Each exchange
//! binds a fresh ephemeral socket, sends one datagram, awaits one reply
//! under a timeout, and releases the socket — the board keeps no
//! connection state, so neither do we.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use crate::{error::*, Transport};

/// Receive buffer size. Generously above the 64-byte frame: some
/// firmware pads its reply.
const RECV_BUFFER_SIZE: usize = 2048;

/// UDP transport for the access-control board
pub struct UdpTransport {
    addr: String,
    port: u16,
    remote_addr: Option<SocketAddr>,
    read_timeout: Duration,
}

impl UdpTransport {
    /// Create new UDP transport
    pub fn new(addr: impl Into<String>, port: u16) -> Self {
        Self {
            addr: addr.into(),
            port,
            remote_addr: None,
            read_timeout: Duration::from_secs(5),
        }
    }

    /// Set read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Resolve address to SocketAddr
    async fn resolve_addr(&mut self) -> Result<SocketAddr> {
        if let Some(addr) = self.remote_addr {
            return Ok(addr);
        }

        let addr_str = format!("{}:{}", self.addr, self.port);

        let addrs: Vec<SocketAddr> = tokio::net::lookup_host(&addr_str)
            .await
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", addr_str, e)))?
            .collect();

        let addr = addrs
            .first()
            .ok_or_else(|| Error::InvalidAddress(format!("No addresses found for {}", addr_str)))?;

        self.remote_addr = Some(*addr);
        Ok(*addr)
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn exchange(&mut self, data: &[u8]) -> Result<BytesMut> {
        let remote = self.resolve_addr().await?;

        let socket = UdpSocket::bind("0.0.0.0:0").await.map_err(Error::Io)?;
        socket.connect(remote).await.map_err(Error::Io)?;

        trace!(
            "Sending {} bytes to {}: {:02X?}",
            data.len(),
            remote,
            &data[..data.len().min(16)]
        );

        socket.send(data).await.map_err(Error::Io)?;

        let mut buf = BytesMut::with_capacity(RECV_BUFFER_SIZE);
        buf.resize(RECV_BUFFER_SIZE, 0);

        let n = timeout(self.read_timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| {
                warn!(
                    "No response from {} within {:?}",
                    remote, self.read_timeout
                );
                Error::ReadTimeout
            })?
            .map_err(|e| {
                warn!("Receive error from {}: {}", remote, e);
                Error::Io(e)
            })?;

        if n == 0 {
            warn!("Received 0 bytes from {}", remote);
            return Err(Error::EmptyResponse);
        }

        buf.truncate(n);

        debug!("Exchanged {} bytes out, {} bytes back with {}", data.len(), n, remote);

        Ok(buf)
    }

    fn remote_addr(&self) -> String {
        self.remote_addr
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| format!("{}:{}", self.addr, self.port))
    }
}
