//! Synchronous request/response client for the backend transaction engine.
//!
//! Each call dials a fresh TCP connection, writes one framed request,
//! reads exactly one reply line, and closes. No connection reuse — this
//! avoids head-of-line blocking between concurrent calls at the cost of a
//! dial per command. No retry and no timeout are applied; a hung backend
//! blocks only the request that dialed it.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

use tradewire_types::{constants, Result, TwError};

use crate::wire;

/// Transport seam to the backend engine. Implemented by [`Transmitter`]
/// for production and by in-process fakes in tests.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send one framed command and return the backend's reply line with
    /// the terminator stripped.
    ///
    /// # Errors
    /// Every failure mode — connect, write, read, connection closed early,
    /// or the backend's `"-1"` sentinel — surfaces as
    /// [`TwError::BackendError`]. Callers see exactly one failure signal.
    async fn send(&self, txn: u64, payload: &str) -> Result<String>;
}

/// TCP line-protocol client. Cheap to clone; holds only the address.
#[derive(Debug, Clone)]
pub struct Transmitter {
    backend_addr: String,
}

impl Transmitter {
    #[must_use]
    pub fn new(backend_addr: &str) -> Self {
        Self {
            backend_addr: backend_addr.to_string(),
        }
    }

    fn backend_error() -> TwError {
        TwError::BackendError {
            reason: constants::BAD_BACKEND_RESPONSE.to_string(),
        }
    }
}

#[async_trait]
impl Backend for Transmitter {
    async fn send(&self, txn: u64, payload: &str) -> Result<String> {
        let frame = wire::encode_frame(txn, payload);

        let mut stream = TcpStream::connect(&self.backend_addr).await.map_err(|err| {
            debug!(txn, addr = %self.backend_addr, %err, "backend dial failed");
            Self::backend_error()
        })?;

        stream.write_all(frame.as_bytes()).await.map_err(|err| {
            debug!(txn, %err, "backend write failed");
            Self::backend_error()
        })?;

        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        let n = reader.read_line(&mut line).await.map_err(|err| {
            debug!(txn, %err, "backend read failed");
            Self::backend_error()
        })?;
        if n == 0 {
            debug!(txn, "backend closed connection without replying");
            return Err(Self::backend_error());
        }

        wire::decode_reply(&line)
    }
}
