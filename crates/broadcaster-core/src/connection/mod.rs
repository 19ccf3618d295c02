//! Connection capability
//!
//! The hub never sees a socket. A transport implements [`Connection`] and owns
//! wire encoding; a session drives it from two tasks at once, one reading and
//! one writing.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::messages::{OutboundMessage, RequestFrame};

/// One bidirectional client connection
///
/// `receive` and `send` are called concurrently from different tasks on the
/// same instance. `receive` must be cancel-safe: a session drops an in-flight
/// `receive` future when it is torn down.
#[async_trait]
pub trait Connection: Send + Sync + 'static {
    /// Next request from the peer, or `Ok(None)` at end of stream
    async fn receive(&self) -> Result<Option<RequestFrame>, TransportError>;

    /// Write one response to the peer
    async fn send(&self, msg: &OutboundMessage) -> Result<(), TransportError>;

    /// Close the connection; called exactly once per session
    async fn close(&self) -> Result<(), TransportError>;
}
