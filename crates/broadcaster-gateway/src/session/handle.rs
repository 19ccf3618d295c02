//! The hub's view of a session
//!
//! A `SessionHandle` is everything the coordinator holds for a live session:
//! its ID, the sending half of its outbound queue and its teardown flag. It
//! never touches the connection itself.

use broadcaster_core::{OutboundMessage, SessionId};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Outcome of a non-blocking handoff to a session's outbound queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delivery {
    Queued,
    /// The queue is at capacity; the message was not queued
    Full,
    /// The session's write pump is gone
    Closed,
}

pub(crate) struct SessionHandle {
    id: SessionId,
    outbound: mpsc::Sender<Arc<OutboundMessage>>,
    teardown: Arc<watch::Sender<bool>>,
    connected_at: DateTime<Utc>,
}

impl SessionHandle {
    pub(crate) fn new(
        id: SessionId,
        outbound: mpsc::Sender<Arc<OutboundMessage>>,
        teardown: Arc<watch::Sender<bool>>,
    ) -> Self {
        Self {
            id,
            outbound,
            teardown,
            connected_at: Utc::now(),
        }
    }

    pub(crate) fn id(&self) -> SessionId {
        self.id
    }

    /// Seconds since the session was registered
    pub(crate) fn connected_secs(&self) -> i64 {
        (Utc::now() - self.connected_at).num_seconds()
    }

    /// Hand a message to the write pump without waiting
    pub(crate) fn deliver(&self, msg: Arc<OutboundMessage>) -> Delivery {
        match self.outbound.try_send(msg) {
            Ok(()) => Delivery::Queued,
            Err(mpsc::error::TrySendError::Full(_)) => Delivery::Full,
            Err(mpsc::error::TrySendError::Closed(_)) => Delivery::Closed,
        }
    }

    /// Signal both pumps to stop; idempotent
    pub(crate) fn teardown(&self) {
        self.teardown.send_replace(true);
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id)
            .field("connected_at", &self.connected_at)
            .finish()
    }
}
