//! Cloneable handle to a running hub
//!
//! The handle only enqueues events; it never reads hub state. Sessions keep
//! a clone to report requests, errors and their own departure.

use super::error::HubStopped;
use super::events::HubEvent;
use crate::session::{Session, SessionHandle};
use broadcaster_core::{Connection, HubError, InboundMessage, OutboundMessage, SessionId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

#[derive(Clone)]
pub struct HubHandle {
    events: mpsc::UnboundedSender<HubEvent>,
    outbound_capacity: usize,
}

impl HubHandle {
    pub(crate) fn new(events: mpsc::UnboundedSender<HubEvent>, outbound_capacity: usize) -> Self {
        Self {
            events,
            outbound_capacity,
        }
    }

    /// Bind a connection to a new session and queue its join
    ///
    /// Returns immediately; the join is processed by the hub in order with
    /// every other event. Call [`Session::start`] to run the session. If the
    /// hub is already stopped the session comes back torn down, so `start`
    /// only closes the connection.
    pub fn register_session(&self, connection: impl Connection) -> Session {
        self.register_shared(Arc::new(connection))
    }

    /// Like [`register_session`](Self::register_session) for a shared connection
    pub fn register_shared(&self, connection: Arc<dyn Connection>) -> Session {
        let id = SessionId::generate();
        let (outbound_tx, outbound_rx) = mpsc::channel(self.outbound_capacity);
        let (teardown, _) = watch::channel(false);
        let teardown = Arc::new(teardown);

        let handle = SessionHandle::new(id, outbound_tx, teardown.clone());
        if self.events.send(HubEvent::Join(handle)).is_err() {
            tracing::warn!(session_id = %id, "Hub stopped, rejecting session");
            teardown.send_replace(true);
        }

        Session::new(id, connection, outbound_rx, teardown, self.clone())
    }

    /// Queue a server-originated message for fan-out
    ///
    /// The message is routed as given: its sender and handler fields are not
    /// stamped, so `Cast::SenderOnly` only reaches the session in `sender_id`.
    pub fn broadcast(&self, msg: OutboundMessage) -> Result<(), HubStopped> {
        self.send(HubEvent::Broadcast(msg))
    }

    /// Ask the hub to drain every session and stop
    ///
    /// Returns `false` if the hub had already stopped.
    pub fn shutdown(&self) -> bool {
        self.send(HubEvent::Shutdown).is_ok()
    }

    /// Whether the hub has stopped accepting events
    pub fn is_stopped(&self) -> bool {
        self.events.is_closed()
    }

    pub(crate) fn submit(&self, msg: InboundMessage) -> Result<(), HubStopped> {
        self.send(HubEvent::Inbound(msg))
    }

    pub(crate) fn leave(&self, id: SessionId) -> Result<(), HubStopped> {
        self.send(HubEvent::Leave(id))
    }

    /// Forward an error to the hub's sink; logged here if the hub is gone
    pub(crate) fn report(&self, err: HubError) {
        if let Err(mpsc::error::SendError(HubEvent::Error(err))) = self.events.send(HubEvent::Error(err)) {
            tracing::warn!(code = err.code(), error = %err, "Hub error after shutdown");
        }
    }

    fn send(&self, event: HubEvent) -> Result<(), HubStopped> {
        self.events.send(event).map_err(|_| HubStopped)
    }
}

impl std::fmt::Debug for HubHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubHandle")
            .field("outbound_capacity", &self.outbound_capacity)
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
