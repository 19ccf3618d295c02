//! Per-connection session
//!
//! A session bridges one [`Connection`] to the hub with two pumps:
//!
//! - the read pump receives requests, stamps the sender and queues them on
//!   the hub; end of stream (or a terminal read error) reports a leave
//! - the write pump drains the outbound queue the hub delivers into and
//!   writes each message to the connection
//!
//! Neither pump ever sees the live-session set. The connection is closed
//! exactly once, after both pumps have exited.

use crate::hub::HubHandle;
use broadcaster_core::{Connection, HubError, InboundMessage, OutboundMessage, SessionId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// One connected client and its two pumps
pub struct Session {
    id: SessionId,
    connection: Arc<dyn Connection>,
    outbound: mpsc::Receiver<Arc<OutboundMessage>>,
    teardown: Arc<watch::Sender<bool>>,
    hub: HubHandle,
}

impl Session {
    pub(crate) fn new(
        id: SessionId,
        connection: Arc<dyn Connection>,
        outbound: mpsc::Receiver<Arc<OutboundMessage>>,
        teardown: Arc<watch::Sender<bool>>,
        hub: HubHandle,
    ) -> Self {
        Self {
            id,
            connection,
            outbound,
            teardown,
            hub,
        }
    }

    /// The ID the hub knows this session by
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Run both pumps until the session is torn down, then close the connection
    ///
    /// The session was registered with the hub when it was created, so the
    /// join is always ordered before anything this session sends.
    pub async fn start(self) {
        let Self {
            id,
            connection,
            outbound,
            teardown,
            hub,
        } = self;

        tracing::debug!(session_id = %id, "Session started");

        let mut read_task = tokio::spawn(read_pump(
            id,
            connection.clone(),
            hub.clone(),
            teardown.clone(),
        ));
        let mut write_task = tokio::spawn(write_pump(id, connection.clone(), outbound, hub.clone(), teardown.clone()));

        // A pump that dies leaves the other one waiting on teardown, so the
        // session is handed back to the hub as soon as either aborts.
        let (first, rest) = tokio::select! {
            result = &mut read_task => (result, write_task),
            result = &mut write_task => (result, read_task),
        };
        if let Err(e) = first {
            pump_aborted(id, &e, &hub, &teardown);
        }
        if let Err(e) = rest.await {
            pump_aborted(id, &e, &hub, &teardown);
        }

        if let Err(e) = connection.close().await {
            tracing::debug!(session_id = %id, error = %e, "Connection close failed");
        }

        tracing::debug!(session_id = %id, "Session closed");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("torn_down", &*self.teardown.borrow())
            .finish()
    }
}

/// Resolves once teardown has been raised (or its sender is gone)
async fn torn_down(stop: &mut watch::Receiver<bool>) {
    let _ = stop.wait_for(|torn_down| *torn_down).await;
}

async fn read_pump(
    id: SessionId,
    connection: Arc<dyn Connection>,
    hub: HubHandle,
    teardown: Arc<watch::Sender<bool>>,
) {
    let mut stop = teardown.subscribe();

    loop {
        let received = tokio::select! {
            () = torn_down(&mut stop) => break,
            received = connection.receive() => received,
        };

        match received {
            Ok(Some(frame)) => {
                let msg = InboundMessage::from_frame(id, frame);
                tracing::trace!(session_id = %id, handler_id = %msg.handler_id(), "Request received");

                if hub.submit(msg).is_err() {
                    tracing::debug!(session_id = %id, "Hub stopped, dropping session");
                    teardown.send_replace(true);
                    break;
                }
            }
            Ok(None) => {
                tracing::info!(session_id = %id, "Client closed connection");
                leave(id, &hub, &teardown);
                break;
            }
            Err(e) if e.is_terminal() => {
                hub.report(HubError::transport(id, e));
                leave(id, &hub, &teardown);
                break;
            }
            Err(e) => hub.report(HubError::transport(id, e)),
        }
    }
}

async fn write_pump(
    id: SessionId,
    connection: Arc<dyn Connection>,
    mut outbound: mpsc::Receiver<Arc<OutboundMessage>>,
    hub: HubHandle,
    teardown: Arc<watch::Sender<bool>>,
) {
    let mut stop = teardown.subscribe();

    loop {
        // Messages already queued are written before teardown is honoured.
        let msg = tokio::select! {
            biased;
            msg = outbound.recv() => match msg {
                Some(msg) => msg,
                None => break,
            },
            () = torn_down(&mut stop) => break,
        };

        // A send stuck on a slow peer is abandoned when the session is torn down.
        tokio::select! {
            biased;
            result = connection.send(&msg) => {
                if let Err(e) = result {
                    hub.report(HubError::transport(id, e));
                }
            }
            () = torn_down(&mut stop) => break,
        }
    }
}

fn pump_aborted(id: SessionId, err: &tokio::task::JoinError, hub: &HubHandle, teardown: &watch::Sender<bool>) {
    tracing::error!(session_id = %id, error = %err, "Session pump aborted");
    leave(id, hub, teardown);
}

/// Ask the hub to deregister this session, or tear down locally if it is gone
fn leave(id: SessionId, hub: &HubHandle, teardown: &watch::Sender<bool>) {
    if hub.leave(id).is_err() {
        teardown.send_replace(true);
    }
}
