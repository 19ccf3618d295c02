//! The coordinator
//!
//! `Hub` is the only owner of the live-session set. It processes one event at
//! a time from a single queue, so joins, leaves, handler calls and fan-outs
//! happen in one total order and the set needs no lock.

use super::builder::HubBuilder;
use super::events::HubEvent;
use super::handle::HubHandle;
use super::stats::HubStats;
use crate::session::{Delivery, SessionHandle};
use broadcaster_core::{
    Cast, HandlerId, HandlerOrigin, HubError, InboundMessage, LifecycleEvent, LifecycleHandlers,
    OutboundMessage, OverflowPolicy, RequestHandlers, SessionId,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// The broadcast hub's event loop
pub struct Hub {
    events: mpsc::UnboundedReceiver<HubEvent>,
    /// Loopback for broadcasts produced while handling an event
    loopback: mpsc::UnboundedSender<HubEvent>,
    request_handlers: RequestHandlers,
    lifecycle_handlers: LifecycleHandlers,
    overflow_policy: OverflowPolicy,
    /// Live sessions in registration order
    sessions: Vec<SessionHandle>,
    stats: HubStats,
}

impl Hub {
    #[must_use]
    pub fn builder() -> HubBuilder {
        HubBuilder::new()
    }

    pub(crate) fn new(
        request_handlers: RequestHandlers,
        lifecycle_handlers: LifecycleHandlers,
        outbound_capacity: usize,
        overflow_policy: OverflowPolicy,
    ) -> (Self, HubHandle) {
        let (tx, rx) = mpsc::unbounded_channel();

        let hub = Self {
            events: rx,
            loopback: tx.clone(),
            request_handlers,
            lifecycle_handlers,
            overflow_policy,
            sessions: Vec::new(),
            stats: HubStats::default(),
        };

        (hub, HubHandle::new(tx, outbound_capacity))
    }

    /// Process events until a shutdown event has drained every session
    pub async fn run(mut self) -> HubStats {
        tracing::info!("Hub started");

        while let Some(event) = self.events.recv().await {
            tracing::trace!(event = event.name(), "Hub event");

            match event {
                HubEvent::Join(session) => self.on_join(session).await,
                HubEvent::Leave(id) => self.on_leave(id).await,
                HubEvent::Error(err) => self.on_error(err),
                HubEvent::Inbound(msg) => self.on_inbound(msg).await,
                HubEvent::Broadcast(msg) => self.fan_out(msg),
                HubEvent::Shutdown => {
                    self.on_shutdown().await;
                    break;
                }
            }
        }

        self.discard_pending();

        tracing::info!(
            sessions_joined = self.stats.sessions_joined,
            sessions_left = self.stats.sessions_left,
            broadcasts = self.stats.broadcasts,
            errors = self.stats.errors,
            "Hub stopped"
        );

        self.stats
    }

    async fn on_join(&mut self, session: SessionHandle) {
        let id = session.id();
        self.sessions.push(session);
        self.stats.sessions_joined += 1;

        tracing::info!(session_id = %id, live = self.sessions.len(), "Session joined");

        for msg in self.emit(LifecycleEvent::joined(id)).await {
            self.enqueue(msg);
        }
    }

    async fn on_leave(&mut self, id: SessionId) {
        let Some(index) = self.sessions.iter().position(|s| s.id() == id) else {
            tracing::debug!(session_id = %id, "Leave for unknown session ignored");
            return;
        };

        for msg in self.depart(index).await {
            self.enqueue(msg);
        }
    }

    /// Synthesize a leave for every live session, oldest first
    async fn on_shutdown(&mut self) {
        tracing::info!(live = self.sessions.len(), "Hub shutting down");

        while !self.sessions.is_empty() {
            // Nothing is processed after shutdown, so Left responses go
            // straight to the sessions that are still live.
            for msg in self.depart(0).await {
                self.fan_out(msg);
            }
        }
    }

    /// Remove a session, run the Left handler, then tear the session down
    async fn depart(&mut self, index: usize) -> Vec<OutboundMessage> {
        let session = self.sessions.remove(index);
        let id = session.id();
        self.stats.sessions_left += 1;

        tracing::info!(
            session_id = %id,
            connected_secs = session.connected_secs(),
            live = self.sessions.len(),
            "Session left"
        );

        let responses = self.emit(LifecycleEvent::left(id)).await;
        session.teardown();
        responses
    }

    async fn on_inbound(&mut self, msg: InboundMessage) {
        let handler_id = msg.handler_id();
        let sender_id = msg.sender_id();

        let Some(handler) = self.request_handlers.get(handler_id).cloned() else {
            self.on_error(HubError::UndefinedHandler(handler_id));
            return;
        };

        self.stats.requests_handled += 1;

        match handler.handle(&msg).await {
            Ok(responses) => {
                tracing::trace!(
                    session_id = %sender_id,
                    handler_id = %handler_id,
                    responses = responses.len(),
                    "Request handled"
                );
                for response in responses {
                    self.enqueue(response.stamped(sender_id, handler_id));
                }
            }
            Err(e) => self.on_error(HubError::handler_failure(HandlerOrigin::Request(handler_id), e)),
        }
    }

    /// Run the lifecycle handler for `event`, returning its stamped responses
    async fn emit(&mut self, event: LifecycleEvent) -> Vec<OutboundMessage> {
        let Some(handler) = self.lifecycle_handlers.get(event.kind).cloned() else {
            return Vec::new();
        };

        match handler.handle(&event).await {
            Ok(responses) => responses
                .into_iter()
                .map(|msg| msg.stamped(event.session_id, HandlerId::LIFECYCLE))
                .collect(),
            Err(e) => {
                self.on_error(HubError::handler_failure(HandlerOrigin::Lifecycle(event.kind), e));
                Vec::new()
            }
        }
    }

    fn enqueue(&self, msg: OutboundMessage) {
        // The hub holds the receiver, so this cannot fail while running.
        let _ = self.loopback.send(HubEvent::Broadcast(msg));
    }

    /// Resolve targets against the current live set and hand off without waiting
    fn fan_out(&mut self, msg: OutboundMessage) {
        self.stats.broadcasts += 1;

        let msg = Arc::new(msg);
        let mut delivered = 0u64;
        let mut saturated = Vec::new();

        for session in self.sessions.iter().filter(|s| is_target(&msg, s.id())) {
            match session.deliver(Arc::clone(&msg)) {
                Delivery::Queued => delivered += 1,
                Delivery::Full => saturated.push(session.id()),
                // Already tearing down; its leave is on the way.
                Delivery::Closed => {}
            }
        }

        self.stats.deliveries += delivered;

        tracing::trace!(
            session_id = %msg.sender_id,
            handler_id = %msg.handler_id,
            cast = %msg.cast.cast_type(),
            delivered,
            "Broadcast resolved"
        );

        for id in saturated {
            self.on_overflow(id);
        }
    }

    fn on_overflow(&mut self, id: SessionId) {
        self.stats.deliveries_dropped += 1;
        self.on_error(HubError::Overflow { session_id: id });

        if self.overflow_policy == OverflowPolicy::Disconnect {
            // Repeated leaves for the same session are no-ops.
            let _ = self.loopback.send(HubEvent::Leave(id));
        }
    }

    fn on_error(&mut self, err: HubError) {
        self.stats.errors += 1;
        tracing::warn!(code = err.code(), error = %err, "Hub error");
    }

    /// Stop accepting events and tear down sessions whose join never ran
    fn discard_pending(&mut self) {
        self.events.close();

        let mut discarded = 0usize;
        while let Ok(event) = self.events.try_recv() {
            if let HubEvent::Join(session) = event {
                session.teardown();
            }
            discarded += 1;
        }

        if discarded > 0 {
            tracing::debug!(discarded, "Discarded events queued after shutdown");
        }
    }
}

impl std::fmt::Debug for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("request_handlers", &self.request_handlers)
            .field("lifecycle_handlers", &self.lifecycle_handlers)
            .field("overflow_policy", &self.overflow_policy)
            .field("sessions", &self.sessions.len())
            .finish()
    }
}

/// Whether the session `id` is selected by the message's cast
fn is_target(msg: &OutboundMessage, id: SessionId) -> bool {
    match &msg.cast {
        Cast::All => true,
        Cast::SenderOnly => id == msg.sender_id,
        Cast::Exclusive(targets) => targets.contains(&id),
    }
}
