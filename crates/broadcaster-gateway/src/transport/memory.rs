//! In-process loopback transport
//!
//! [`memory_connection`] returns the server half, handed to the hub, and the
//! client half, driven by a test or an embedding application. The client's
//! response queue is bounded, so a client that stops reading behaves like a
//! slow peer and blocks the session's write pump.

use async_trait::async_trait;
use broadcaster_core::{Connection, HandlerId, OutboundMessage, RequestFrame, TransportError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Responses a client can hold before writes to it block
pub const DEFAULT_CLIENT_CAPACITY: usize = 64;

type Inbound = Result<RequestFrame, TransportError>;

/// Create a connected pair with the default client capacity
pub fn memory_connection() -> (MemoryConnection, MemoryClient) {
    memory_connection_with_capacity(DEFAULT_CLIENT_CAPACITY)
}

/// Create a connected pair whose client holds at most `capacity` unread responses
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn memory_connection_with_capacity(capacity: usize) -> (MemoryConnection, MemoryClient) {
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel(capacity);
    let closes = Arc::new(AtomicUsize::new(0));
    let fail_next_send = Arc::new(AtomicBool::new(false));

    let connection = MemoryConnection {
        requests: Mutex::new(request_rx),
        responses: response_tx,
        closes: closes.clone(),
        fail_next_send: fail_next_send.clone(),
    };
    let client = MemoryClient {
        requests: Some(request_tx),
        responses: response_rx,
        closes,
        fail_next_send,
    };

    (connection, client)
}

/// Server half of a loopback pair
pub struct MemoryConnection {
    requests: Mutex<mpsc::UnboundedReceiver<Inbound>>,
    responses: mpsc::Sender<OutboundMessage>,
    closes: Arc<AtomicUsize>,
    fail_next_send: Arc<AtomicBool>,
}

#[async_trait]
impl Connection for MemoryConnection {
    async fn receive(&self) -> Result<Option<RequestFrame>, TransportError> {
        match self.requests.lock().await.recv().await {
            Some(Ok(frame)) => Ok(Some(frame)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    async fn send(&self, msg: &OutboundMessage) -> Result<(), TransportError> {
        if self.closes.load(Ordering::SeqCst) > 0 {
            return Err(TransportError::Closed);
        }
        if self.fail_next_send.swap(false, Ordering::SeqCst) {
            return Err(TransportError::io("injected send failure"));
        }

        self.responses
            .send(msg.clone())
            .await
            .map_err(|_| TransportError::Closed)
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl std::fmt::Debug for MemoryConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryConnection")
            .field("closes", &self.closes.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Client half of a loopback pair
#[derive(Debug)]
pub struct MemoryClient {
    requests: Option<mpsc::UnboundedSender<Inbound>>,
    responses: mpsc::Receiver<OutboundMessage>,
    closes: Arc<AtomicUsize>,
    fail_next_send: Arc<AtomicBool>,
}

impl MemoryClient {
    /// Send a request; returns `false` once the client has disconnected or
    /// the server half is gone
    pub fn send(&self, handler_id: impl Into<HandlerId>, body: impl Into<Vec<u8>>) -> bool {
        self.push(Ok(RequestFrame::new(handler_id, body)))
    }

    /// Make the server's next `receive` fail with `err`
    pub fn inject_error(&self, err: TransportError) -> bool {
        self.push(Err(err))
    }

    /// Make the server's next `send` fail with an I/O error; the message is lost
    pub fn fail_next_send(&self) {
        self.fail_next_send.store(true, Ordering::SeqCst);
    }

    /// End the request stream; the server sees end-of-stream once earlier
    /// requests are read
    pub fn disconnect(&mut self) {
        self.requests = None;
    }

    /// Next response, or `None` once the server half is gone and drained
    pub async fn recv(&mut self) -> Option<OutboundMessage> {
        self.responses.recv().await
    }

    pub fn try_recv(&mut self) -> Option<OutboundMessage> {
        self.responses.try_recv().ok()
    }

    pub fn is_closed(&self) -> bool {
        self.close_count() > 0
    }

    /// How many times the server closed the connection
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    fn push(&self, item: Inbound) -> bool {
        self.requests.as_ref().is_some_and(|tx| tx.send(item).is_ok())
    }
}
