//! WebSocket transport
//!
//! Adapts an upgraded axum WebSocket to [`Connection`]. The socket is split so
//! the read pump and the write pump each lock only their own half.

use super::codec;
use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use broadcaster_core::{Connection, OutboundMessage, RequestFrame, TransportError};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::Mutex;

pub struct WebSocketConnection {
    sink: Mutex<SplitSink<WebSocket, Message>>,
    stream: Mutex<SplitStream<WebSocket>>,
}

impl WebSocketConnection {
    pub fn new(socket: WebSocket) -> Self {
        let (sink, stream) = socket.split();
        Self {
            sink: Mutex::new(sink),
            stream: Mutex::new(stream),
        }
    }
}

#[async_trait]
impl Connection for WebSocketConnection {
    async fn receive(&self) -> Result<Option<RequestFrame>, TransportError> {
        let mut stream = self.stream.lock().await;

        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => return codec::decode_request(text.as_bytes()).map(Some),
                Some(Ok(Message::Binary(data))) => return codec::decode_request(&data).map(Some),
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                    // Pong is handled automatically by axum
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Err(e)) => return Err(TransportError::io(e)),
            }
        }
    }

    async fn send(&self, msg: &OutboundMessage) -> Result<(), TransportError> {
        let json = codec::encode_response(msg)?;
        self.sink
            .lock()
            .await
            .send(Message::Text(json.into()))
            .await
            .map_err(TransportError::io)
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.sink.lock().await.close().await.map_err(TransportError::io)
    }
}

impl std::fmt::Debug for WebSocketConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSocketConnection").finish_non_exhaustive()
    }
}
