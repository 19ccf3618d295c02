//! Test helpers for integration tests
//!
//! Provides a gateway running on an ephemeral port and a WebSocket client
//! that speaks the wire format.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use broadcaster_common::AppConfig;
use broadcaster_core::{OutboundMessage, RequestFrame, RequestHandlers, SessionId};
use broadcaster_gateway::echo::presence_handlers;
use broadcaster_gateway::transport::codec::{decode_response, encode_request};
use broadcaster_gateway::{create_app, create_gateway, run_server, HubHandle, HubStats};
use futures_util::{SinkExt, StreamExt};
use reqwest::{Client, Response};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// How long a client waits for a frame before failing the test
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Path the WebSocket endpoint is mounted on in tests
pub const TEST_ENDPOINT: &str = "/ws";

/// Gateway instance bound to `127.0.0.1` on an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    hub: HubHandle,
    hub_task: Option<JoinHandle<HubStats>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Start a server running the echo application
    pub async fn start() -> Result<Self> {
        Self::start_with(crate::test_handlers()).await
    }

    /// Start a server with custom request handlers and presence notices
    pub async fn start_with(request_handlers: RequestHandlers) -> Result<Self> {
        let (state, hub) = create_gateway(test_config()?, request_handlers, presence_handlers())?;
        let handle = state.hub().clone();
        let hub_task = tokio::spawn(hub.run());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown, signal) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let signal = async move {
                let _ = signal.await;
            };
            run_server(listener, create_app(state), signal).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            hub: handle,
            hub_task: Some(hub_task),
            shutdown: Some(shutdown),
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}{}", self.addr, TEST_ENDPOINT)
    }

    pub fn hub(&self) -> &HubHandle {
        &self.hub
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Open a WebSocket and wait for the session's own join notice
    ///
    /// Connect clients one at a time: every earlier client receives the new
    /// session's notice too.
    pub async fn join(&self) -> Result<WsClient> {
        let (stream, _) = connect_async(self.ws_url()).await?;
        let mut client = WsClient {
            id: SessionId::nil(),
            stream,
        };

        let notice = client.recv_text().await?;
        client.id = notice
            .strip_prefix("JOINED ")
            .context("first message was not a join notice")?
            .parse()?;

        Ok(client)
    }

    /// Shut the hub down and wait for it to stop; HTTP keeps serving
    pub async fn stop_hub(&mut self) -> Result<HubStats> {
        self.hub.shutdown();
        let task = self.hub_task.take().context("hub already stopped")?;
        Ok(tokio::time::timeout(RECV_TIMEOUT, task).await??)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.hub.shutdown();
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Configuration for a test gateway
pub fn test_config() -> Result<AppConfig> {
    let config = AppConfig::from_lookup(|key| match key {
        "APP_NAME" => Some("broadcaster-test".to_string()),
        "HUB_HOST" => Some("127.0.0.1".to_string()),
        "HUB_PORT" => Some("0".to_string()),
        "HUB_ENDPOINT" => Some(TEST_ENDPOINT.to_string()),
        _ => None,
    })?;

    Ok(config)
}

/// WebSocket client bound to one session
pub struct WsClient {
    pub id: SessionId,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Send a request to `handler_id`
    pub async fn send(&mut self, handler_id: u32, body: &str) -> Result<()> {
        let text = encode_request(&RequestFrame::new(handler_id, body))?;
        self.send_raw(text).await
    }

    /// Send a text frame as is
    pub async fn send_raw(&mut self, text: impl Into<String>) -> Result<()> {
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Next response from the server
    pub async fn recv(&mut self) -> Result<OutboundMessage> {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .context("timed out waiting for a message")?;

            match frame {
                Some(Ok(Message::Text(text))) => return Ok(decode_response(text.as_bytes())?),
                Some(Ok(Message::Close(_))) | None => bail!("connection closed"),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Next response body as text
    pub async fn recv_text(&mut self) -> Result<String> {
        let msg = self.recv().await?;
        msg.body_str()
            .map(str::to_string)
            .context("response body is not UTF-8")
    }

    /// Wait for the server to close the connection, skipping pending responses
    pub async fn closed(&mut self) -> Result<()> {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .context("connection was not closed")?;

            match frame {
                Some(Ok(Message::Close(_)) | Err(_)) | None => return Ok(()),
                Some(Ok(_)) => {}
            }
        }
    }

    /// Close the connection from the client side
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
