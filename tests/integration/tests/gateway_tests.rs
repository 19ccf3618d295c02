//! Gateway Integration Tests
//!
//! Self-contained: each test starts its own gateway on an ephemeral port.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use broadcaster_core::{Cast, HandlerId};
use integration_tests::{echo_id, TestServer, BROKEN, WHISPER};
use reqwest::StatusCode;
use tokio_tungstenite::connect_async;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_stopped_hub_refuses_connections() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    server.stop_hub().await.unwrap();

    let response = server.get("/health").await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(connect_async(server.ws_url()).await.is_err());
}

// ============================================================================
// Broadcast Tests
// ============================================================================

#[tokio::test]
async fn test_echo_scenario() {
    let mut server = TestServer::start().await.expect("Failed to start server");

    let mut a = server.join().await.unwrap();
    let mut b = server.join().await.unwrap();
    assert_eq!(a.recv_text().await.unwrap(), format!("JOINED {}", b.id));
    let mut c = server.join().await.unwrap();
    assert_eq!(a.recv_text().await.unwrap(), format!("JOINED {}", c.id));
    assert_eq!(b.recv_text().await.unwrap(), format!("JOINED {}", c.id));

    c.send(echo_id(), "echo").await.unwrap();
    for client in [&mut a, &mut b, &mut c] {
        let msg = client.recv().await.unwrap();
        assert_eq!(msg.body_str(), Some("echo"));
        assert_eq!(msg.handler_id, HandlerId::new(echo_id()));
        assert_eq!(msg.cast, Cast::All);
    }

    let left = b.id;
    b.close().await.unwrap();
    assert_eq!(a.recv_text().await.unwrap(), format!("LEFT {left}"));
    assert_eq!(c.recv_text().await.unwrap(), format!("LEFT {left}"));

    a.send(echo_id(), "again").await.unwrap();
    assert_eq!(a.recv_text().await.unwrap(), "again");
    assert_eq!(c.recv_text().await.unwrap(), "again");

    let stats = server.stop_hub().await.unwrap();
    assert_eq!(stats.sessions_joined, 3);
    assert_eq!(stats.sessions_left, 3);
}

#[tokio::test]
async fn test_echo_is_stamped_with_sender() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut a = server.join().await.unwrap();
    let mut b = server.join().await.unwrap();
    a.recv_text().await.unwrap();

    b.send(echo_id(), "from b").await.unwrap();
    assert_eq!(a.recv().await.unwrap().sender_id, b.id);
    assert_eq!(b.recv().await.unwrap().sender_id, b.id);
}

#[tokio::test]
async fn test_whisper_reaches_sender_only() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut a = server.join().await.unwrap();
    let mut b = server.join().await.unwrap();
    a.recv_text().await.unwrap();

    b.send(WHISPER, "secret").await.unwrap();
    b.send(echo_id(), "public").await.unwrap();

    assert_eq!(b.recv_text().await.unwrap(), "secret");
    assert_eq!(b.recv_text().await.unwrap(), "public");
    assert_eq!(a.recv_text().await.unwrap(), "public");
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_bad_requests_keep_session_open() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let mut a = server.join().await.unwrap();

    a.send_raw("this is not json").await.unwrap();
    a.send(42, "no such handler").await.unwrap();
    a.send(BROKEN, "").await.unwrap();
    a.send(echo_id(), "still here").await.unwrap();
    assert_eq!(a.recv_text().await.unwrap(), "still here");

    let stats = server.stop_hub().await.unwrap();
    assert_eq!(stats.errors, 3);
    assert_eq!(stats.broadcasts, 2);
}

// ============================================================================
// Shutdown Tests
// ============================================================================

#[tokio::test]
async fn test_shutdown_closes_every_session() {
    let mut server = TestServer::start().await.expect("Failed to start server");
    let mut a = server.join().await.unwrap();
    let mut b = server.join().await.unwrap();

    let stats = server.stop_hub().await.unwrap();
    assert_eq!(stats.sessions_left, 2);
    assert!(server.hub().is_stopped());

    a.closed().await.unwrap();
    b.closed().await.unwrap();
}
