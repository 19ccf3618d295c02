//! WebSocket upgrade handler

use crate::server::GatewayState;
use crate::transport::WebSocketConnection;
use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Upgrade the request and run a session for the socket
///
/// Refused with 503 once the hub has stopped.
pub async fn gateway_handler(State(state): State<GatewayState>, ws: WebSocketUpgrade) -> Response {
    if state.hub().is_stopped() {
        return (StatusCode::SERVICE_UNAVAILABLE, "hub stopped").into_response();
    }

    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let session = state.hub().register_session(WebSocketConnection::new(socket));

    tracing::info!(session_id = %session.id(), "WebSocket connection established");

    session.start().await;
}
