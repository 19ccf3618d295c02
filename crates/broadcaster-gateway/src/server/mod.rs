//! Gateway server setup
//!
//! Routes, hub wiring and the serve loop.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use crate::hub::Hub;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use broadcaster_common::{AppConfig, AppError, AppResult};
use broadcaster_core::{LifecycleHandlers, RequestHandlers};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const HEALTH_PATH: &str = "/health";

/// Create the gateway router with the WebSocket endpoint at `endpoint`
pub fn create_router(endpoint: &str) -> Router<GatewayState> {
    Router::new()
        .route(endpoint, get(gateway_handler))
        .route(HEALTH_PATH, get(health_check))
}

/// Health check endpoint
async fn health_check(State(state): State<GatewayState>) -> impl IntoResponse {
    if state.hub().is_stopped() {
        (StatusCode::SERVICE_UNAVAILABLE, "STOPPED")
    } else {
        (StatusCode::OK, "OK")
    }
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router(&state.config().server.endpoint)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the hub for `config` and the state that serves it
///
/// The returned [`Hub`] must be run (usually spawned) before sessions make
/// any progress.
pub fn create_gateway(
    config: AppConfig,
    request_handlers: RequestHandlers,
    lifecycle_handlers: LifecycleHandlers,
) -> AppResult<(GatewayState, Hub)> {
    if config.server.endpoint == HEALTH_PATH {
        return Err(AppError::hub_setup(format!(
            "endpoint {HEALTH_PATH} is reserved for the health check"
        )));
    }

    let (hub, handle) = Hub::builder()
        .request_handlers(request_handlers)
        .lifecycle_handlers(lifecycle_handlers)
        .config(&config.hub)
        .build()
        .map_err(AppError::hub_setup)?;

    Ok((GatewayState::new(handle, config), hub))
}

/// Serve `app` on `listener` until `shutdown` resolves
pub async fn run_server<F>(listener: TcpListener, app: Router, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Gateway listening");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(AppError::Server)
}

/// Run the gateway with the given handlers until Ctrl-C
///
/// On shutdown every session is drained through the hub before returning.
pub async fn run(
    config: AppConfig,
    request_handlers: RequestHandlers,
    lifecycle_handlers: LifecycleHandlers,
) -> AppResult<()> {
    let addr = config.server.address();

    let (state, hub) = create_gateway(config, request_handlers, lifecycle_handlers)?;
    let handle = state.hub().clone();

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind { addr, source })?;

    let hub_task = tokio::spawn(hub.run());

    let served = run_server(listener, create_app(state), shutdown_signal()).await;

    handle.shutdown();
    let stats = hub_task.await.map_err(AppError::internal)?;

    tracing::info!(
        sessions_joined = stats.sessions_joined,
        requests_handled = stats.requests_handled,
        deliveries = stats.deliveries,
        deliveries_dropped = stats.deliveries_dropped,
        errors = stats.errors,
        "Gateway stopped"
    );

    served
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
