//! Broadcast gateway entry point
//!
//! Run with:
//! ```bash
//! cargo run -p broadcaster-gateway
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`). The
//! binary serves the echo application.

use broadcaster_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use broadcaster_gateway::echo::{echo_handlers, presence_handlers};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.server.address(),
        endpoint = %config.server.endpoint,
        "Starting broadcast gateway"
    );

    if let Err(e) = broadcaster_gateway::run(config, echo_handlers(), presence_handlers()).await {
        error!(code = e.error_code(), error = %e, "Gateway failed");
        std::process::exit(1);
    }
}
