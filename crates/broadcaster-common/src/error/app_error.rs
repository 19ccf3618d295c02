//! Process-level error type
//!
//! Everything that can stop the gateway from starting or serving.

use crate::config::ConfigError;
use crate::telemetry::TracingError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid hub setup: {0}")]
    HubSetup(String),

    // Startup errors
    #[error(transparent)]
    Tracing(#[from] TracingError),

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // Runtime errors
    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),

    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::HubSetup(_) => "HUB_SETUP_ERROR",
            Self::Tracing(_) => "TRACING_ERROR",
            Self::Bind { .. } => "BIND_ERROR",
            Self::Server(_) => "SERVER_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error happened before the gateway started serving
    #[must_use]
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::HubSetup(_) | Self::Tracing(_) | Self::Bind { .. }
        )
    }

    /// Create a hub setup error
    #[must_use]
    pub fn hub_setup(msg: impl std::fmt::Display) -> Self {
        Self::HubSetup(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
