//! Failures reported by application handlers

use thiserror::Error;

/// Handler failure; the hub discards every response of the failing call
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Handler failed: {0}")]
    Failed(String),

    #[error("Invalid body: {0}")]
    InvalidBody(String),

    #[error("Internal handler error: {0}")]
    Internal(#[source] anyhow::Error),
}

impl HandlerError {
    pub fn failed(msg: impl std::fmt::Display) -> Self {
        Self::Failed(msg.to_string())
    }

    pub fn invalid_body(msg: impl std::fmt::Display) -> Self {
        Self::InvalidBody(msg.to_string())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type returned by request and lifecycle handlers
pub type HandlerResult<T> = Result<T, HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error_shows_cause() {
        let err = HandlerError::internal(anyhow::anyhow!("database unavailable"));
        assert_eq!(err.to_string(), "Internal handler error: database unavailable");
        assert!(std::error::Error::source(&err).is_some());
    }
}
