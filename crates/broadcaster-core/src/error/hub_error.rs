//! Errors funneled into the hub's error sink

use super::{HandlerError, TransportError};
use crate::events::LifecycleKind;
use crate::value_objects::{HandlerId, SessionId};
use std::fmt;
use thiserror::Error;

/// Which handler produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOrigin {
    Request(HandlerId),
    Lifecycle(LifecycleKind),
}

impl fmt::Display for HandlerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(id) => write!(f, "request handler {id}"),
            Self::Lifecycle(kind) => write!(f, "{kind} lifecycle handler"),
        }
    }
}

/// Runtime error observed by the hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Transport error on session {session_id}: {source}")]
    Transport {
        session_id: SessionId,
        #[source]
        source: TransportError,
    },

    #[error("Undefined message handler specified `{0}`")]
    UndefinedHandler(HandlerId),

    #[error("{origin} failed: {source}")]
    HandlerFailure {
        origin: HandlerOrigin,
        #[source]
        source: HandlerError,
    },

    #[error("Outbound queue of session {session_id} is full")]
    Overflow { session_id: SessionId },
}

impl HubError {
    pub fn transport(session_id: SessionId, source: TransportError) -> Self {
        Self::Transport { session_id, source }
    }

    pub fn handler_failure(origin: HandlerOrigin, source: HandlerError) -> Self {
        Self::HandlerFailure { origin, source }
    }

    /// Stable code for structured logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "TRANSPORT_ERROR",
            Self::UndefinedHandler(_) => "UNDEFINED_HANDLER",
            Self::HandlerFailure { .. } => "HANDLER_FAILURE",
            Self::Overflow { .. } => "OUTBOUND_OVERFLOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = HubError::UndefinedHandler(HandlerId::new(5));
        assert_eq!(err.to_string(), "Undefined message handler specified `5`");
        assert_eq!(err.code(), "UNDEFINED_HANDLER");

        let err = HubError::handler_failure(
            HandlerOrigin::Lifecycle(LifecycleKind::Joined),
            HandlerError::failed("boom"),
        );
        assert_eq!(err.to_string(), "JOINED lifecycle handler failed: Handler failed: boom");
    }

    #[test]
    fn test_transport_error_names_session() {
        let id = SessionId::generate();
        let err = HubError::transport(id, TransportError::Closed);
        assert!(err.to_string().contains(&id.to_string()));
        assert_eq!(err.code(), "TRANSPORT_ERROR");
    }
}
