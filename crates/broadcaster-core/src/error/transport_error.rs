//! Connection-level failures

use thiserror::Error;

/// Read or write failure reported by a [`Connection`](crate::Connection)
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection is already closed
    #[error("Connection closed")]
    Closed,

    /// The underlying transport failed
    #[error("I/O error: {0}")]
    Io(String),

    /// A frame arrived that could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// An outbound message could not be encoded
    #[error("Encode error: {0}")]
    Encode(String),
}

impl TransportError {
    /// Whether the read side can make no further progress
    ///
    /// A terminal read error ends the session the same way end-of-stream does.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Io(_))
    }

    pub fn io(err: impl std::fmt::Display) -> Self {
        Self::Io(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}
