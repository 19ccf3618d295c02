//! Inbound requests

use crate::value_objects::{HandlerId, SessionId};

/// A request as decoded off the wire, before the session stamps its sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrame {
    pub handler_id: HandlerId,
    pub body: Vec<u8>,
}

impl RequestFrame {
    pub fn new(handler_id: impl Into<HandlerId>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            handler_id: handler_id.into(),
            body: body.into(),
        }
    }
}

/// A request routed to the hub, attributed to the session that sent it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    sender_id: SessionId,
    handler_id: HandlerId,
    body: Vec<u8>,
}

impl InboundMessage {
    /// Attribute a decoded frame to its sending session
    pub fn from_frame(sender_id: SessionId, frame: RequestFrame) -> Self {
        Self {
            sender_id,
            handler_id: frame.handler_id,
            body: frame.body,
        }
    }

    pub fn sender_id(&self) -> SessionId {
        self.sender_id
    }

    pub fn handler_id(&self) -> HandlerId {
        self.handler_id
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body interpreted as UTF-8, if it is valid
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}
