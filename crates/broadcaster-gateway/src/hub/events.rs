//! Events consumed by the coordinator
//!
//! Every producer (sessions, handles, the coordinator itself) pushes onto one
//! unbounded queue, so arrival order is a single total order.

use crate::session::SessionHandle;
use broadcaster_core::{HubError, InboundMessage, OutboundMessage, SessionId};

#[derive(Debug)]
pub(crate) enum HubEvent {
    /// A new session was registered
    Join(SessionHandle),
    /// A session's connection ended, or it must be dropped
    Leave(SessionId),
    /// Non-fatal runtime error for the error sink
    Error(HubError),
    /// A request from a session
    Inbound(InboundMessage),
    /// A response ready for fan-out
    Broadcast(OutboundMessage),
    /// Terminal event
    Shutdown,
}

impl HubEvent {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Join(_) => "JOIN",
            Self::Leave(_) => "LEAVE",
            Self::Error(_) => "ERROR",
            Self::Inbound(_) => "INBOUND",
            Self::Broadcast(_) => "BROADCAST",
            Self::Shutdown => "SHUTDOWN",
        }
    }
}
