//! Outbound responses and their cast selection

use crate::value_objects::{HandlerId, SessionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which live sessions receive an outbound message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cast {
    /// Every live session
    #[default]
    All,
    /// Only the session that triggered the response, if it is still live
    SenderOnly,
    /// Live sessions whose ID appears in the list
    Exclusive(Vec<SessionId>),
}

impl Cast {
    pub fn cast_type(&self) -> CastType {
        match self {
            Self::All => CastType::All,
            Self::SenderOnly => CastType::SenderOnly,
            Self::Exclusive(_) => CastType::Exclusive,
        }
    }

    /// Explicit targets; empty unless this is an exclusive cast
    pub fn targets(&self) -> &[SessionId] {
        match self {
            Self::Exclusive(targets) => targets,
            _ => &[],
        }
    }

    /// Rebuild a cast from its wire discriminant and target list
    pub fn from_parts(cast_type: CastType, targets: Vec<SessionId>) -> Self {
        match cast_type {
            CastType::All => Self::All,
            CastType::SenderOnly => Self::SenderOnly,
            CastType::Exclusive => Self::Exclusive(targets),
        }
    }
}

/// Wire discriminant of a [`Cast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CastType {
    All = 1,
    SenderOnly = 2,
    Exclusive = 3,
}

impl From<CastType> for u8 {
    fn from(cast_type: CastType) -> Self {
        cast_type as u8
    }
}

impl TryFrom<u8> for CastType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::All),
            2 => Ok(Self::SenderOnly),
            3 => Ok(Self::Exclusive),
            other => Err(format!("unknown cast type {other}")),
        }
    }
}

impl fmt::Display for CastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::SenderOnly => write!(f, "SENDER_ONLY"),
            Self::Exclusive => write!(f, "EXCLUSIVE"),
        }
    }
}

/// A response produced by a handler and fanned out by the hub
///
/// Handlers only choose the cast and the body. `sender_id` and `handler_id`
/// are overwritten by the hub with the values of the triggering request or
/// lifecycle event before the message is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub sender_id: SessionId,
    pub handler_id: HandlerId,
    pub cast: Cast,
    pub body: Vec<u8>,
}

impl OutboundMessage {
    pub fn new(cast: Cast, body: impl Into<Vec<u8>>) -> Self {
        Self {
            sender_id: SessionId::nil(),
            handler_id: HandlerId::LIFECYCLE,
            cast,
            body: body.into(),
        }
    }

    /// Broadcast to every live session
    pub fn to_all(body: impl Into<Vec<u8>>) -> Self {
        Self::new(Cast::All, body)
    }

    /// Reply to the sender only
    pub fn to_sender(body: impl Into<Vec<u8>>) -> Self {
        Self::new(Cast::SenderOnly, body)
    }

    /// Deliver to the listed sessions that are still live
    pub fn to_sessions(targets: impl IntoIterator<Item = SessionId>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(Cast::Exclusive(targets.into_iter().collect()), body)
    }

    /// Overwrite the routing fields with the triggering request's values
    #[must_use]
    pub fn stamped(mut self, sender_id: SessionId, handler_id: HandlerId) -> Self {
        self.sender_id = sender_id;
        self.handler_id = handler_id;
        self
    }

    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_select_cast() {
        assert_eq!(OutboundMessage::to_all("x").cast, Cast::All);
        assert_eq!(OutboundMessage::to_sender("x").cast, Cast::SenderOnly);

        let a = SessionId::generate();
        let msg = OutboundMessage::to_sessions([a], "x");
        assert_eq!(msg.cast.cast_type(), CastType::Exclusive);
        assert_eq!(msg.cast.targets(), &[a]);
    }

    #[test]
    fn test_unstamped_response_is_anonymous() {
        let msg = OutboundMessage::to_all("hello");
        assert!(msg.sender_id.is_nil());
        assert!(msg.handler_id.is_lifecycle());
        assert_eq!(msg.body_str(), Some("hello"));
    }

    #[test]
    fn test_stamped_overwrites_routing_fields() {
        let sender = SessionId::generate();
        let forged = OutboundMessage {
            sender_id: SessionId::generate(),
            handler_id: HandlerId::new(99),
            cast: Cast::SenderOnly,
            body: b"body".to_vec(),
        };

        let msg = forged.stamped(sender, HandlerId::new(1));
        assert_eq!(msg.sender_id, sender);
        assert_eq!(msg.handler_id, HandlerId::new(1));
        assert_eq!(msg.cast, Cast::SenderOnly);
        assert_eq!(msg.body, b"body");
    }

    #[test]
    fn test_cast_type_wire_values() {
        assert_eq!(u8::from(CastType::All), 1);
        assert_eq!(u8::from(CastType::SenderOnly), 2);
        assert_eq!(u8::from(CastType::Exclusive), 3);
        assert_eq!(CastType::try_from(3), Ok(CastType::Exclusive));
        assert!(CastType::try_from(0).is_err());
    }

    #[test]
    fn test_from_parts_ignores_targets_unless_exclusive() {
        let a = SessionId::generate();
        assert_eq!(Cast::from_parts(CastType::All, vec![a]), Cast::All);
        assert_eq!(Cast::from_parts(CastType::Exclusive, vec![a]), Cast::Exclusive(vec![a]));
        assert!(Cast::All.targets().is_empty());
    }
}
