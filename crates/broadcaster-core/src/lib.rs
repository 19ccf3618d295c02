//! # broadcaster-core
//!
//! Message model, handler registries and the connection contract of the broadcast hub.
//! This crate has no dependency on a runtime or a transport.

pub mod connection;
pub mod error;
pub mod events;
pub mod handlers;
pub mod messages;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use connection::Connection;
pub use error::{HandlerError, HandlerOrigin, HandlerResult, HubError, TransportError};
pub use events::{LifecycleEvent, LifecycleKind};
pub use handlers::{LifecycleHandler, LifecycleHandlers, RequestHandler, RequestHandlers};
pub use messages::{Cast, CastType, InboundMessage, OutboundMessage, RequestFrame};
pub use value_objects::{
    HandlerId, OverflowPolicy, OverflowPolicyParseError, SessionId, SessionIdParseError,
};
