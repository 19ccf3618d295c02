//! Message model
//!
//! Requests flow from a connection into the hub, responses flow from the hub
//! out to the sessions selected by their cast.

mod request;
mod response;

pub use request::{InboundMessage, RequestFrame};
pub use response::{Cast, CastType, OutboundMessage};
