//! Error taxonomy
//!
//! Every runtime error is non-fatal for the hub: it ends at most the message
//! or session involved and is otherwise only logged.

mod handler_error;
mod hub_error;
mod transport_error;

pub use handler_error::{HandlerError, HandlerResult};
pub use hub_error::{HandlerOrigin, HubError};
pub use transport_error::TransportError;
