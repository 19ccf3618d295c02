//! Session management
//!
//! One session per accepted connection: the pumps that move messages between
//! the connection and the hub.

mod handle;
mod session;

pub(crate) use handle::{Delivery, SessionHandle};
pub use session::Session;
