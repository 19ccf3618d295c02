//! Integration test utilities for the broadcast gateway
//!
//! Starts the real server on an ephemeral port and drives it with WebSocket
//! clients speaking the JSON wire format.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
