//! # broadcaster-gateway
//!
//! The broadcast hub: a single coordinator task owns the live-session set and
//! routes handler responses to sessions. Sessions bridge client connections to
//! the hub; the WebSocket server and the in-memory transport both feed it.

pub mod echo;
pub mod hub;
pub mod server;
pub mod session;
pub mod transport;

pub use hub::{Hub, HubBuildError, HubBuilder, HubHandle, HubStats, HubStopped, DEFAULT_OUTBOUND_CAPACITY};
pub use server::{create_app, create_gateway, run, run_server, GatewayState};
pub use session::Session;
