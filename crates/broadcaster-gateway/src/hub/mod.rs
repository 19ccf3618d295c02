//! Broadcast hub
//!
//! The coordinator actor that owns the live-session set, invokes handlers and
//! fans responses out to sessions.

mod builder;
mod coordinator;
mod error;
mod events;
mod handle;
mod stats;

pub use builder::{HubBuilder, DEFAULT_OUTBOUND_CAPACITY};
pub use coordinator::Hub;
pub use error::{HubBuildError, HubStopped};
pub use handle::HubHandle;
pub use stats::HubStats;
