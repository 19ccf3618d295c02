//! Lifecycle events emitted by the hub

mod lifecycle;

pub use lifecycle::{LifecycleEvent, LifecycleKind};
