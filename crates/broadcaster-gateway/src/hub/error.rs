//! Hub construction and handle errors

use thiserror::Error;

/// The hub cannot be built from the supplied setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HubBuildError {
    #[error("request handlers are not set; they are required even if empty")]
    MissingRequestHandlers,

    #[error("lifecycle handlers are not set; they are required even if empty")]
    MissingLifecycleHandlers,

    #[error("outbound queue capacity must be greater than zero")]
    ZeroOutboundCapacity,
}

/// The hub has processed its shutdown event and accepts nothing more
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("hub is stopped")]
pub struct HubStopped;
