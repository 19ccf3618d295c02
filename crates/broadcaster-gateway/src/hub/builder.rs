//! Hub construction

use super::coordinator::Hub;
use super::error::HubBuildError;
use super::handle::HubHandle;
use broadcaster_common::HubConfig;
use broadcaster_core::{LifecycleHandlers, OverflowPolicy, RequestHandlers};

/// Default capacity of a session's outbound queue
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 100;

/// Builder for a [`Hub`] and its [`HubHandle`]
///
/// Both handler registries must be supplied, even when empty.
#[derive(Debug)]
pub struct HubBuilder {
    request_handlers: Option<RequestHandlers>,
    lifecycle_handlers: Option<LifecycleHandlers>,
    outbound_capacity: usize,
    overflow_policy: OverflowPolicy,
}

impl Default for HubBuilder {
    fn default() -> Self {
        Self {
            request_handlers: None,
            lifecycle_handlers: None,
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

impl HubBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn request_handlers(mut self, handlers: RequestHandlers) -> Self {
        self.request_handlers = Some(handlers);
        self
    }

    #[must_use]
    pub fn lifecycle_handlers(mut self, handlers: LifecycleHandlers) -> Self {
        self.lifecycle_handlers = Some(handlers);
        self
    }

    #[must_use]
    pub fn outbound_capacity(mut self, capacity: usize) -> Self {
        self.outbound_capacity = capacity;
        self
    }

    #[must_use]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Apply queue settings from configuration
    #[must_use]
    pub fn config(self, config: &HubConfig) -> Self {
        self.outbound_capacity(config.outbound_buffer)
            .overflow_policy(config.overflow_policy)
    }

    /// Build the hub and a handle to it
    ///
    /// The hub does nothing until [`Hub::run`] is awaited.
    pub fn build(self) -> Result<(Hub, HubHandle), HubBuildError> {
        let request_handlers = self
            .request_handlers
            .ok_or(HubBuildError::MissingRequestHandlers)?;
        let lifecycle_handlers = self
            .lifecycle_handlers
            .ok_or(HubBuildError::MissingLifecycleHandlers)?;

        if self.outbound_capacity == 0 {
            return Err(HubBuildError::ZeroOutboundCapacity);
        }

        tracing::debug!(
            request_handlers = request_handlers.len(),
            lifecycle_handlers = lifecycle_handlers.len(),
            outbound_capacity = self.outbound_capacity,
            overflow_policy = %self.overflow_policy,
            "Building hub"
        );

        Ok(Hub::new(
            request_handlers,
            lifecycle_handlers,
            self.outbound_capacity,
            self.overflow_policy,
        ))
    }
}
