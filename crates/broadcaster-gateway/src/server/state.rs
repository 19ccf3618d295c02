//! Gateway state
//!
//! Shared by every request handler of the router.

use crate::hub::HubHandle;
use broadcaster_common::AppConfig;
use std::sync::Arc;

/// Gateway application state
#[derive(Clone)]
pub struct GatewayState {
    /// Handle to the running hub
    hub: HubHandle,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    pub fn new(hub: HubHandle, config: AppConfig) -> Self {
        Self {
            hub,
            config: Arc::new(config),
        }
    }

    pub fn hub(&self) -> &HubHandle {
        &self.hub
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("hub", &self.hub)
            .field("endpoint", &self.config.server.endpoint)
            .finish()
    }
}
