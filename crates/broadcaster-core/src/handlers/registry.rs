//! Handler registries
//!
//! Both registries are assembled once, handed to the hub at construction and
//! never mutated afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::traits::{FnLifecycleHandler, FnRequestHandler};
use super::{LifecycleHandler, RequestHandler};
use crate::error::HandlerResult;
use crate::events::{LifecycleEvent, LifecycleKind};
use crate::messages::{InboundMessage, OutboundMessage};
use crate::value_objects::HandlerId;

/// `HandlerId` -> request handler
#[derive(Clone, Default)]
pub struct RequestHandlers {
    handlers: HashMap<HandlerId, Arc<dyn RequestHandler>>,
}

impl RequestHandlers {
    /// An empty registry; every request will be reported as undefined
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure for `id`, replacing any previous handler
    #[must_use]
    pub fn on<F>(self, id: impl Into<HandlerId>, handler: F) -> Self
    where
        F: Fn(&InboundMessage) -> HandlerResult<Vec<OutboundMessage>> + Send + Sync + 'static,
    {
        self.with_handler(id, FnRequestHandler(handler))
    }

    /// Register a handler implementation for `id`
    #[must_use]
    pub fn with_handler(mut self, id: impl Into<HandlerId>, handler: impl RequestHandler + 'static) -> Self {
        self.handlers.insert(id.into(), Arc::new(handler));
        self
    }

    pub fn get(&self, id: HandlerId) -> Option<&Arc<dyn RequestHandler>> {
        self.handlers.get(&id)
    }

    pub fn contains(&self, id: HandlerId) -> bool {
        self.handlers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for RequestHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.handlers.keys().copied().collect();
        ids.sort_unstable();
        f.debug_struct("RequestHandlers").field("ids", &ids).finish()
    }
}

/// `LifecycleKind` -> lifecycle handler
#[derive(Clone, Default)]
pub struct LifecycleHandlers {
    handlers: HashMap<LifecycleKind, Arc<dyn LifecycleHandler>>,
}

impl LifecycleHandlers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on<F>(self, kind: LifecycleKind, handler: F) -> Self
    where
        F: Fn(&LifecycleEvent) -> HandlerResult<Vec<OutboundMessage>> + Send + Sync + 'static,
    {
        self.with_handler(kind, FnLifecycleHandler(handler))
    }

    #[must_use]
    pub fn on_joined<F>(self, handler: F) -> Self
    where
        F: Fn(&LifecycleEvent) -> HandlerResult<Vec<OutboundMessage>> + Send + Sync + 'static,
    {
        self.on(LifecycleKind::Joined, handler)
    }

    #[must_use]
    pub fn on_left<F>(self, handler: F) -> Self
    where
        F: Fn(&LifecycleEvent) -> HandlerResult<Vec<OutboundMessage>> + Send + Sync + 'static,
    {
        self.on(LifecycleKind::Left, handler)
    }

    #[must_use]
    pub fn with_handler(mut self, kind: LifecycleKind, handler: impl LifecycleHandler + 'static) -> Self {
        self.handlers.insert(kind, Arc::new(handler));
        self
    }

    pub fn get(&self, kind: LifecycleKind) -> Option<&Arc<dyn LifecycleHandler>> {
        self.handlers.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for LifecycleHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHandlers")
            .field("joined", &self.handlers.contains_key(&LifecycleKind::Joined))
            .field("left", &self.handlers.contains_key(&LifecycleKind::Left))
            .finish()
    }
}
