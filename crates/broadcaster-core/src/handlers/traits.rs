//! Handler traits
//!
//! A handler maps one request or lifecycle event to zero or more responses.
//! Returning an error discards every response of that call.

use async_trait::async_trait;

use crate::error::HandlerResult;
use crate::events::LifecycleEvent;
use crate::messages::{InboundMessage, OutboundMessage};

/// Handles requests addressed to one [`HandlerId`](crate::HandlerId)
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, msg: &InboundMessage) -> HandlerResult<Vec<OutboundMessage>>;
}

/// Handles one kind of lifecycle event
#[async_trait]
pub trait LifecycleHandler: Send + Sync {
    async fn handle(&self, event: &LifecycleEvent) -> HandlerResult<Vec<OutboundMessage>>;
}

/// Adapts a plain closure into a [`RequestHandler`]
pub(crate) struct FnRequestHandler<F>(pub(crate) F);

#[async_trait]
impl<F> RequestHandler for FnRequestHandler<F>
where
    F: Fn(&InboundMessage) -> HandlerResult<Vec<OutboundMessage>> + Send + Sync,
{
    async fn handle(&self, msg: &InboundMessage) -> HandlerResult<Vec<OutboundMessage>> {
        (self.0)(msg)
    }
}

/// Adapts a plain closure into a [`LifecycleHandler`]
pub(crate) struct FnLifecycleHandler<F>(pub(crate) F);

#[async_trait]
impl<F> LifecycleHandler for FnLifecycleHandler<F>
where
    F: Fn(&LifecycleEvent) -> HandlerResult<Vec<OutboundMessage>> + Send + Sync,
{
    async fn handle(&self, event: &LifecycleEvent) -> HandlerResult<Vec<OutboundMessage>> {
        (self.0)(event)
    }
}
