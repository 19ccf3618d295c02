//! Demo echo application
//!
//! Handler [`ECHO`] repeats the request body to every live session. Joins and
//! leaves are announced to everyone with a `JOINED <session>` or
//! `LEFT <session>` notice.

use broadcaster_core::{
    HandlerId, InboundMessage, LifecycleEvent, LifecycleHandlers, OutboundMessage, RequestHandlers,
};

/// Handler ID of the echo request
pub const ECHO: HandlerId = HandlerId::new(1);

/// Request handlers of the echo application
pub fn echo_handlers() -> RequestHandlers {
    RequestHandlers::new().on(ECHO, |msg: &InboundMessage| {
        Ok(vec![OutboundMessage::to_all(msg.body().to_vec())])
    })
}

/// Lifecycle handlers announcing joins and leaves to every session
pub fn presence_handlers() -> LifecycleHandlers {
    LifecycleHandlers::new()
        .on_joined(announce)
        .on_left(announce)
}

fn announce(event: &LifecycleEvent) -> broadcaster_core::HandlerResult<Vec<OutboundMessage>> {
    Ok(vec![OutboundMessage::to_all(presence_notice(event))])
}

/// Body of the notice sent for `event`
pub fn presence_notice(event: &LifecycleEvent) -> String {
    format!("{} {}", event.kind.as_str(), event.session_id)
}
