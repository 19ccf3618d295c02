//! Handler sets used by the gateway tests

use broadcaster_core::{HandlerError, InboundMessage, OutboundMessage, RequestHandlers};
use broadcaster_gateway::echo::{echo_handlers, ECHO};

/// Replies to the sender only
pub const WHISPER: u32 = 2;

/// Always fails
pub const BROKEN: u32 = 3;

/// The echo handler plus [`WHISPER`] and [`BROKEN`]
pub fn test_handlers() -> RequestHandlers {
    echo_handlers()
        .on(WHISPER, |msg: &InboundMessage| {
            Ok(vec![OutboundMessage::to_sender(msg.body().to_vec())])
        })
        .on(BROKEN, |_: &InboundMessage| Err(HandlerError::failed("broken on purpose")))
}

/// Handler ID of the echo request as a plain number
pub fn echo_id() -> u32 {
    ECHO.into_inner()
}
