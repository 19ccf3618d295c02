//! Value objects - small immutable types shared by every layer

mod handler_id;
mod overflow_policy;
mod session_id;

pub use handler_id::HandlerId;
pub use overflow_policy::{OverflowPolicy, OverflowPolicyParseError};
pub use session_id::{SessionId, SessionIdParseError};
