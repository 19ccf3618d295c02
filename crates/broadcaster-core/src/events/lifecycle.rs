//! Session joined / left notifications
//!
//! The hub produces exactly one `Joined` when a session is registered and
//! exactly one `Left` when it is removed from the live set.

use crate::value_objects::SessionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of lifecycle transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleKind {
    Joined,
    Left,
}

impl LifecycleKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Joined => "JOINED",
            Self::Left => "LEFT",
        }
    }
}

impl fmt::Display for LifecycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle transition of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub kind: LifecycleKind,
    pub session_id: SessionId,
}

impl LifecycleEvent {
    pub fn joined(session_id: SessionId) -> Self {
        Self {
            kind: LifecycleKind::Joined,
            session_id,
        }
    }

    pub fn left(session_id: SessionId) -> Self {
        Self {
            kind: LifecycleKind::Left,
            session_id,
        }
    }
}
