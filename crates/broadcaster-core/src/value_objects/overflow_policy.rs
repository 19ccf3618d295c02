//! What the hub does when a session's outbound queue is full

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Policy applied when a delivery finds the target session's queue saturated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Discard the message for that session only
    #[default]
    DropNewest,
    /// Treat the saturated session as having left
    Disconnect,
}

impl OverflowPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DropNewest => "drop_newest",
            Self::Disconnect => "disconnect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown overflow policy `{0}` (expected `drop_newest` or `disconnect`)")]
pub struct OverflowPolicyParseError(pub String);

impl FromStr for OverflowPolicy {
    type Err = OverflowPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop_newest" | "drop-newest" => Ok(Self::DropNewest),
            "disconnect" => Ok(Self::Disconnect),
            other => Err(OverflowPolicyParseError(other.to_string())),
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
