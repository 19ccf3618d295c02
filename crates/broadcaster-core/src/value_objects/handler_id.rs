//! Handler identifier carried by every request

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric key selecting a request handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerId(u32);

impl HandlerId {
    /// Stamped on responses produced by lifecycle handlers
    pub const LIFECYCLE: Self = Self(0);

    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> u32 {
        self.0
    }

    /// Whether this is the lifecycle sentinel
    #[inline]
    pub const fn is_lifecycle(&self) -> bool {
        self.0 == Self::LIFECYCLE.0
    }
}

impl From<u32> for HandlerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_sentinel() {
        assert!(HandlerId::LIFECYCLE.is_lifecycle());
        assert!(HandlerId::default().is_lifecycle());
        assert!(!HandlerId::new(1).is_lifecycle());
    }

    #[test]
    fn test_display() {
        assert_eq!(HandlerId::from(42).to_string(), "42");
    }
}
