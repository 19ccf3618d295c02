//! Counters reported when the hub stops

/// What the hub did over its lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubStats {
    pub sessions_joined: u64,
    pub sessions_left: u64,
    /// Requests that reached a registered handler
    pub requests_handled: u64,
    /// Outbound messages whose targets were resolved
    pub broadcasts: u64,
    /// Messages queued on a session
    pub deliveries: u64,
    /// Messages lost to a full session queue
    pub deliveries_dropped: u64,
    /// Errors that reached the error sink
    pub errors: u64,
}

impl HubStats {
    /// Sessions still registered
    pub fn live_sessions(&self) -> u64 {
        self.sessions_joined.saturating_sub(self.sessions_left)
    }
}
