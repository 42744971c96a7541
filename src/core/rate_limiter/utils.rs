//! Rate limiter maintenance utilities

use super::limiter::RateLimiter;
use tracing::debug;

/// Current unix timestamp in seconds
pub(crate) fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

impl RateLimiter {
    /// Drop keys whose windows have all passed.
    ///
    /// Pruning never changes observable behavior: a stale window reads as
    /// zero whether its key is still tracked or not. This only bounds the
    /// memory held for keys that stopped sending requests.
    pub fn prune_idle(&self) -> usize {
        let now = now_unix();
        let before = self.entries.len();
        self.entries.retain(|_, windows| !windows.is_idle(now));
        let pruned = before.saturating_sub(self.entries.len());

        if pruned > 0 {
            debug!(pruned, tracked = self.entries.len(), "pruned idle rate limit keys");
        }

        pruned
    }

    /// Number of keys currently holding counter state
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }
}
