//! Core rate limiter implementation

use super::types::{AdmissionDecision, Horizon, PerWindow, RateLimits, RateWindows};
use super::utils::now_unix;
use dashmap::DashMap;
use tracing::debug;

/// Fixed-window rate limiter tracking minute, hour, and day horizons per key.
///
/// State is created lazily on first observation of a key and lives for the
/// process lifetime (idle keys can be pruned without changing semantics,
/// since stale windows read as zero). No operation here errors: limiting
/// never turns into an availability problem of its own.
pub struct RateLimiter {
    /// Counter state by key (workspace id)
    pub(super) entries: DashMap<String, RateWindows>,
}

impl RateLimiter {
    /// Create a new rate limiter with no tracked keys
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Check whether a request would be admitted, without consuming quota
    pub fn check(&self, key: &str, limits: &RateLimits) -> AdmissionDecision {
        self.check_at(key, limits, now_unix())
    }

    /// Consume one unit of quota in all three horizons, regardless of limits
    pub fn record(&self, key: &str) {
        self.record_at(key, now_unix());
    }

    /// Atomically check and, if admitted, consume quota.
    ///
    /// Check and increment happen under one entry guard, so concurrent
    /// callers on the same key cannot both pass a nearly-exhausted window.
    pub fn check_and_record(&self, key: &str, limits: &RateLimits) -> AdmissionDecision {
        self.check_and_record_at(key, limits, now_unix())
    }

    pub(super) fn check_at(&self, key: &str, limits: &RateLimits, now: i64) -> AdmissionDecision {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RateWindows::new(now));
        Self::decide(entry.value_mut(), key, limits, now, false)
    }

    pub(super) fn record_at(&self, key: &str, now: i64) {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RateWindows::new(now));
        let windows = entry.value_mut();
        for horizon in Horizon::ALL {
            let counter = windows.counter_mut(horizon);
            counter.roll(now, horizon);
            counter.count += 1;
        }
    }

    pub(super) fn check_and_record_at(
        &self,
        key: &str,
        limits: &RateLimits,
        now: i64,
    ) -> AdmissionDecision {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RateWindows::new(now));
        Self::decide(entry.value_mut(), key, limits, now, true)
    }

    /// Shared roll-check-record path. Runs under the caller's entry guard.
    fn decide(
        windows: &mut RateWindows,
        key: &str,
        limits: &RateLimits,
        now: i64,
        record: bool,
    ) -> AdmissionDecision {
        for horizon in Horizon::ALL {
            windows.counter_mut(horizon).roll(now, horizon);
        }

        let allowed = Horizon::ALL
            .iter()
            .all(|&h| windows.counter(h).count < limits.get(h));

        if allowed && record {
            for horizon in Horizon::ALL {
                windows.counter_mut(horizon).count += 1;
            }
        }

        let remaining =
            PerWindow::from_fn(|h| limits.get(h).saturating_sub(windows.counter(h).count));
        let reset_at =
            PerWindow::from_fn(|h| windows.counter(h).window_start + h.window_secs());

        let retry_after_secs = if allowed {
            None
        } else {
            // Soonest reset among the horizons that denied the request
            let soonest = Horizon::ALL
                .iter()
                .filter(|&&h| windows.counter(h).count >= limits.get(h))
                .map(|&h| (reset_at.get(h) - now).max(1) as u64)
                .min()
                .unwrap_or(1);
            debug!(
                key = %key,
                minute = windows.minute.count,
                hour = windows.hour.count,
                day = windows.day.count,
                retry_after_secs = soonest,
                "admission denied"
            );
            Some(soonest)
        };

        AdmissionDecision {
            allowed,
            remaining,
            reset_at,
            limits: *limits,
            retry_after_secs,
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
