//! Tests for the admission rate limiter

#[cfg(test)]
mod tests {
    use super::super::limiter::RateLimiter;
    use super::super::types::{Horizon, RateLimits};
    use super::super::utils::now_unix;

    /// Day-aligned base timestamp (multiple of 86 400, so also of 3 600
    /// and 60). Keeps window math in the tests exact.
    const BASE: i64 = 1_700_006_400;

    fn limits(minute: u32, hour: u32, day: u32) -> RateLimits {
        RateLimits::new(minute, hour, day)
    }

    // ==================== Admission ====================

    #[test]
    fn test_admits_within_limit() {
        let limiter = RateLimiter::new();
        let limits = limits(5, 100, 1000);

        for i in 0..5 {
            let decision = limiter.check_and_record_at("ws-1", &limits, BASE + i);
            assert!(decision.allowed, "request {} should be admitted", i);
            assert_eq!(decision.remaining.minute, 4 - i as u32);
        }
    }

    #[test]
    fn test_denies_over_limit() {
        let limiter = RateLimiter::new();
        let limits = limits(3, 100, 1000);

        for _ in 0..3 {
            assert!(limiter.check_and_record_at("ws-1", &limits, BASE).allowed);
        }

        let denied = limiter.check_and_record_at("ws-1", &limits, BASE);
        assert!(!denied.allowed);
        assert_eq!(denied.remaining.minute, 0);
        assert!(denied.retry_after_secs.is_some());
    }

    #[test]
    fn test_denial_consumes_nothing() {
        let limiter = RateLimiter::new();
        let limits = limits(1, 100, 1000);

        assert!(limiter.check_and_record_at("ws-1", &limits, BASE).allowed);
        for _ in 0..10 {
            assert!(!limiter.check_and_record_at("ws-1", &limits, BASE).allowed);
        }

        // Only the single admitted request is counted, so the next minute
        // window readmits immediately.
        let next = limiter.check_and_record_at("ws-1", &limits, BASE + 60);
        assert!(next.allowed);
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new();
        let limits = limits(1, 100, 1000);

        assert!(limiter.check_and_record_at("ws-a", &limits, BASE).allowed);
        assert!(!limiter.check_and_record_at("ws-a", &limits, BASE).allowed);

        assert!(limiter.check_and_record_at("ws-b", &limits, BASE).allowed);
    }

    #[test]
    fn test_all_horizons_must_admit() {
        let limiter = RateLimiter::new();
        let limits = limits(100, 100, 1);

        assert!(limiter.check_and_record_at("ws-1", &limits, BASE).allowed);

        let denied = limiter.check_and_record_at("ws-1", &limits, BASE + 120);
        assert!(!denied.allowed, "day horizon should deny despite fresh minute window");
        assert_eq!(denied.remaining.minute, 100);
        assert_eq!(denied.remaining.day, 0);
    }

    // ==================== Check vs record ====================

    #[test]
    fn test_check_does_not_consume() {
        let limiter = RateLimiter::new();
        let limits = limits(5, 100, 1000);

        for _ in 0..10 {
            let decision = limiter.check_at("ws-1", &limits, BASE);
            assert!(decision.allowed);
            assert_eq!(decision.remaining.minute, 5);
        }
    }

    #[test]
    fn test_check_sees_recorded_usage() {
        let limiter = RateLimiter::new();
        let limits = limits(5, 100, 1000);

        limiter.check_and_record_at("ws-1", &limits, BASE);

        let decision = limiter.check_at("ws-1", &limits, BASE);
        assert_eq!(decision.remaining.minute, 4);
        assert_eq!(decision.remaining.hour, 99);
        assert_eq!(decision.remaining.day, 999);
    }

    #[test]
    fn test_record_is_unconditional() {
        let limiter = RateLimiter::new();
        let limits = limits(1, 100, 1000);

        // record() bypasses the admission check entirely
        limiter.record_at("ws-1", BASE);
        limiter.record_at("ws-1", BASE);
        limiter.record_at("ws-1", BASE);

        let decision = limiter.check_at("ws-1", &limits, BASE);
        assert!(!decision.allowed);
        // Remaining is clamped, never negative
        assert_eq!(decision.remaining.minute, 0);
    }

    // ==================== Window rollover ====================

    #[test]
    fn test_minute_window_rollover() {
        let limiter = RateLimiter::new();
        let limits = limits(2, 100, 1000);

        assert!(limiter.check_and_record_at("ws-1", &limits, BASE + 10).allowed);
        assert!(limiter.check_and_record_at("ws-1", &limits, BASE + 20).allowed);
        assert!(!limiter.check_and_record_at("ws-1", &limits, BASE + 59).allowed);

        // First second of the next window: counter restarts from zero
        let next = limiter.check_and_record_at("ws-1", &limits, BASE + 60);
        assert!(next.allowed);
        assert_eq!(next.remaining.minute, 1);
    }

    #[test]
    fn test_rollover_at_exact_boundary() {
        let limiter = RateLimiter::new();
        let limits = limits(1, 100, 1000);

        assert!(limiter.check_and_record_at("ws-1", &limits, BASE).allowed);
        // A request arriving exactly at the boundary belongs to the new
        // window; the counter rolls before it is checked.
        assert!(limiter.check_and_record_at("ws-1", &limits, BASE + 60).allowed);
    }

    #[test]
    fn test_hour_window_survives_minute_rollover() {
        let limiter = RateLimiter::new();
        let limits = limits(10, 2, 1000);

        assert!(limiter.check_and_record_at("ws-1", &limits, BASE).allowed);
        assert!(limiter.check_and_record_at("ws-1", &limits, BASE + 61).allowed);

        let denied = limiter.check_and_record_at("ws-1", &limits, BASE + 130);
        assert!(!denied.allowed);
        // Retry hint points at the hour reset, not the already-fresh minute
        assert_eq!(denied.retry_after_secs, Some(3600 - 130));
    }

    // ==================== Decision metadata ====================

    #[test]
    fn test_reset_timestamps_are_window_aligned() {
        let limiter = RateLimiter::new();
        let limits = RateLimits::default();

        let decision = limiter.check_at("ws-1", &limits, BASE + 30);
        assert_eq!(decision.reset_at.minute, BASE + 60);
        assert_eq!(decision.reset_at.hour, BASE + 3600);
        assert_eq!(decision.reset_at.day, BASE + 86_400);
    }

    #[test]
    fn test_retry_after_uses_soonest_exhausted_window() {
        let limiter = RateLimiter::new();
        let limits = limits(1, 1, 1000);

        assert!(limiter.check_and_record_at("ws-1", &limits, BASE + 30).allowed);

        // Both minute and hour are exhausted; the hint is the nearer reset
        let denied = limiter.check_and_record_at("ws-1", &limits, BASE + 30);
        assert_eq!(denied.retry_after_secs, Some(30));
    }

    #[test]
    fn test_default_limits() {
        let limits = RateLimits::default();
        assert_eq!(limits.minute, 10);
        assert_eq!(limits.hour, 100);
        assert_eq!(limits.day, 1000);
    }

    #[test]
    fn test_window_start_tiles_timeline() {
        assert_eq!(Horizon::Minute.window_start(BASE + 59), BASE);
        assert_eq!(Horizon::Minute.window_start(BASE + 60), BASE + 60);
        assert_eq!(Horizon::Hour.window_start(BASE + 3599), BASE);
        assert_eq!(Horizon::Day.window_start(BASE + 86_399), BASE);
    }

    // ==================== Maintenance ====================

    #[test]
    fn test_prune_drops_idle_keys() {
        let limiter = RateLimiter::new();
        let limits = RateLimits::default();

        // BASE is far in the past, so every window of this key is stale
        limiter.check_and_record_at("ws-old", &limits, BASE);
        // A key active right now must survive the prune
        limiter.check_and_record("ws-live", &limits);
        assert_eq!(limiter.key_count(), 2);

        let pruned = limiter.prune_idle();
        assert_eq!(pruned, 1);
        assert_eq!(limiter.key_count(), 1);

        // Pruning is invisible to admission: the old key starts fresh,
        // exactly as its stale windows would have read anyway
        let decision = limiter.check_at("ws-old", &limits, now_unix());
        assert_eq!(decision.remaining.minute, limits.minute);
    }

    #[test]
    fn test_live_key_is_not_pruned() {
        let limiter = RateLimiter::new();
        let limits = RateLimits::default();

        limiter.check_and_record("ws-1", &limits);
        assert_eq!(limiter.prune_idle(), 0);

        let decision = limiter.check("ws-1", &limits);
        assert_eq!(decision.remaining.minute, limits.minute - 1);
    }
}
