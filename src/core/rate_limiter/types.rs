//! Rate limiter types and data structures

use serde::{Deserialize, Serialize};

/// The three fixed horizons every workspace is limited on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    /// 60 second window
    Minute,
    /// 3600 second window
    Hour,
    /// 86400 second window
    Day,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::Minute, Horizon::Hour, Horizon::Day];

    /// Window length in seconds
    pub fn window_secs(&self) -> i64 {
        match self {
            Horizon::Minute => 60,
            Horizon::Hour => 3600,
            Horizon::Day => 86_400,
        }
    }

    /// Start of the fixed window containing `now`.
    ///
    /// Always a multiple of the window length, so consecutive windows tile
    /// the timeline without drift.
    pub fn window_start(&self, now: i64) -> i64 {
        let len = self.window_secs();
        now.div_euclid(len) * len
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Minute => "minute",
            Horizon::Hour => "hour",
            Horizon::Day => "day",
        }
    }
}

/// One value per horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerWindow<T> {
    pub minute: T,
    pub hour: T,
    pub day: T,
}

impl<T: Copy> PerWindow<T> {
    pub fn get(&self, horizon: Horizon) -> T {
        match horizon {
            Horizon::Minute => self.minute,
            Horizon::Hour => self.hour,
            Horizon::Day => self.day,
        }
    }
}

impl<T> PerWindow<T> {
    pub fn from_fn(mut f: impl FnMut(Horizon) -> T) -> Self {
        Self {
            minute: f(Horizon::Minute),
            hour: f(Horizon::Hour),
            day: f(Horizon::Day),
        }
    }
}

/// Admission limits applied to one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    /// Requests per fixed minute window
    pub minute: u32,
    /// Requests per fixed hour window
    pub hour: u32,
    /// Requests per fixed day window
    pub day: u32,
}

impl RateLimits {
    pub fn new(minute: u32, hour: u32, day: u32) -> Self {
        Self { minute, hour, day }
    }

    pub fn get(&self, horizon: Horizon) -> u32 {
        match horizon {
            Horizon::Minute => self.minute,
            Horizon::Hour => self.hour,
            Horizon::Day => self.day,
        }
    }
}

impl Default for RateLimits {
    fn default() -> Self {
        // Documented fallback limits for workspaces without explicit ones
        Self {
            minute: 10,
            hour: 100,
            day: 1000,
        }
    }
}

/// Result of an admission check
#[derive(Debug, Clone)]
pub struct AdmissionDecision {
    /// Whether the request is admitted
    pub allowed: bool,
    /// Remaining quota per horizon after this decision (never negative)
    pub remaining: PerWindow<u32>,
    /// Unix timestamp at which each horizon's current window resets
    pub reset_at: PerWindow<i64>,
    /// The limits the decision was made against
    pub limits: RateLimits,
    /// Seconds until the soonest exhausted window resets (set when denied)
    pub retry_after_secs: Option<u64>,
}

impl AdmissionDecision {
    /// Decision used when admission control is disabled
    pub fn allow_all(limits: RateLimits, now: i64) -> Self {
        Self {
            allowed: true,
            remaining: PerWindow::from_fn(|h| limits.get(h)),
            reset_at: PerWindow::from_fn(|h| h.window_start(now) + h.window_secs()),
            limits,
            retry_after_secs: None,
        }
    }

    // Response headers report the minute window, the quota callers
    // actually pace themselves against.

    pub fn header_limit(&self) -> u32 {
        self.limits.minute
    }

    pub fn header_remaining(&self) -> u32 {
        self.remaining.minute
    }

    pub fn header_reset(&self) -> i64 {
        self.reset_at.minute
    }
}

/// Counter for one horizon of one key
#[derive(Debug, Clone, Copy)]
pub(super) struct WindowCounter {
    /// Requests observed in the current window
    pub(super) count: u32,
    /// Start of the window `count` belongs to
    pub(super) window_start: i64,
}

impl WindowCounter {
    pub(super) fn new(now: i64, horizon: Horizon) -> Self {
        Self {
            count: 0,
            window_start: horizon.window_start(now),
        }
    }

    /// Reset the counter if `now` has left the stored window.
    ///
    /// Called before every read or increment, so a boundary crossed exactly
    /// at call time rolls over first.
    pub(super) fn roll(&mut self, now: i64, horizon: Horizon) {
        let current_start = horizon.window_start(now);
        if current_start != self.window_start {
            self.window_start = current_start;
            self.count = 0;
        }
    }

    pub(super) fn is_stale(&self, now: i64, horizon: Horizon) -> bool {
        horizon.window_start(now) != self.window_start
    }
}

/// Counter state for all three horizons of one key
#[derive(Debug, Clone)]
pub(super) struct RateWindows {
    pub(super) minute: WindowCounter,
    pub(super) hour: WindowCounter,
    pub(super) day: WindowCounter,
}

impl RateWindows {
    pub(super) fn new(now: i64) -> Self {
        Self {
            minute: WindowCounter::new(now, Horizon::Minute),
            hour: WindowCounter::new(now, Horizon::Hour),
            day: WindowCounter::new(now, Horizon::Day),
        }
    }

    pub(super) fn counter(&self, horizon: Horizon) -> &WindowCounter {
        match horizon {
            Horizon::Minute => &self.minute,
            Horizon::Hour => &self.hour,
            Horizon::Day => &self.day,
        }
    }

    pub(super) fn counter_mut(&mut self, horizon: Horizon) -> &mut WindowCounter {
        match horizon {
            Horizon::Minute => &mut self.minute,
            Horizon::Hour => &mut self.hour,
            Horizon::Day => &mut self.day,
        }
    }

    /// True when every horizon's stored window has passed, meaning all
    /// counters would read zero on the next access.
    pub(super) fn is_idle(&self, now: i64) -> bool {
        Horizon::ALL
            .iter()
            .all(|&h| self.counter(h).is_stale(now, h))
    }
}
