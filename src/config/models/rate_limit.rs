//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Rate limiting configuration
///
/// These limits apply to every workspace that does not carry explicit limits
/// in its stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable admission control
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Requests admitted per fixed minute window
    #[serde(default = "default_minute_limit")]
    pub minute_limit: u32,
    /// Requests admitted per fixed hour window
    #[serde(default = "default_hour_limit")]
    pub hour_limit: u32,
    /// Requests admitted per fixed day window
    #[serde(default = "default_day_limit")]
    pub day_limit: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            minute_limit: default_minute_limit(),
            hour_limit: default_hour_limit(),
            day_limit: default_day_limit(),
        }
    }
}

impl RateLimitConfig {
    /// Merge rate limit configurations (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.enabled != default_enabled() {
            self.enabled = other.enabled;
        }
        if other.minute_limit != default_minute_limit() {
            self.minute_limit = other.minute_limit;
        }
        if other.hour_limit != default_hour_limit() {
            self.hour_limit = other.hour_limit;
        }
        if other.day_limit != default_day_limit() {
            self.day_limit = other.day_limit;
        }
        self
    }
}
