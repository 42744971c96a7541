//! Timeout configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deadlines applied around prompt generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Whole-request deadline in milliseconds (tracked)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Upstream provider call deadline in milliseconds (untracked, inner)
    #[serde(default = "default_provider_timeout_ms")]
    pub provider_timeout_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
            provider_timeout_ms: default_provider_timeout_ms(),
        }
    }
}

impl TimeoutConfig {
    /// Merge timeout configurations (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.request_timeout_ms != default_request_timeout_ms() {
            self.request_timeout_ms = other.request_timeout_ms;
        }
        if other.provider_timeout_ms != default_provider_timeout_ms() {
            self.provider_timeout_ms = other.provider_timeout_ms;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }
}
