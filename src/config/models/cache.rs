//! Cache configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable response caching
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Cache TTL in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    /// Maximum number of cached responses
    #[serde(default = "default_cache_max_size")]
    pub max_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_cache_ttl(),
            max_size: default_cache_max_size(),
        }
    }
}

impl CacheConfig {
    /// Merge cache configurations (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.enabled != default_enabled() {
            self.enabled = other.enabled;
        }
        if other.ttl_secs != default_cache_ttl() {
            self.ttl_secs = other.ttl_secs;
        }
        if other.max_size != default_cache_max_size() {
            self.max_size = other.max_size;
        }
        self
    }
}
