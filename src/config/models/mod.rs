//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod cache;
pub mod gateway;
pub mod provider;
pub mod rate_limit;
pub mod server;
pub mod timeouts;
pub mod vault;

// Re-export all configuration types
pub use cache::*;
pub use gateway::*;
pub use provider::*;
pub use rate_limit::*;
pub use server::*;
pub use timeouts::*;
pub use vault::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

pub fn default_enabled() -> bool {
    true
}

/// Default per-minute admission limit for workspaces without explicit limits
pub fn default_minute_limit() -> u32 {
    10
}

/// Default per-hour admission limit
pub fn default_hour_limit() -> u32 {
    100
}

/// Default per-day admission limit
pub fn default_day_limit() -> u32 {
    1000
}

pub fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

pub fn default_cache_max_size() -> usize {
    1000
}

/// Default environment variable holding the vault secret
pub fn default_secret_env() -> String {
    "PROMPTGATE_ENCRYPTION_SECRET".to_string()
}

/// Default whole-request deadline in milliseconds
pub fn default_request_timeout_ms() -> u64 {
    30_000
}

/// Default upstream-call deadline in milliseconds
pub fn default_provider_timeout_ms() -> u64 {
    25_000
}

/// Default connect timeout for the upstream HTTP client in milliseconds
pub fn default_connect_timeout_ms() -> u64 {
    5_000
}
