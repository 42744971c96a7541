//! Error types for the gateway

use crate::core::providers::ProviderError;
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors (missing/short encryption secret, bad YAML values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (caller-supplied request is malformed)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Admission denied by the rate limiter
    #[error("Rate limit exceeded: retry after {retry_after_secs}s")]
    RateLimitExceeded {
        /// Limit of the window reported in response headers
        limit: u32,
        /// Remaining quota in that window (0 when denied by it)
        remaining: u32,
        /// Unix timestamp at which that window resets
        reset_at: i64,
        /// Seconds until the soonest exhausted window resets
        retry_after_secs: u64,
    },

    /// An operation exceeded its deadline
    #[error("Operation '{operation}' timed out after {timeout_ms}ms")]
    Timeout {
        /// Label of the timed-out operation
        operation: String,
        /// The deadline that was exceeded
        timeout_ms: u64,
    },

    /// A stored credential blob could not be decrypted.
    /// The message never contains key or plaintext material.
    #[error("Credential decryption failed: {0}")]
    Decryption(String),

    /// Other cryptographic failures (key derivation, cipher setup)
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Upstream provider errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
