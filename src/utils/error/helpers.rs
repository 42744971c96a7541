//! Helper functions for creating specific error types

use super::types::GatewayError;

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn decryption<S: Into<String>>(message: S) -> Self {
        Self::Decryption(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn timeout<S: Into<String>>(operation: S, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    pub fn rate_limit_exceeded(
        limit: u32,
        remaining: u32,
        reset_at: i64,
        retry_after_secs: u64,
    ) -> Self {
        Self::RateLimitExceeded {
            limit,
            remaining,
            reset_at,
            retry_after_secs,
        }
    }

    /// True for errors caused by the caller rather than the gateway
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::RateLimitExceeded { .. }
        )
    }
}
