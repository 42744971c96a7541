//! Unified upstream provider errors

use super::ProviderKind;
use thiserror::Error;

/// Errors surfaced by upstream provider calls.
///
/// One enum for every provider kind; the originating provider travels with
/// the error so callers never have to guess which upstream failed.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider rejected the API key
    #[error("{provider} rejected the API credential")]
    Authentication {
        /// Which provider rejected the call
        provider: ProviderKind,
    },

    /// The provider itself rate limited the gateway
    #[error("{provider} rate limited the request")]
    RateLimited {
        /// Which provider throttled the call
        provider: ProviderKind,
        /// Upstream-supplied retry delay, when it sent one
        retry_after_secs: Option<u64>,
    },

    /// The provider returned an error status
    #[error("{provider} returned status {status}: {message}")]
    Api {
        /// Which provider failed
        provider: ProviderKind,
        /// HTTP status returned upstream
        status: u16,
        /// Upstream error message (truncated, never credential material)
        message: String,
    },

    /// The provider could not be reached
    #[error("network error reaching {provider}: {message}")]
    Network {
        /// Which provider was unreachable
        provider: ProviderKind,
        /// Transport-level failure description
        message: String,
    },

    /// The provider responded with something unparseable
    #[error("failed to parse {provider} response: {message}")]
    Parse {
        /// Which provider sent the malformed response
        provider: ProviderKind,
        /// What was wrong with the payload
        message: String,
    },

    /// The call was cancelled before the provider answered
    #[error("call to {provider} was cancelled before completion")]
    Cancelled {
        /// Which provider the cancelled call targeted
        provider: ProviderKind,
    },
}

impl ProviderError {
    pub fn authentication(provider: ProviderKind) -> Self {
        Self::Authentication { provider }
    }

    pub fn rate_limited(provider: ProviderKind, retry_after_secs: Option<u64>) -> Self {
        Self::RateLimited {
            provider,
            retry_after_secs,
        }
    }

    pub fn api(provider: ProviderKind, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            provider,
            status,
            message: message.into(),
        }
    }

    pub fn network(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::Network {
            provider,
            message: message.into(),
        }
    }

    pub fn parse(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::Parse {
            provider,
            message: message.into(),
        }
    }

    pub fn cancelled(provider: ProviderKind) -> Self {
        Self::Cancelled { provider }
    }

    /// The provider the error originated from
    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::Authentication { provider }
            | Self::RateLimited { provider, .. }
            | Self::Api { provider, .. }
            | Self::Network { provider, .. }
            | Self::Parse { provider, .. }
            | Self::Cancelled { provider } => *provider,
        }
    }

    /// Whether retrying the same call later could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Network { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
