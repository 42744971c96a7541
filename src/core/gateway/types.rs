//! Gateway outcome types

use crate::core::models::ProviderResponse;
use crate::core::rate_limiter::AdmissionDecision;

/// Result of one admitted generate-prompt call
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// Provider response, fresh or cached
    pub response: ProviderResponse,
    /// The admission decision that let the call through
    pub admission: AdmissionDecision,
    /// True when the response was served from the cache
    pub cache_hit: bool,
}
