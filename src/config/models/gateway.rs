//! Main gateway configuration

use super::*;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Response cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Credential vault configuration
    #[serde(default)]
    pub vault: VaultConfig,
    /// Upstream provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Timeout configuration
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl GatewayConfig {
    /// Build a configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("PROMPTGATE_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PROMPTGATE_PORT") {
            config.server.port = port
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid PROMPTGATE_PORT: {}", e)))?;
        }
        if let Ok(base_url) = std::env::var("PROMPTGATE_PROVIDER_BASE_URL") {
            config.provider.base_url = Some(base_url);
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.rate_limit = self.rate_limit.merge(other.rate_limit);
        self.cache = self.cache.merge(other.cache);
        self.vault = self.vault.merge(other.vault);
        self.provider = self.provider.merge(other.provider);
        self.timeouts = self.timeouts.merge(other.timeouts);
        self
    }
}
