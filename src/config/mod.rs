//! Configuration management for the gateway
//!
//! This module handles loading, validation, and management of all gateway
//! configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let gateway = GatewayConfig::from_env()?;
        let config = Self { gateway };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get rate limiting configuration
    pub fn rate_limit(&self) -> &RateLimitConfig {
        &self.gateway.rate_limit
    }

    /// Get cache configuration
    pub fn cache(&self) -> &CacheConfig {
        &self.gateway.cache
    }

    /// Get vault configuration
    pub fn vault(&self) -> &VaultConfig {
        &self.gateway.vault
    }

    /// Get provider configuration
    pub fn provider(&self) -> &ProviderConfig {
        &self.gateway.provider
    }

    /// Get timeout configuration
    pub fn timeouts(&self) -> &TimeoutConfig {
        &self.gateway.timeouts
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.gateway.validate()
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.gateway = self.gateway.merge(other.gateway);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
