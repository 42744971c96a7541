//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use crate::utils::error::{GatewayError, Result};
use tracing::debug;
use url::Url;

/// Validation trait implemented by every configuration section
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Check that a base URL is well-formed http(s) with a host
fn validate_base_url(url_str: &str, context: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| GatewayError::Config(format!("{} has invalid URL format: {}", context, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(GatewayError::Config(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(GatewayError::Config(format!(
            "{} URL must have a valid host",
            context
        )));
    }

    Ok(())
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(GatewayError::Config(
                "Server host cannot be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(GatewayError::Config("Server port cannot be 0".to_string()));
        }
        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<()> {
        if self.minute_limit == 0 || self.hour_limit == 0 || self.day_limit == 0 {
            return Err(GatewayError::Config(
                "Rate limits must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(GatewayError::Config(
                "Cache max_size must be greater than 0".to_string(),
            ));
        }
        if self.ttl_secs == 0 {
            return Err(GatewayError::Config(
                "Cache ttl_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for VaultConfig {
    fn validate(&self) -> Result<()> {
        if self.secret_env.is_empty() {
            return Err(GatewayError::Config(
                "Vault secret_env cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            validate_base_url(base_url, "Provider base_url")?;
        }
        if self.connect_timeout_ms == 0 {
            return Err(GatewayError::Config(
                "Provider connect_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for TimeoutConfig {
    fn validate(&self) -> Result<()> {
        if self.request_timeout_ms == 0 || self.provider_timeout_ms == 0 {
            return Err(GatewayError::Config(
                "Timeouts must be greater than 0".to_string(),
            ));
        }
        if self.provider_timeout_ms > self.request_timeout_ms {
            return Err(GatewayError::Config(
                "provider_timeout_ms cannot exceed request_timeout_ms".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating gateway configuration");

        self.server.validate()?;
        self.rate_limit.validate()?;
        self.cache.validate()?;
        self.vault.validate()?;
        self.provider.validate()?;
        self.timeouts.validate()?;

        Ok(())
    }
}
