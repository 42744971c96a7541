//! Provider configuration

use super::*;
use crate::core::providers::ProviderKind;
use serde::{Deserialize, Serialize};

/// Upstream provider configuration
///
/// No API key lives here: credentials are stored per workspace as encrypted
/// blobs and only decrypted at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Which provider protocol to speak
    #[serde(default)]
    pub kind: ProviderKind,
    /// Override of the provider base URL (defaults per kind)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Connect timeout for the upstream HTTP client in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            base_url: None,
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl ProviderConfig {
    /// Merge provider configurations (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.kind != ProviderKind::default() {
            self.kind = other.kind;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.connect_timeout_ms != default_connect_timeout_ms() {
            self.connect_timeout_ms = other.connect_timeout_ms;
        }
        self
    }

    /// Effective base URL: the override or the kind's default endpoint
    pub fn endpoint(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.kind.default_base_url().to_string())
    }
}
