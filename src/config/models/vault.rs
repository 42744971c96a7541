//! Credential vault configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Credential vault configuration
///
/// The operator secret itself is never part of the config file; only the
/// name of the environment variable it is read from is configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Environment variable holding the operator encryption secret
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            secret_env: default_secret_env(),
        }
    }
}

impl VaultConfig {
    /// Merge vault configurations (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.secret_env != default_secret_env() {
            self.secret_env = other.secret_env;
        }
        self
    }
}
