//! Operator secret handling

use crate::utils::error::{GatewayError, Result};
use std::fmt;

/// Minimum secret length in characters
pub const MIN_SECRET_CHARS: usize = 32;

/// The operator-provided secret all cipher keys are derived from.
///
/// Read from the environment once at startup; a missing or short secret is
/// a configuration error and the gateway refuses to start. Debug output is
/// redacted so the value cannot leak through logs or error chains.
#[derive(Clone)]
pub struct EncryptionSecret(String);

impl EncryptionSecret {
    /// Validate and wrap a secret value
    pub fn new<S: Into<String>>(value: S) -> Result<Self> {
        let value = value.into();
        let chars = value.chars().count();
        if chars < MIN_SECRET_CHARS {
            return Err(GatewayError::config(format!(
                "encryption secret must be at least {} characters, got {}",
                MIN_SECRET_CHARS, chars
            )));
        }
        Ok(Self(value))
    }

    /// Read the secret from the named environment variable
    pub fn from_env(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(value) => Self::new(value),
            Err(_) => Err(GatewayError::config(format!(
                "{} is not set; the credential vault cannot operate without it",
                var
            ))),
        }
    }

    /// The raw secret bytes, for key derivation only
    pub(super) fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for EncryptionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionSecret(****)")
    }
}
