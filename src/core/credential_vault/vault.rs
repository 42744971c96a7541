//! Vault holding a derived cipher key for the process lifetime

use super::cipher;
use super::secret::EncryptionSecret;
use crate::utils::error::Result;
use std::fmt;

/// Encrypts and decrypts workspace provider credentials.
///
/// The Argon2id derivation is deliberately slow, so the vault runs it once
/// at construction and reuses the derived key for every call. All state is
/// immutable afterwards; the vault is freely shared across concurrent
/// requests.
pub struct CredentialVault {
    cipher_key: [u8; 32],
}

impl CredentialVault {
    /// Build a vault from a validated operator secret
    pub fn new(secret: &EncryptionSecret) -> Result<Self> {
        Ok(Self {
            cipher_key: cipher::derive_cipher_key(secret)?,
        })
    }

    /// Build a vault whose secret comes from the named environment
    /// variable. Fails when the variable is unset or the secret is short.
    pub fn from_env(var: &str) -> Result<Self> {
        Self::new(&EncryptionSecret::from_env(var)?)
    }

    /// Encrypt a plaintext provider API key for storage
    pub fn encrypt_api_key(&self, plaintext: &str) -> Result<String> {
        cipher::encrypt_with_key(plaintext, &self.cipher_key)
    }

    /// Decrypt a stored credential blob back to the plaintext key
    pub fn decrypt_api_key(&self, blob: &str) -> Result<String> {
        cipher::decrypt_with_key(blob, &self.cipher_key)
    }

    /// Whether a stored value already looks like an encrypted blob
    pub fn is_encrypted_api_key(&self, value: &str) -> bool {
        cipher::is_encrypted_api_key(value)
    }
}

impl fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialVault(****)")
    }
}
