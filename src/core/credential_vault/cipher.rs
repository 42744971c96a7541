//! AES-256-GCM encryption of provider API keys
//!
//! The stored format is: base64(nonce || tag || ciphertext)
//! - nonce: 12 bytes (randomly generated per call)
//! - tag: 16 bytes (authentication tag)
//! - ciphertext: variable length (same as plaintext)
//!
//! The cipher key is derived from the operator secret with Argon2id. The
//! derivation is deliberately expensive so a leaked credential store is
//! slow to brute-force; long-lived callers should derive once and reuse
//! the key (see [`CredentialVault`](super::CredentialVault)).

use super::secret::EncryptionSecret;
use crate::utils::error::{GatewayError, Result};
use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine as _, engine::general_purpose};
use rand::RngCore;

/// AES-256-GCM nonce size (96 bits / 12 bytes as recommended by NIST)
const AES_GCM_NONCE_SIZE: usize = 12;

/// AES-256-GCM authentication tag size
const AES_GCM_TAG_SIZE: usize = 16;

/// Fixed salt for the key derivation. The operator secret is the only
/// secret input; the salt domain-separates this derivation from any other
/// use of the same secret.
const KDF_SALT: &[u8] = b"promptgate/credential-vault/v1";

/// Derive a 256-bit cipher key from the operator secret using Argon2id
pub(super) fn derive_cipher_key(secret: &EncryptionSecret) -> Result<[u8; 32]> {
    let mut key = [0u8; 32];
    argon2::Argon2::default()
        .hash_password_into(secret.expose(), KDF_SALT, &mut key)
        .map_err(|e| GatewayError::Crypto(format!("Key derivation failed: {}", e)))?;
    Ok(key)
}

/// Encrypt a provider API key for storage.
///
/// Each call generates a fresh random nonce, so encrypting the same key
/// twice yields different blobs.
pub fn encrypt_api_key(plaintext: &str, secret: &EncryptionSecret) -> Result<String> {
    let key = derive_cipher_key(secret)?;
    encrypt_with_key(plaintext, &key)
}

pub(super) fn encrypt_with_key(plaintext: &str, key: &[u8; 32]) -> Result<String> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    // Generate random 96-bit nonce (12 bytes)
    let mut nonce_bytes = [0u8; AES_GCM_NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let sealed = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| GatewayError::Crypto(format!("Encryption failed: {}", e)))?;

    // The aead API appends the tag to the ciphertext; the stored layout
    // keeps the tag next to the nonce instead
    let (ciphertext, tag) = sealed.split_at(sealed.len() - AES_GCM_TAG_SIZE);

    let mut blob = Vec::with_capacity(AES_GCM_NONCE_SIZE + AES_GCM_TAG_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(tag);
    blob.extend_from_slice(ciphertext);

    Ok(general_purpose::STANDARD.encode(&blob))
}

/// Decrypt a stored credential blob.
///
/// Fails closed: a tampered blob, wrong secret, or malformed input is an
/// error, never partial plaintext. Error messages carry no key material.
pub fn decrypt_api_key(blob: &str, secret: &EncryptionSecret) -> Result<String> {
    let key = derive_cipher_key(secret)?;
    decrypt_with_key(blob, &key)
}

pub(super) fn decrypt_with_key(blob: &str, key: &[u8; 32]) -> Result<String> {
    let bytes = general_purpose::STANDARD
        .decode(blob)
        .map_err(|_| GatewayError::decryption("stored credential is not valid base64"))?;

    // Validate minimum length (nonce + 16-byte auth tag)
    if bytes.len() < AES_GCM_NONCE_SIZE + AES_GCM_TAG_SIZE {
        return Err(GatewayError::decryption(
            "stored credential too short - possible corruption or truncation",
        ));
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let nonce = Nonce::from_slice(&bytes[..AES_GCM_NONCE_SIZE]);
    let tag = &bytes[AES_GCM_NONCE_SIZE..AES_GCM_NONCE_SIZE + AES_GCM_TAG_SIZE];
    let ciphertext = &bytes[AES_GCM_NONCE_SIZE + AES_GCM_TAG_SIZE..];

    // Reassemble the ciphertext || tag order the aead API expects
    let mut sealed = Vec::with_capacity(ciphertext.len() + AES_GCM_TAG_SIZE);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    // Decrypt and verify the authentication tag
    let plaintext = cipher.decrypt(nonce, sealed.as_slice()).map_err(|_| {
        GatewayError::decryption("decryption failed - data may have been tampered with or wrong key")
    })?;

    String::from_utf8(plaintext)
        .map_err(|_| GatewayError::decryption("decrypted credential is not valid UTF-8"))
}

/// Heuristic telling stored blobs apart from legacy plaintext keys.
///
/// Approximate on arbitrary strings, but any value produced by
/// [`encrypt_api_key`] is classified as encrypted: it decodes as base64
/// and is at least nonce + tag bytes long. Real provider keys contain
/// characters outside the base64 alphabet and fail the first check.
pub fn is_encrypted_api_key(value: &str) -> bool {
    match general_purpose::STANDARD.decode(value) {
        Ok(bytes) => bytes.len() >= AES_GCM_NONCE_SIZE + AES_GCM_TAG_SIZE,
        Err(_) => false,
    }
}
