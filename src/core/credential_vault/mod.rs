//! Encryption of workspace provider credentials
//!
//! Provider API keys are stored only as AES-256-GCM blobs; plaintext
//! exists in memory for the duration of a single upstream call and is
//! never logged or persisted. Every failure mode is fail-closed: garbage
//! in, error out.

mod cipher;
mod secret;
mod vault;


pub use cipher::{decrypt_api_key, encrypt_api_key, is_encrypted_api_key};
pub use secret::{EncryptionSecret, MIN_SECRET_CHARS};
pub use vault::CredentialVault;
