//! # promptgate
//!
//! A protective gateway between tenant-facing prompt-generation requests
//! and an upstream LLM provider. Per workspace, it bounds the rate of
//! outbound calls across minute/hour/day windows, memoizes repeated
//! requests, keeps provider credentials encrypted at rest, and bounds the
//! wall-clock time of every call with cooperative cancellation.
//!
//! ## Components
//!
//! - **Rate Limiter**: fixed-window admission control per workspace, quota
//!   consumed before dispatch
//! - **Response Cache**: fingerprint-keyed memoization with TTL and LRU
//!   eviction
//! - **Credential Vault**: slow-KDF key derivation plus authenticated
//!   encryption for stored API keys
//! - **Timeout Guard**: hard deadlines with cooperative cancellation and
//!   guaranteed tracking cleanup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use promptgate::{Config, PromptGateway, PromptRequest, PromptMessage};
//! use promptgate::storage::{MemoryWorkspaceStore, WorkspaceStore, WorkspaceCredential};
//! use promptgate::ProviderKind;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = PromptGateway::from_config(&config)?;
//!
//!     let store = MemoryWorkspaceStore::new();
//!     store
//!         .upsert(WorkspaceCredential {
//!             workspace_id: "ws-1".to_string(),
//!             provider: ProviderKind::OpenAi,
//!             encrypted_api_key: gateway.vault().encrypt_api_key("sk-...")?,
//!             limits: None,
//!         })
//!         .await?;
//!
//!     let credential = store.get("ws-1").await?.unwrap();
//!     let request = PromptRequest {
//!         model: "gpt-4o".to_string(),
//!         messages: vec![PromptMessage::user("Draft a release note")],
//!         ..Default::default()
//!     };
//!
//!     let outcome = gateway.generate_prompt(&credential, &request).await?;
//!     println!("{}", outcome.response.content);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::credential_vault::{CredentialVault, EncryptionSecret};
pub use core::gateway::{GenerateOutcome, PromptGateway};
pub use core::models::{MessageRole, PromptMessage, PromptRequest, ProviderResponse, Usage};
pub use core::providers::{PromptProvider, ProviderError, ProviderKind};
pub use core::rate_limiter::{AdmissionDecision, RateLimiter, RateLimits};
pub use core::response_cache::{CacheStats, ResponseCache};
pub use core::timeout_guard::{CancelSignal, TimeoutGuard};
pub use utils::error::{GatewayError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
