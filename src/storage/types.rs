//! Workspace record types

use crate::core::providers::ProviderKind;
use crate::core::rate_limiter::RateLimits;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One stored workspace record
///
/// `encrypted_api_key` is an opaque blob; callers decrypt it through the
/// credential vault just before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceCredential {
    /// Workspace identifier, the unit of quota and cache isolation
    pub workspace_id: String,
    /// Provider the stored key belongs to
    pub provider: ProviderKind,
    /// Encrypted provider API key
    pub encrypted_api_key: String,
    /// Per-workspace admission limits; gateway defaults apply when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<RateLimits>,
}

/// Storage backend for workspace records
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Fetch a workspace record by id
    async fn get(&self, workspace_id: &str) -> Result<Option<WorkspaceCredential>>;

    /// Insert or replace a workspace record
    async fn upsert(&self, record: WorkspaceCredential) -> Result<()>;

    /// Remove a workspace record, reporting whether it existed
    async fn remove(&self, workspace_id: &str) -> Result<bool>;
}
