//! In-memory workspace store

use super::types::{WorkspaceCredential, WorkspaceStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// DashMap-backed store for single-process deployments and tests
#[derive(Debug, Default)]
pub struct MemoryWorkspaceStore {
    records: DashMap<String, WorkspaceCredential>,
}

impl MemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl WorkspaceStore for MemoryWorkspaceStore {
    async fn get(&self, workspace_id: &str) -> Result<Option<WorkspaceCredential>> {
        Ok(self.records.get(workspace_id).map(|r| r.clone()))
    }

    async fn upsert(&self, record: WorkspaceCredential) -> Result<()> {
        self.records.insert(record.workspace_id.clone(), record);
        Ok(())
    }

    async fn remove(&self, workspace_id: &str) -> Result<bool> {
        Ok(self.records.remove(workspace_id).is_some())
    }
}
