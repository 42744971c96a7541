//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::gateway::PromptGateway;
use crate::storage::WorkspaceStore;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for sharing across worker threads.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// The protective gateway owning limiter, cache, vault, and guard
    pub gateway: Arc<PromptGateway>,
    /// Workspace record store
    pub workspaces: Arc<dyn WorkspaceStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        gateway: Arc<PromptGateway>,
        workspaces: Arc<dyn WorkspaceStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            gateway,
            workspaces,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
