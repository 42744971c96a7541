//! Workspace record storage
//!
//! The gateway persists nothing itself. Stored workspace records carry the
//! encrypted API key blob produced by the credential vault and hand it back
//! unchanged on read; plaintext keys never touch this layer.

mod memory;
mod types;

pub use memory::MemoryWorkspaceStore;
pub use types::{WorkspaceCredential, WorkspaceStore};
