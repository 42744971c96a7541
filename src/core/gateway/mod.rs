//! Gateway composition
//!
//! Wires the rate limiter, response cache, credential vault, and timeout
//! guard into one value that owns all per-process gateway state.

mod gateway;
mod types;

pub use gateway::PromptGateway;
pub use types::GenerateOutcome;
