//! Domain models
//!
//! Unified data structures for prompt-generation requests and provider
//! responses.

pub mod request;
pub mod response;

pub use request::{MessageRole, PromptMessage, PromptRequest};
pub use response::{ProviderResponse, Usage};
