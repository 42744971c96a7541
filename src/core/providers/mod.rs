//! Upstream prompt providers
//!
//! The gateway speaks two wire protocols, OpenAI chat completions and
//! Anthropic messages, through one [`PromptProvider`] seam. Streaming is
//! never requested upstream regardless of what the caller asked for; the
//! gateway only works with completed responses.

mod client;
mod error;

pub use client::HttpPromptProvider;
pub use error::ProviderError;

use crate::core::models::{PromptRequest, ProviderResponse};
use crate::core::timeout_guard::CancelSignal;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported upstream providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions protocol
    #[default]
    OpenAi,
    /// Anthropic messages protocol
    Anthropic,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    /// Default API endpoint for this provider
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com",
            ProviderKind::Anthropic => "https://api.anthropic.com",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client able to produce completed prompt responses.
///
/// Implementations receive the plaintext API key per call; they never hold
/// credentials. The cancel signal fires when the request deadline passes,
/// at which point any in-flight work should stop.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromptProvider: Send + Sync {
    /// Which provider protocol this implementation speaks
    fn kind(&self) -> ProviderKind;

    /// Generate a completed response for the request
    async fn generate(
        &self,
        request: &PromptRequest,
        api_key: &str,
        cancel: CancelSignal,
    ) -> Result<ProviderResponse, ProviderError>;
}
