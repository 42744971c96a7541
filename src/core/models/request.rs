//! Request types

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};

/// A prompt-generation request
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PromptRequest {
    /// Caller-supplied correlation id. Never part of the cache fingerprint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Model identifier
    pub model: String,

    /// Ordered conversation messages
    pub messages: Vec<PromptMessage>,

    /// Sampling temperature (0.0 - 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Whether the caller asked for a streamed response
    #[serde(default)]
    pub stream: bool,
}

impl PromptRequest {
    /// Check the request is well-formed before any quota is spent on it
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(GatewayError::validation("model must not be empty"));
        }
        if self.messages.is_empty() {
            return Err(GatewayError::validation("messages must not be empty"));
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(GatewayError::validation(
                    "temperature must be between 0.0 and 2.0",
                ));
            }
        }
        Ok(())
    }
}

/// A single conversation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Message role
    pub role: MessageRole,
    /// Message content
    pub content: String,
}

impl PromptMessage {
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Message role enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}
