//! HTTP client for the OpenAI and Anthropic wire protocols

use super::{PromptProvider, ProviderError, ProviderKind};
use crate::config::{ProviderConfig, TimeoutConfig};
use crate::core::models::{MessageRole, PromptRequest, ProviderResponse, Usage};
use crate::core::timeout_guard::CancelSignal;
use crate::utils::logging::sanitize_for_logging;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Token budget sent when the caller left max_tokens unset. The Anthropic
/// messages API requires an explicit value.
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// How much upstream error body to keep in error messages
const ERROR_BODY_LIMIT: usize = 200;

/// Reqwest-based [`PromptProvider`] implementation.
///
/// One instance speaks one protocol against one base URL. API keys are
/// passed per call and appear only in outbound request headers.
#[derive(Debug, Clone)]
pub struct HttpPromptProvider {
    kind: ProviderKind,
    base_url: String,
    http_client: Client,
}

impl HttpPromptProvider {
    /// Create a provider client from configuration
    ///
    /// The per-call deadline is enforced by the gateway's timeout guard;
    /// the client only carries the outer request envelope as a backstop
    /// so a standalone caller can never hang on a dead upstream.
    pub fn new(config: &ProviderConfig, timeouts: &TimeoutConfig) -> Result<Self, ProviderError> {
        let http_client = ClientBuilder::new()
            .timeout(timeouts.request_timeout())
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .map_err(|e| {
                ProviderError::network(config.kind, format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            kind: config.kind,
            base_url: config.endpoint(),
            http_client,
        })
    }

    fn endpoint_path(&self) -> &'static str {
        match self.kind {
            ProviderKind::OpenAi => "/v1/chat/completions",
            ProviderKind::Anthropic => "/v1/messages",
        }
    }

    fn build_headers(&self, api_key: &str) -> Result<reqwest::header::HeaderMap, ProviderError> {
        use reqwest::header::HeaderValue;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        if let Ok(user_agent) = format!("promptgate/{}", env!("CARGO_PKG_VERSION")).parse() {
            headers.insert("User-Agent", user_agent);
        }

        // A key that cannot be a header value cannot authenticate either
        match self.kind {
            ProviderKind::OpenAi => {
                let value = format!("Bearer {}", api_key)
                    .parse()
                    .map_err(|_| ProviderError::authentication(self.kind))?;
                headers.insert("Authorization", value);
            }
            ProviderKind::Anthropic => {
                let value = api_key
                    .parse()
                    .map_err(|_| ProviderError::authentication(self.kind))?;
                headers.insert("x-api-key", value);
                headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
            }
        }

        Ok(headers)
    }

    /// Build the wire request body. Streaming is always disabled upstream,
    /// whatever the caller asked for.
    fn build_body(&self, request: &PromptRequest) -> Value {
        match self.kind {
            ProviderKind::OpenAi => {
                let messages: Vec<Value> = request
                    .messages
                    .iter()
                    .map(|m| json!({"role": m.role.as_str(), "content": m.content}))
                    .collect();

                let mut body = json!({
                    "model": request.model,
                    "messages": messages,
                    "stream": false,
                });
                if let Some(temperature) = request.temperature {
                    body["temperature"] = json!(temperature);
                }
                if let Some(max_tokens) = request.max_tokens {
                    body["max_tokens"] = json!(max_tokens);
                }
                body
            }
            ProviderKind::Anthropic => {
                // System messages travel in the dedicated top-level field
                let system = request
                    .messages
                    .iter()
                    .filter(|m| m.role == MessageRole::System)
                    .map(|m| m.content.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");

                let messages: Vec<Value> = request
                    .messages
                    .iter()
                    .filter(|m| m.role != MessageRole::System)
                    .map(|m| json!({"role": m.role.as_str(), "content": m.content}))
                    .collect();

                let mut body = json!({
                    "model": request.model,
                    "messages": messages,
                    "max_tokens": request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
                    "stream": false,
                });
                if !system.is_empty() {
                    body["system"] = json!(system);
                }
                if let Some(temperature) = request.temperature {
                    body["temperature"] = json!(temperature);
                }
                body
            }
        }
    }

    async fn send_request(
        &self,
        request: &PromptRequest,
        api_key: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let url = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint_path()
        );
        let headers = self.build_headers(api_key)?;
        let body = self.build_body(request);

        debug!(provider = %self.kind, model = %request.model, "dispatching prompt request");

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::network(self.kind, format!("Network error: {}", e)))?;

        self.handle_response(response).await
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ProviderResponse, ProviderError> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(self.map_http_error(status.as_u16(), &body));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::parse(self.kind, format!("invalid JSON: {}", e)))?;

        self.parse_response(&payload)
    }

    fn map_http_error(&self, status: u16, body: &str) -> ProviderError {
        match status {
            401 | 403 => ProviderError::authentication(self.kind),
            429 => ProviderError::rate_limited(self.kind, Self::extract_retry_after(body)),
            // Upstream error bodies have been seen echoing request headers;
            // redact before the text can reach a log line
            _ => ProviderError::api(
                self.kind,
                status,
                truncate(&sanitize_for_logging(body), ERROR_BODY_LIMIT),
            ),
        }
    }

    /// Pull a retry delay out of a 429 body, when the provider sent one
    fn extract_retry_after(body: &str) -> Option<u64> {
        let json: Value = serde_json::from_str(body).ok()?;
        json.get("retry_after")
            .or_else(|| json.get("error").and_then(|e| e.get("retry_after")))
            .and_then(Value::as_u64)
    }

    fn parse_response(&self, payload: &Value) -> Result<ProviderResponse, ProviderError> {
        match self.kind {
            ProviderKind::OpenAi => self.parse_openai(payload),
            ProviderKind::Anthropic => self.parse_anthropic(payload),
        }
    }

    fn parse_openai(&self, payload: &Value) -> Result<ProviderResponse, ProviderError> {
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ProviderError::parse(self.kind, "response has no choices[0].message.content")
            })?;

        Ok(ProviderResponse {
            id: payload["id"].as_str().unwrap_or_default().to_string(),
            model: payload["model"].as_str().unwrap_or_default().to_string(),
            created: payload["created"]
                .as_i64()
                .unwrap_or_else(|| chrono::Utc::now().timestamp()),
            content: content.to_string(),
            usage: Self::parse_openai_usage(payload),
        })
    }

    fn parse_openai_usage(payload: &Value) -> Option<Usage> {
        let usage = payload.get("usage")?;
        let prompt_tokens = usage.get("prompt_tokens")?.as_u64()? as u32;
        let completion_tokens = usage.get("completion_tokens")?.as_u64()? as u32;
        let total_tokens = usage
            .get("total_tokens")
            .and_then(Value::as_u64)
            .map(|t| t as u32)
            .unwrap_or(prompt_tokens + completion_tokens);

        Some(Usage {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        })
    }

    fn parse_anthropic(&self, payload: &Value) -> Result<ProviderResponse, ProviderError> {
        let content = payload["content"]
            .as_array()
            .and_then(|parts| {
                let text: Vec<&str> = parts
                    .iter()
                    .filter(|part| part["type"].as_str() == Some("text"))
                    .filter_map(|part| part["text"].as_str())
                    .collect();
                if text.is_empty() { None } else { Some(text.join("")) }
            })
            .ok_or_else(|| ProviderError::parse(self.kind, "response has no text content"))?;

        Ok(ProviderResponse {
            id: payload["id"].as_str().unwrap_or_default().to_string(),
            model: payload["model"].as_str().unwrap_or_default().to_string(),
            // The messages API carries no creation timestamp
            created: chrono::Utc::now().timestamp(),
            content,
            usage: Self::parse_anthropic_usage(payload),
        })
    }

    fn parse_anthropic_usage(payload: &Value) -> Option<Usage> {
        let usage = payload.get("usage")?;
        let input_tokens = usage.get("input_tokens")?.as_u64()? as u32;
        let output_tokens = usage.get("output_tokens")?.as_u64()? as u32;
        Some(Usage::new(input_tokens, output_tokens))
    }
}

#[async_trait]
impl PromptProvider for HttpPromptProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn generate(
        &self,
        request: &PromptRequest,
        api_key: &str,
        mut cancel: CancelSignal,
    ) -> Result<ProviderResponse, ProviderError> {
        tokio::select! {
            result = self.send_request(request, api_key) => result,
            _ = cancel.cancelled() => {
                debug!(provider = %self.kind, "prompt request cancelled before completion");
                Err(ProviderError::cancelled(self.kind))
            }
        }
    }
}

fn truncate(body: &str, limit: usize) -> String {
    if body.len() <= limit {
        body.to_string()
    } else {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i <= limit)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    }
}
