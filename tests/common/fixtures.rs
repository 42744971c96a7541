//! Test fixtures and data factories

use std::sync::Arc;

use promptgate::config::Config;
use promptgate::core::providers::HttpPromptProvider;
use promptgate::server::AppState;
use promptgate::storage::{MemoryWorkspaceStore, WorkspaceCredential, WorkspaceStore};
use promptgate::{
    CredentialVault, EncryptionSecret, PromptGateway, PromptMessage, PromptRequest, ProviderKind,
};

/// Operator secret shared by every test vault (32+ characters)
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Upstream key stored for the default test workspace
pub const TEST_API_KEY: &str = "sk-upstream-0123456789";

/// Workspace registered by [`gateway_state`]
pub const TEST_WORKSPACE: &str = "ws-acme";

/// Vault bound to the shared test secret
pub fn test_vault() -> CredentialVault {
    let secret = EncryptionSecret::new(TEST_SECRET).expect("test secret is long enough");
    CredentialVault::new(&secret).expect("vault from test secret")
}

/// Gateway configuration pointed at a mock upstream
///
/// Limits are small enough to exhaust in a test loop; the hour and day
/// windows are wide open so only the minute window is under test.
pub fn test_config(base_url: &str, minute_limit: u32) -> Config {
    let mut config = Config::default();
    config.gateway.provider.kind = ProviderKind::OpenAi;
    config.gateway.provider.base_url = Some(base_url.to_string());
    config.gateway.rate_limit.minute_limit = minute_limit;
    config.gateway.rate_limit.hour_limit = 10_000;
    config.gateway.rate_limit.day_limit = 100_000;
    config.gateway.timeouts.request_timeout_ms = 5_000;
    config.gateway.timeouts.provider_timeout_ms = 4_000;
    config
}

/// Factory for prompt requests
pub struct PromptRequestFactory;

impl PromptRequestFactory {
    /// A deterministic single-turn request (temperature pinned to 0.0)
    pub fn simple(prompt: &str) -> PromptRequest {
        PromptRequest {
            request_id: None,
            model: "gpt-4o".to_string(),
            messages: vec![PromptMessage::user(prompt)],
            temperature: Some(0.0),
            max_tokens: Some(64),
            stream: false,
        }
    }

    /// Same request with streaming requested
    pub fn streaming(prompt: &str) -> PromptRequest {
        let mut request = Self::simple(prompt);
        request.stream = true;
        request
    }
}

/// Application state with one registered workspace, wired to `server`
pub async fn gateway_state(config: Config) -> AppState {
    let vault = test_vault();
    let provider = HttpPromptProvider::new(config.provider(), config.timeouts())
        .expect("provider client from test config");
    let gateway = PromptGateway::new(&config, vault, Arc::new(provider))
        .expect("gateway from test config");

    let workspaces: Arc<dyn WorkspaceStore> = Arc::new(MemoryWorkspaceStore::new());
    workspaces
        .upsert(WorkspaceCredential {
            workspace_id: TEST_WORKSPACE.to_string(),
            provider: ProviderKind::OpenAi,
            encrypted_api_key: test_vault()
                .encrypt_api_key(TEST_API_KEY)
                .expect("encrypt test key"),
            limits: None,
        })
        .await
        .expect("seed test workspace");

    AppState::new(config, Arc::new(gateway), workspaces)
}

/// Chat-completions success body in the OpenAI wire shape
pub fn openai_success_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
    })
}

/// Messages success body in the Anthropic wire shape
pub fn anthropic_success_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-5-sonnet-20241022",
        "content": [{"type": "text", "text": content}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 9, "output_tokens": 12}
    })
}
