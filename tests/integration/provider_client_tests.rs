//! Provider client tests against a wiremock upstream
//!
//! These pin the wire contract per provider: endpoint path, auth headers,
//! body shape, and how upstream failures map to [`ProviderError`].

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use promptgate::config::{ProviderConfig, TimeoutConfig};
use promptgate::core::providers::HttpPromptProvider;
use promptgate::{CancelSignal, PromptMessage, PromptProvider, ProviderError, ProviderKind};

use crate::common::fixtures::{
    PromptRequestFactory, anthropic_success_body, openai_success_body,
};

fn client(kind: ProviderKind, base_url: &str) -> HttpPromptProvider {
    let config = ProviderConfig {
        kind,
        base_url: Some(base_url.to_string()),
        connect_timeout_ms: 1_000,
    };
    let timeouts = TimeoutConfig {
        request_timeout_ms: 5_000,
        provider_timeout_ms: 4_000,
    };
    HttpPromptProvider::new(&config, &timeouts).expect("client from test config")
}

#[tokio::test]
async fn test_openai_wire_contract_and_parse() {
    let server = MockServer::start().await;
    let _guard = Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o",
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_success_body("It works")))
        .expect(1)
        .mount_as_scoped(&server)
        .await;

    let client = client(ProviderKind::OpenAi, &server.uri());
    let response = client
        .generate(
            &PromptRequestFactory::simple("ping"),
            "sk-test",
            CancelSignal::never(),
        )
        .await
        .expect("upstream accepted the request");

    assert_eq!(response.id, "chatcmpl-test");
    assert_eq!(response.model, "gpt-4o");
    assert_eq!(response.content, "It works");
    assert_eq!(response.created, 1_700_000_000);
    let usage = response.usage.expect("usage present");
    assert_eq!(usage.prompt_tokens, 9);
    assert_eq!(usage.completion_tokens, 12);
    assert_eq!(usage.total_tokens, 21);
}

#[tokio::test]
async fn test_anthropic_wire_contract_and_parse() {
    let server = MockServer::start().await;
    // System turns move out of `messages` into the top-level `system` field
    let _guard = Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(serde_json::json!({
            "system": "Be brief",
            "max_tokens": 64
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(anthropic_success_body("Fine. Done.")),
        )
        .expect(1)
        .mount_as_scoped(&server)
        .await;

    let mut request = PromptRequestFactory::simple("explain quicksort");
    request.model = "claude-3-5-sonnet-20241022".to_string();
    request
        .messages
        .insert(0, PromptMessage::system("Be brief"));

    let client = client(ProviderKind::Anthropic, &server.uri());
    let response = client
        .generate(&request, "sk-ant-test", CancelSignal::never())
        .await
        .expect("upstream accepted the request");

    assert_eq!(response.id, "msg_test");
    assert_eq!(response.content, "Fine. Done.");
    let usage = response.usage.expect("usage present");
    assert_eq!(usage.total_tokens, 21);
}

#[tokio::test]
async fn test_unauthorized_is_an_authentication_error() {
    let server = MockServer::start().await;
    let _guard = Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"error": {"message": "invalid key"}})),
        )
        .mount_as_scoped(&server)
        .await;

    let client = client(ProviderKind::OpenAi, &server.uri());
    let err = client
        .generate(
            &PromptRequestFactory::simple("ping"),
            "sk-wrong",
            CancelSignal::never(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Authentication { .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_rate_limited_carries_retry_after() {
    let server = MockServer::start().await;
    let _guard = Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(serde_json::json!({"error": {"retry_after": 13}})),
        )
        .mount_as_scoped(&server)
        .await;

    let client = client(ProviderKind::OpenAi, &server.uri());
    let err = client
        .generate(
            &PromptRequestFactory::simple("ping"),
            "sk-test",
            CancelSignal::never(),
        )
        .await
        .unwrap_err();

    match err {
        ProviderError::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, Some(13)),
        other => panic!("expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    let _guard = Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount_as_scoped(&server)
        .await;

    let client = client(ProviderKind::OpenAi, &server.uri());
    let err = client
        .generate(
            &PromptRequestFactory::simple("ping"),
            "sk-test",
            CancelSignal::never(),
        )
        .await
        .unwrap_err();

    match &err {
        ProviderError::Api {
            status, message, ..
        } => {
            assert_eq!(*status, 500);
            assert!(message.contains("upstream exploded"));
        }
        other => panic!("expected Api, got {:?}", other),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_upstream_is_a_network_error() {
    // Grab a live address, then release it so the port refuses. A pooled
    // `MockServer` keeps its listener alive after drop, so bind directly.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let base_url = format!("http://{}", listener.local_addr().expect("listener address"));
    drop(listener);

    let client = client(ProviderKind::OpenAi, &base_url);
    let err = client
        .generate(
            &PromptRequestFactory::simple("ping"),
            "sk-test",
            CancelSignal::never(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Network { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_success_body_is_a_parse_error() {
    let server = MockServer::start().await;
    let _guard = Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "unexpected": true
        })))
        .mount_as_scoped(&server)
        .await;

    let client = client(ProviderKind::OpenAi, &server.uri());
    let err = client
        .generate(
            &PromptRequestFactory::simple("ping"),
            "sk-test",
            CancelSignal::never(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Parse { .. }));
}
