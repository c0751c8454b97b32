//! The HTTP client against a loopback stub.

use aplus::config::GenerationConfig;
use aplus::error::ApiError;
use aplus::provider::{GenerationClient, OllamaClient};

use super::test_utils::spawn_stub;

fn client(url: &str) -> OllamaClient {
    let client = OllamaClient::new(&GenerationConfig {
        endpoint: url.to_string(),
        request_timeout_secs: 5,
        ..GenerationConfig::default()
    })
    .unwrap();
    client.set_credential("sk-stub-key").unwrap();
    client
}

#[tokio::test]
async fn test_success_trims_text_and_sends_bearer() {
    let stub = spawn_stub(200, r#"{"response":"  A fine tagline  "}"#).await;
    let text = client(&stub.url).generate("Write a tagline", 150).await.unwrap();
    assert_eq!(text, "A fine tagline");

    let requests = stub.requests.lock().clone();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.starts_with("POST /v1/llama"));
    assert!(request
        .lines()
        .any(|line| line.eq_ignore_ascii_case("authorization: Bearer sk-stub-key")));

    let body = request.split("\r\n\r\n").nth(1).unwrap();
    let value: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"prompt": "Write a tagline", "model": "llama2", "max_tokens": 150})
    );
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let stub = spawn_stub(500, r#"{"error":"boom"}"#).await;
    let err = client(&stub.url).generate("anything", 10).await.unwrap_err();
    match err {
        ApiError::ProviderStatus { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("boom"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_response_field() {
    let stub = spawn_stub(200, r#"{"text":"wrong key"}"#).await;
    let err = client(&stub.url).generate("anything", 10).await.unwrap_err();
    assert!(matches!(err, ApiError::ProviderError(msg) if msg.contains("response")));
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let client = client("http://127.0.0.1:9/v1/llama");
    let err = client.generate("anything", 10).await.unwrap_err();
    assert!(matches!(err, ApiError::ProviderRequestFailed(_)));
}
