//! Keyword extractor against a mock chat-completions endpoint.

use openpools_core::{Error, KeywordExtractor, KeywordInput, Source};
use openpools_inference::{OpenAIConfig, OpenAIKeywordExtractor};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 50, "completion_tokens": 20, "total_tokens": 70}
    })
}

fn extractor(server: &MockServer, api_key: Option<&str>) -> OpenAIKeywordExtractor {
    OpenAIKeywordExtractor::new(OpenAIConfig {
        base_url: server.uri(),
        api_key: api_key.map(str::to_string),
        model: "test-model".to_string(),
        timeout_seconds: 5,
        max_input_chars: 1_000,
    })
    .expect("Failed to create extractor")
}

#[tokio::test]
async fn test_extract_parses_mixed_keyword_shapes() {
    let server = MockServer::start().await;
    let content = r#"{"keywords": [
        {"keyword": "Rust", "category": "skills", "weight": 0.99},
        "PostgreSQL",
        {"keyword": "Acme Corp", "category": "companies"}
    ]}"#;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(content)))
        .expect(1)
        .mount(&server)
        .await;

    let keywords = extractor(&server, Some("test-key"))
        .extract("Rust engineer at Acme Corp", &Source::Resume)
        .await
        .unwrap();

    assert_eq!(keywords.len(), 3);
    assert_eq!(keywords[0].text(), "Rust");
    assert_eq!(keywords[1], KeywordInput::Text("PostgreSQL".to_string()));
    match &keywords[2] {
        KeywordInput::Weighted(raw) => assert_eq!(raw.category.as_deref(), Some("companies")),
        other => panic!("expected weighted keyword, got {:?}", other),
    }
}

#[tokio::test]
async fn test_extract_empty_text_skips_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let keywords = extractor(&server, None)
        .extract("   ", &Source::Linkedin)
        .await
        .unwrap();
    assert!(keywords.is_empty());
}

#[tokio::test]
async fn test_extract_invalid_model_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_response("Sorry, I can't help.")),
        )
        .mount(&server)
        .await;

    let err = extractor(&server, None)
        .extract("resume text", &Source::Resume)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Extraction(_)));
    assert_eq!(err.public_message(), "failed to extract keywords");
}

#[tokio::test]
async fn test_extract_rate_limit_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"message": "Too many requests", "type": "rate_limit_exceeded", "code": null}
        })))
        .mount(&server)
        .await;

    let err = extractor(&server, None)
        .extract("resume text", &Source::Resume)
        .await
        .unwrap_err();
    assert!(err.is_transient());
    assert!(err.to_string().contains("Too many requests"));
}

#[tokio::test]
async fn test_extract_auth_failure_is_config_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"message": "Invalid API key", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let err = extractor(&server, Some("wrong"))
        .extract("resume text", &Source::Resume)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_extract_truncates_long_documents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_response(r#"{"keywords": []}"#)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let long = "x".repeat(50_000);
    extractor(&server, None)
        .extract(&long, &Source::Resume)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user_message = body["messages"][1]["content"].as_str().unwrap();
    assert!(user_message.len() < 1_100);
}
