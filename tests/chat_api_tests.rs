//! Chat API integration tests
//!
//! End-to-end tests driving the router directly, with httpmock standing in
//! for the upstream OpenRouter endpoint

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use openrouter_chat::config::{LoggingConfig, OpenRouterConfig, ServerConfig, Settings};
use openrouter_chat::handlers::create_router;
use openrouter_chat::utils::error::is_error_envelope;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Create test settings pointing at the given upstream base URL
fn test_settings(api_key: Option<&str>, base_url: &str) -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        openrouter: OpenRouterConfig {
            api_key: api_key.map(str::to_string),
            model: None,
            base_url: base_url.to_string(),
            timeout: 5,
            stream_timeout: 5,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "text".to_string(),
        },
    }
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn app_without_upstream(api_key: Option<&str>) -> Router {
    create_router(test_settings(api_key, "http://127.0.0.1:1"))
}

#[tokio::test]
async fn test_empty_messages_rejected_as_validation_error() {
    let app = app_without_upstream(Some("sk-or-test"));

    let response = app
        .oneshot(chat_request(r#"{"messages":[]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(is_error_envelope(&body));
    assert_eq!(body["error"]["type"], "validation_error");
    assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");
}

#[tokio::test]
async fn test_unrelated_payload_rejected_as_validation_error() {
    let app = app_without_upstream(Some("sk-or-test"));

    let response = app
        .oneshot(chat_request(r#"{"invalid":"data"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"]["type"], "validation_error");
}

#[tokio::test]
async fn test_malformed_json_body_is_a_validation_failure() {
    let app = app_without_upstream(Some("sk-or-test"));

    let response = app
        .oneshot(chat_request("{\"messages\": [ not json"))
        .await
        .unwrap();

    // Parse failures take the same rejected-request branch, not a 500
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(is_error_envelope(&body));
    assert_eq!(body["error"]["type"], "validation_error");
}

#[tokio::test]
async fn test_invalid_role_rejected() {
    let app = app_without_upstream(Some("sk-or-test"));

    let payload = json!({"messages": [{"role": "moderator", "content": "hi"}]}).to_string();
    let response = app.oneshot(chat_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_credential_is_a_configuration_error() {
    let app = app_without_upstream(None);

    let payload = json!({"messages": [{"role": "user", "content": "Hello"}]}).to_string();
    let response = app.oneshot(chat_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert!(is_error_envelope(&body));
    assert_eq!(body["error"]["type"], "api_error");
    assert_eq!(body["error"]["code"], "OPENROUTER_INIT_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("OPENROUTER_API_KEY"));
}

#[tokio::test]
async fn test_blank_credential_is_a_configuration_error() {
    let app = app_without_upstream(Some("   "));

    let payload = json!({"messages": [{"role": "user", "content": "Hello"}]}).to_string();
    let response = app.oneshot(chat_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], "OPENROUTER_INIT_ERROR");
}

#[tokio::test]
async fn test_valid_request_streams_completion() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("Authorization", "Bearer sk-or-test")
                .json_body_partial(r#"{"stream": true}"#);
            then.status(200)
                .header("Content-Type", "text/event-stream")
                .body(concat!(
                    "data: {\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\"},\"finish_reason\":null}]}\n\n",
                    "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hello\"},\"finish_reason\":null}]}\n\n",
                    "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\" world\"},\"finish_reason\":null}]}\n\n",
                    "data: [DONE]\n\n",
                ));
        })
        .await;

    let app = create_router(test_settings(Some("sk-or-test"), &server.base_url()));

    let payload = json!({"messages": [
        {"role": "system", "content": "You are a helpful assistant."},
        {"role": "user", "content": "Hello"},
        {"role": "assistant", "content": "Hi!"},
        {"role": "user", "content": "Say hello world."},
    ]})
    .to_string();

    let response = app.oneshot(chat_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/event-stream"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8_lossy(&body);

    // Deltas arrive in order, followed by the terminal done event
    let first = text.find("Hello").expect("first delta present");
    let second = text.find(" world").expect("second delta present");
    assert!(first < second);
    assert!(text.contains("text_delta"));
    assert!(text.contains("event: done"));
    assert!(!text.contains("\"error\""));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_rejection_before_streaming_is_an_api_error() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401)
                .header("Content-Type", "application/json")
                .body(r#"{"error":{"message":"Invalid API key","code":401}}"#);
        })
        .await;

    let app = create_router(test_settings(Some("sk-or-bad"), &server.base_url()));

    let payload = json!({"messages": [{"role": "user", "content": "Hello"}]}).to_string();
    let response = app.oneshot(chat_request(&payload)).await.unwrap();

    // The stream was never committed, so the failure is still an envelope
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    assert!(is_error_envelope(&body));
    assert_eq!(body["error"]["type"], "api_error");
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid API key"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app_without_upstream(Some("sk-or-test"));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "openrouter-chat");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "alive");
}
