// tests/provider_tests.rs
//
// Drives the real providers against a local stand-in for the upstream
// APIs, so request shape and body handling are exercised end to end
// without touching the network.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use zoda_ai::fallback::fortunes_for;
use zoda_ai::models::{FortuneProviderConfig, ImageProviderConfig};
use zoda_ai::provider::{OpenAiImageProvider, OpenRouterFortuneProvider};
use zoda_ai::service::FortuneService;
use zoda_ai::traits::{FortuneProvider, ImageProvider};

#[derive(Clone, Default)]
struct Captured {
    headers: Arc<Mutex<Option<HeaderMap>>>,
    body: Arc<Mutex<Option<Value>>>,
}

async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn fortune_config(base: &str) -> FortuneProviderConfig {
    let mut cfg = FortuneProviderConfig::with_key("test-key");
    cfg.api_base = Some(base.to_string());
    cfg
}

fn image_config(base: &str) -> ImageProviderConfig {
    let mut cfg = ImageProviderConfig::with_key("test-key");
    cfg.api_base = Some(base.to_string());
    cfg
}

#[tokio::test]
async fn fortune_provider_sends_expected_request_and_parses_content() {
    let captured = Captured::default();
    let router = Router::new()
        .route(
            "/chat/completions",
            post(
                |State(cap): State<Captured>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    *cap.headers.lock().unwrap() = Some(headers);
                    *cap.body.lock().unwrap() = Some(body);
                    Json(json!({
                        "choices": [{ "message": { "content": "  The stars gallop with you.  " } }]
                    }))
                },
            ),
        )
        .with_state(captured.clone());
    let base = spawn_upstream(router).await;

    let provider = OpenRouterFortuneProvider::new(fortune_config(&base));
    let fortune = provider
        .generate_fortune("Alice", "Horse", 1990)
        .await
        .unwrap();
    assert_eq!(fortune, "The stars gallop with you.");

    // 1) attribution headers travel with every call
    let headers = captured.headers.lock().unwrap().take().unwrap();
    assert_eq!(headers["authorization"], "Bearer test-key");
    assert_eq!(headers["x-title"], "Zoda Fortune Teller");
    assert!(headers.contains_key("http-referer"));

    // 2) payload carries the model, both prompt roles, and the token cap
    let body = captured.body.lock().unwrap().take().unwrap();
    assert_eq!(body["model"], "openai/gpt-4o-mini");
    assert_eq!(body["max_tokens"], 150);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[1]["content"]
        .as_str()
        .unwrap()
        .contains("Year of the Horse"));
}

#[tokio::test]
async fn fortune_provider_errors_on_upstream_500() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": { "message": "boom" } })),
            )
        }),
    );
    let base = spawn_upstream(router).await;

    let provider = OpenRouterFortuneProvider::new(fortune_config(&base));
    let err = provider
        .generate_fortune("Alice", "Horse", 1990)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn fortune_service_recovers_upstream_failure_with_sign_fallback() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "nope") }),
    );
    let base = spawn_upstream(router).await;

    let provider = OpenRouterFortuneProvider::new(fortune_config(&base));
    let service = FortuneService::new(Some(Arc::new(provider)));

    let out = service.fortune_for("Alice", "Horse", 1990).await;
    assert!(out.from_fallback);
    assert!(fortunes_for("Horse").contains(&out.text.as_str()));
}

#[tokio::test]
async fn image_provider_returns_remote_url() {
    let captured = Captured::default();
    let router = Router::new()
        .route(
            "/images/generations",
            post(
                |State(cap): State<Captured>, Json(body): Json<Value>| async move {
                    *cap.body.lock().unwrap() = Some(body);
                    Json(json!({ "data": [{ "url": "https://images.example/zoda.png" }] }))
                },
            ),
        )
        .with_state(captured.clone());
    let base = spawn_upstream(router).await;

    let provider = OpenAiImageProvider::new(image_config(&base));
    let url = provider.generate_image("a mystical horse").await.unwrap();
    assert_eq!(url, "https://images.example/zoda.png");

    let body = captured.body.lock().unwrap().take().unwrap();
    assert_eq!(body["n"], 1);
    assert_eq!(body["size"], "512x512");
    assert_eq!(body["prompt"], "a mystical horse");
}

#[tokio::test]
async fn image_provider_converts_b64_payload_to_data_uri() {
    let router = Router::new().route(
        "/images/generations",
        post(|| async { Json(json!({ "data": [{ "b64_json": "aGVsbG8=" }] })) }),
    );
    let base = spawn_upstream(router).await;

    let provider = OpenAiImageProvider::new(image_config(&base));
    let url = provider.generate_image("a mystical rat").await.unwrap();
    assert_eq!(url, "data:image/png;base64,aGVsbG8=");
}

#[tokio::test]
async fn image_provider_errors_on_bad_gateway() {
    let router = Router::new().route(
        "/images/generations",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let base = spawn_upstream(router).await;

    let provider = OpenAiImageProvider::new(image_config(&base));
    let err = provider.generate_image("anything").await.unwrap_err();
    assert!(err.to_string().contains("502"));
}
