use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use traductor_backend::config::Config;
use traductor_backend::routes;
use traductor_backend::state::AppState;
use traductor_backend::translator::TranslatorInterface;

/// Deterministic stand-in for the Marian engine.
struct MockTranslator;

#[async_trait]
impl TranslatorInterface for MockTranslator {
    async fn translate(&self, text: &str) -> Result<String, anyhow::Error> {
        Ok(format!("es:{}", text))
    }

    fn model_id(&self) -> &str {
        "mock/opus-mt-en-es"
    }
}

/// Engine that always fails, for the 500 path.
struct FailingTranslator;

#[async_trait]
impl TranslatorInterface for FailingTranslator {
    async fn translate(&self, _text: &str) -> Result<String, anyhow::Error> {
        Err(anyhow::anyhow!("modelo no disponible"))
    }

    fn model_id(&self) -> &str {
        "mock/failing"
    }
}

fn app(translator: Arc<dyn TranslatorInterface>) -> Router {
    let state = AppState::with_translator(Config::default(), translator);
    Router::new().merge(routes::create_routes()).with_state(state)
}

fn translate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/translate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn translate_returns_translated_text() {
    let app = app(Arc::new(MockTranslator));

    let response = app
        .oneshot(translate_request(&json!({"text": "Hello"}).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["translated_text"], "es:Hello");
}

#[tokio::test]
async fn missing_text_field_returns_400() {
    let app = app(Arc::new(MockTranslator));

    let response = app.oneshot(translate_request("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, json!({"error": "Falta el campo 'text'"}));
}

#[tokio::test]
async fn non_string_text_returns_400() {
    let app = app(Arc::new(MockTranslator));

    let response = app
        .oneshot(translate_request(&json!({"text": 42}).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, json!({"error": "Falta el campo 'text'"}));
}

#[tokio::test]
async fn empty_text_never_reaches_the_engine() {
    // FailingTranslator would turn any engine call into a 500
    let app = app(Arc::new(FailingTranslator));

    let response = app
        .oneshot(translate_request(&json!({"text": ""}).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["translated_text"], "");
}

#[tokio::test]
async fn extra_fields_are_ignored() {
    let app = app(Arc::new(MockTranslator));

    let response = app
        .oneshot(translate_request(
            &json!({"text": "Hello", "target": "fr"}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["translated_text"], "es:Hello");
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let app = app(Arc::new(MockTranslator));

    let response = app
        .oneshot(translate_request("{\"text\": \"Hello\""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn engine_failure_returns_500_with_error_body() {
    let app = app(Arc::new(FailingTranslator));

    let response = app
        .oneshot(translate_request(&json!({"text": "Hello"}).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "modelo no disponible");
}

#[tokio::test]
async fn repeated_requests_are_idempotent() {
    let request_body = json!({"text": "Good morning"}).to_string();

    let first = app(Arc::new(MockTranslator))
        .oneshot(translate_request(&request_body))
        .await
        .unwrap();
    let second = app(Arc::new(MockTranslator))
        .oneshot(translate_request(&request_body))
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(first).await, body_json(second).await);
}

#[tokio::test]
async fn home_page_serves_translation_ui() {
    let app = app(Arc::new(MockTranslator));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = std::str::from_utf8(&bytes).unwrap();
    assert!(page.contains("Servicio de Traducción"));
}

#[tokio::test]
async fn health_check_reports_model() {
    let app = app(Arc::new(MockTranslator));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "mock/opus-mt-en-es");
}
