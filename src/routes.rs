use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::error;

use crate::state::AppState;
use crate::translator::{TranslateRequest, TranslateResponse};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Web UI for manual testing
        .route("/", get(home))
        // Translation API
        .route("/translate", post(translate))
        // Health check
        .route("/api/health", get(health_check))
}

async fn home() -> Html<&'static str> {
    Html(include_str!("ui/index.html"))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.translator.model_id()
    }))
}

async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<TranslateResponse>, (StatusCode, Json<Value>)> {
    // A missing `text` key and a non-string `text` get the same client error
    let request: TranslateRequest = serde_json::from_value(payload).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Falta el campo 'text'"})),
        )
    })?;

    // Empty input never reaches the model
    if request.text.trim().is_empty() {
        return Ok(Json(TranslateResponse {
            translated_text: String::new(),
        }));
    }

    let translated_text = state.translator.translate(&request.text).await.map_err(|e| {
        error!(error = %e, "Translation failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )
    })?;

    Ok(Json(TranslateResponse { translated_text }))
}
