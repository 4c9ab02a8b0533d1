//! Axum request handlers for the HTTP API.
//!
//! Every failure is turned into a JSON `{error, details?}` body here; nothing
//! escapes a handler as an unhandled error.
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::routes::AppState;
use crate::error::{ApiError, AppError};
use crate::prompt::{lenient_text, Formula};
use crate::styles::StyleSummary;

const GENERATE_FAILED: &str = "Failed to generate prompt";
const IMAGE_FAILED: &str = "Failed to generate image";
const IMAGE_CACHE_CONTROL: &str = "public, max-age=31536000";

pub async fn root() -> &'static str {
    "Imaginator API"
}

pub async fn list_styles(State(state): State<Arc<AppState>>) -> Json<Vec<StyleSummary>> {
    Json(state.styles.list())
}

pub async fn generate_prompt(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::error!("Error generating prompt: {}", e);
        AppError::Internal(e.to_string()).into_api(GENERATE_FAILED)
    })?;

    // A `keywords` key selects the free-text variant.
    if let Some(keywords) = payload.get("keywords") {
        let keywords = keywords.as_str().unwrap_or_default();
        let prompt = state.prompt_enhancer.enhance(keywords).await.map_err(|e| {
            tracing::error!("Error generating prompt: {}", e);
            e.into_api(GENERATE_FAILED)
        })?;
        return Ok(Json(json!({ "prompt": prompt })));
    }

    let formula: Formula = serde_json::from_value(payload).map_err(|e| {
        tracing::error!("Error generating prompt: {}", e);
        AppError::Internal(e.to_string()).into_api(GENERATE_FAILED)
    })?;
    let prompt = state.prompt_builder.build(&formula);
    tracing::debug!("Built prompt: {}", prompt);
    Ok(Json(json!({ "prompt": prompt })))
}

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub prompt: Option<String>,
}

pub async fn relay_image(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let prompt = payload
        .ok()
        .and_then(|Json(body)| body.prompt)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("Prompt is required".to_string()).into_api(IMAGE_FAILED))?;

    let image = state.image_relay.relay(&prompt).await.map_err(|e| {
        tracing::error!("Error generating image: {}", e);
        e.into_api(IMAGE_FAILED)
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, image.mime_type),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL.to_string()),
        ],
        image.bytes,
    )
        .into_response())
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "imageProvider": state.image_relay.name(),
        "geminiConfigured": state.prompt_enhancer.is_configured(),
        "pollinationsConfigured": config.pollinations_configured(),
        "openrouterConfigured": config.openrouter_configured(),
    }))
}
