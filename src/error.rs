//! Common error type for the service and library.
//!
//! `AppError` is what library code returns. Handlers turn it into an
//! [`ApiError`], which knows how to render itself as the JSON error body.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{setting} is not configured. Add {setting} to your environment or .env file.")]
    MissingConfig { setting: &'static str },

    #[error("Upstream API error: {status} {message}")]
    Upstream { status: u16, message: String },

    #[error("Unrecognized upstream response: {0}")]
    ResponseFormat(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Convert into a response body, using `context` as the public error
    /// message for failures that are not the caller's fault.
    pub fn into_api(self, context: &str) -> ApiError {
        match self {
            AppError::Validation(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            e @ AppError::MissingConfig { .. } => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            e @ (AppError::Upstream { .. } | AppError::ResponseFormat(_) | AppError::HttpClient(_)) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, context).with_details(e.to_string())
            }
            AppError::Config(_) | AppError::Internal(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, context)
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        ApiError { status, error: error.into(), details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(&self)).into_response()
    }
}
