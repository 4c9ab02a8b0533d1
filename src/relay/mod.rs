//! Image relay: forwards a prompt to an image-generation provider and hands
//! back the raw bytes it produced.
//!
//! - `pollinations`: prompt embedded in the URL, image bytes in the reply.
//! - `chat`: chat-completion payload, image reference extracted from the reply.
//! - `extract`: ordered strategies for finding that reference.
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rand::Rng;
use reqwest::RequestBuilder;

use crate::config::{Config, ImageProviderKind};
use crate::error::{AppError, AppResult};

pub mod chat;
pub mod extract;
pub mod pollinations;

pub use chat::ChatCompletionRelay;
pub use pollinations::PollinationsRelay;

pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";
const SEED_RANGE: std::ops::Range<u32> = 0..1000;

#[derive(Debug, Clone)]
pub struct RelayedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

pub type RelayFuture<'a> = Pin<Box<dyn Future<Output = AppResult<RelayedImage>> + Send + 'a>>;

pub trait ImageRelay: Send + Sync {
    /// Provider name, for logs and the health report.
    fn name(&self) -> &'static str;

    /// Generate an image for `prompt`. One attempt, no retries.
    fn relay<'a>(&'a self, prompt: &'a str) -> RelayFuture<'a>;
}

/// Build the relay selected by `IMAGE_PROVIDER`.
pub fn from_config(config: &Config) -> Arc<dyn ImageRelay> {
    match config.image_provider {
        ImageProviderKind::Pollinations => Arc::new(PollinationsRelay::new(
            config.pollinations_base_url.clone(),
            config.pollinations_api_key.clone(),
        )),
        ImageProviderKind::OpenRouter => Arc::new(ChatCompletionRelay::new(
            config.openrouter_base_url.clone(),
            config.openrouter_model.clone(),
            config.openrouter_api_key.clone(),
        )),
    }
}

/// Auxiliary seed so identical prompts still produce different images.
pub(crate) fn random_seed() -> u32 {
    rand::thread_rng().gen_range(SEED_RANGE)
}

pub(crate) fn ensure_prompt(prompt: &str) -> AppResult<()> {
    if prompt.is_empty() {
        return Err(AppError::Validation("Prompt is required".to_string()));
    }
    Ok(())
}

/// First 50 characters of a prompt, for logging.
pub(crate) fn preview(prompt: &str) -> String {
    prompt.chars().take(50).collect()
}

/// Send `request` and collect the image body, keeping the declared content type.
pub(crate) async fn fetch_image(request: RequestBuilder) -> AppResult<RelayedImage> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let reason = status.canonical_reason().unwrap_or("");
        let message = if body.is_empty() { reason.to_string() } else { format!("{} - {}", reason, body) };
        tracing::error!("Image provider returned {}: {}", status, message);
        return Err(AppError::Upstream { status: status.as_u16(), message });
    }

    let mime_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string();
    let bytes = response.bytes().await?.to_vec();
    Ok(RelayedImage { bytes, mime_type })
}
