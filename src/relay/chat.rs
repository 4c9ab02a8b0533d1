//! Relay for chat-completion style providers (OpenRouter and compatibles).
//!
//! The prompt goes out as a user message; the reply carries an image
//! reference somewhere in the assistant message, found via [`extract`].
//! Remote references cost a second request for the actual bytes.
//!
//! [`extract`]: crate::relay::extract
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::relay::extract::{find_image_reference, ImageReference};
use crate::relay::{ensure_prompt, fetch_image, preview, random_seed, ImageRelay, RelayFuture, RelayedImage};

#[derive(Clone)]
pub struct ChatCompletionRelay {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatCompletionRelay {
    pub fn new(base_url: String, model: String, api_key: Option<String>) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        ChatCompletionRelay { client: Client::new(), base_url: base, model, api_key }
    }

    fn request_body(&self, prompt: &str, seed: u32) -> Value {
        json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "modalities": ["image", "text"],
            "seed": seed,
        })
    }

    async fn generate(&self, prompt: &str) -> AppResult<RelayedImage> {
        ensure_prompt(prompt)?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::MissingConfig { setting: "OPENROUTER_API_KEY" })?;
        let request_id = uuid::Uuid::new_v4();
        let url = format!("{}/api/v1/chat/completions", self.base_url);
        tracing::info!(%request_id, model = %self.model, "Generating image for prompt: \"{}...\"", preview(prompt));

        let response = self.client.post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt, random_seed()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            tracing::error!(%request_id, "Chat completion failed. Status: {}, Body: {}", status, message);
            return Err(AppError::Upstream { status: status.as_u16(), message });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::ResponseFormat(format!("reply is not JSON: {}", e)))?;
        let (strategy, reference) = find_image_reference(&payload)
            .ok_or_else(|| AppError::ResponseFormat("no image found in provider reply".to_string()))?;
        tracing::debug!(%request_id, strategy, "Image reference extracted");

        let image = match reference {
            ImageReference::Remote(image_url) => {
                tracing::info!(%request_id, "Fetching generated image from {}", image_url);
                fetch_image(self.client.get(image_url.as_str())).await?
            }
            ImageReference::Inline { mime_type, bytes } => RelayedImage { bytes, mime_type },
        };
        tracing::info!(%request_id, "Image generated successfully ({} bytes)", image.bytes.len());
        Ok(image)
    }
}

impl ImageRelay for ChatCompletionRelay {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    fn relay<'a>(&'a self, prompt: &'a str) -> RelayFuture<'a> {
        Box::pin(self.generate(prompt))
    }
}
