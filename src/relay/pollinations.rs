//! Relay for providers that take the prompt in the URL path and answer with
//! the image itself.
use reqwest::{Client, Url};

use crate::error::{AppError, AppResult};
use crate::relay::{ensure_prompt, fetch_image, preview, random_seed, ImageRelay, RelayFuture, RelayedImage};

#[derive(Clone)]
pub struct PollinationsRelay {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PollinationsRelay {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        PollinationsRelay { client: Client::new(), base_url, api_key }
    }

    /// `{base}/prompt/{prompt}?nologo=true&seed={seed}` with the prompt
    /// percent-encoded as a single path segment.
    pub fn image_url(&self, prompt: &str, seed: u32) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Config(format!("invalid POLLINATIONS_BASE_URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config("POLLINATIONS_BASE_URL cannot be a base URL".to_string()))?
            .pop_if_empty()
            .push("prompt")
            .push(prompt);
        url.query_pairs_mut()
            .append_pair("nologo", "true")
            .append_pair("seed", &seed.to_string());
        Ok(url)
    }

    async fn generate(&self, prompt: &str) -> AppResult<RelayedImage> {
        ensure_prompt(prompt)?;
        let request_id = uuid::Uuid::new_v4();
        let url = self.image_url(prompt, random_seed())?;
        tracing::info!(%request_id, "Generating image for prompt: \"{}...\"", preview(prompt));

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let image = fetch_image(request).await?;
        tracing::info!(%request_id, "Image generated successfully ({} bytes)", image.bytes.len());
        Ok(image)
    }
}

impl ImageRelay for PollinationsRelay {
    fn name(&self) -> &'static str {
        "pollinations"
    }

    fn relay<'a>(&'a self, prompt: &'a str) -> RelayFuture<'a> {
        Box::pin(self.generate(prompt))
    }
}
