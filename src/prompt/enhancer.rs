//! Free-text prompt variant: expands loose keywords into a full image
//! prompt by asking a Gemini text model.
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};

const SYSTEM_PROMPT: &str = "\
You are an expert AI Image Prompt Engineer.
Your goal is to take a few simple keywords and turn them into a comprehensive, high-quality prompt for image generation models like Stable Diffusion, Midjourney, or DALL-E 3.

STRUCTURE OF YOUR OUTPUT:
- Subject Description: Detailed description of the main subject.
- Visual Style: The artistic style (e.g., cyberpunk, oil painting, cinematic, hyper-realistic).
- Environment/Background: Setting and atmosphere.
- Lighting: Specific lighting conditions (e.g., volumetric lighting, neon lights, golden hour).
- Camera/Technical: Camera settings or quality keywords (e.g., 8k, highly detailed, shallow depth of field, wide angle).

RULES:
1. Output ONLY the final generated prompt as a single paragraph of text.
2. Do not include labels like \"Subject:\", \"Style:\", etc. Just the prompt text.
3. Keep it comma-separated or descriptive natural language, whichever fits best.
4. If the user input is vague, use your creativity to fill in the gaps to make it \"high quality\".
5. Do not write any conversational text, just the prompt.
";

#[derive(Clone)]
pub struct PromptEnhancer {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl PromptEnhancer {
    pub fn new(base_url: String, model: String, api_key: Option<String>) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        PromptEnhancer { client: Client::new(), base_url: base, model, api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Turn `keywords` into a single-paragraph prompt.
    pub async fn enhance(&self, keywords: &str) -> AppResult<String> {
        if keywords.is_empty() {
            return Err(AppError::Validation("Keywords are required".to_string()));
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::MissingConfig { setting: "GEMINI_API_KEY" })?;

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = json!({
            "systemInstruction": { "parts": [{ "text": SYSTEM_PROMPT }] },
            "contents": [{ "role": "user", "parts": [{ "text": keywords }] }],
        });
        tracing::info!("Expanding keywords with {}", self.model);

        let response = self.client.post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            tracing::error!("Gemini request failed. Status: {}, Body: {}", status, message);
            return Err(AppError::Upstream { status: status.as_u16(), message });
        }

        let parsed: GeminiResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::ResponseFormat("model returned no text".to_string()));
        }
        Ok(text.to_string())
    }
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Deserialize, Default)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_keywords_rejected() {
        let enhancer = PromptEnhancer::new("http://127.0.0.1:9".into(), "m".into(), Some("k".into()));
        assert!(matches!(enhancer.enhance("").await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn missing_key_is_config_error() {
        let enhancer = PromptEnhancer::new("http://127.0.0.1:9".into(), "m".into(), None);
        let err = enhancer.enhance("cat, rain").await.unwrap_err();
        assert!(matches!(err, AppError::MissingConfig { setting: "GEMINI_API_KEY" }));
    }

    #[test]
    fn configured_only_with_key() {
        assert!(PromptEnhancer::new("http://x".into(), "m".into(), Some("k".into())).is_configured());
        assert!(!PromptEnhancer::new("http://x".into(), "m".into(), None).is_configured());
    }

    #[test]
    fn parses_candidate_text_parts() {
        let parsed: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"A dog "},{"text":"in rain"}]}}]}"#,
        )
        .unwrap();
        let text: String = parsed.candidates.into_iter().next().unwrap()
            .content.parts.into_iter().filter_map(|p| p.text).collect();
        assert_eq!(text, "A dog in rain");
    }
}
