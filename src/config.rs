//! Env-driven configuration for the service and CLI.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Credentials are optional at startup: a missing key is only
//! an error once a request needs it. Empty values count as unset.
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

pub const DEFAULT_POLLINATIONS_BASE_URL: &str = "https://image.pollinations.ai";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai";
pub const DEFAULT_OPENROUTER_MODEL: &str = "google/gemini-2.5-flash-image-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Which upstream the image relay talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageProviderKind {
    /// Prompt embedded in the request URL, raw image bytes back.
    #[default]
    Pollinations,
    /// Chat-completion style payload with an image reference in the reply.
    OpenRouter,
}

impl FromStr for ImageProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pollinations" => Ok(ImageProviderKind::Pollinations),
            "openrouter" => Ok(ImageProviderKind::OpenRouter),
            other => Err(AppError::Config(format!("unknown IMAGE_PROVIDER '{}'", other))),
        }
    }
}

impl fmt::Display for ImageProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageProviderKind::Pollinations => f.write_str("pollinations"),
            ImageProviderKind::OpenRouter => f.write_str("openrouter"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_host: String,
    pub api_port: String,
    pub image_provider: ImageProviderKind,
    pub pollinations_api_key: Option<String>,
    pub pollinations_base_url: String,
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub openrouter_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> AppResult<Self> {
        let image_provider = match var("IMAGE_PROVIDER") {
            Some(v) => v.parse()?,
            None => ImageProviderKind::default(),
        };
        Ok(Config {
            api_host: var_or("API_HOST", "127.0.0.1"),
            api_port: var("PORT").or_else(|| var("API_PORT")).unwrap_or_else(|| "5000".to_string()),
            image_provider,
            pollinations_api_key: var("POLLINATIONS_API_KEY"),
            pollinations_base_url: var_or("POLLINATIONS_BASE_URL", DEFAULT_POLLINATIONS_BASE_URL),
            openrouter_api_key: var("OPENROUTER_API_KEY"),
            openrouter_base_url: var_or("OPENROUTER_BASE_URL", DEFAULT_OPENROUTER_BASE_URL),
            openrouter_model: var_or("OPENROUTER_MODEL", DEFAULT_OPENROUTER_MODEL),
            gemini_api_key: var("GEMINI_API_KEY"),
            gemini_base_url: var_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            gemini_model: var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        })
    }

    pub fn gemini_configured(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    pub fn pollinations_configured(&self) -> bool {
        self.pollinations_api_key.is_some()
    }

    pub fn openrouter_configured(&self) -> bool {
        self.openrouter_api_key.is_some()
    }

    /// Log which settings are in effect. Key values are never printed.
    pub fn log_summary(&self) {
        tracing::info!("API_HOST: {}", self.api_host);
        tracing::info!("PORT: {}", self.api_port);
        tracing::info!("IMAGE_PROVIDER: {}", self.image_provider);
        tracing::info!("Gemini API configured: {}", yes_no(self.gemini_configured()));
        tracing::info!("Pollinations API configured: {}", yes_no(self.pollinations_configured()));
        tracing::info!("OpenRouter API configured: {}", yes_no(self.openrouter_configured()));
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_host: "127.0.0.1".to_string(),
            api_port: "5000".to_string(),
            image_provider: ImageProviderKind::default(),
            pollinations_api_key: None,
            pollinations_base_url: DEFAULT_POLLINATIONS_BASE_URL.to_string(),
            openrouter_api_key: None,
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

fn yes_no(b: bool) -> &'static str {
    if b { "Yes" } else { "No" }
}
