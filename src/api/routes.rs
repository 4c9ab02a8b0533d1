//! Shared state and router wiring.
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::config::Config;
use crate::prompt::{PromptBuilder, PromptEnhancer};
use crate::relay::{self, ImageRelay};
use crate::styles::StyleRegistry;

pub struct AppState {
    pub styles: Arc<StyleRegistry>,
    pub prompt_builder: PromptBuilder,
    pub prompt_enhancer: PromptEnhancer,
    pub image_relay: Arc<dyn ImageRelay>,
    pub config: Config,
}

impl AppState {
    /// Wire the built-in style registry and the providers named in `config`.
    pub fn from_config(config: Config) -> Self {
        let styles = Arc::new(StyleRegistry::builtin());
        tracing::info!("Loaded {} styles", styles.len());
        AppState {
            prompt_builder: PromptBuilder::new(styles.clone()),
            prompt_enhancer: PromptEnhancer::new(
                config.gemini_base_url.clone(),
                config.gemini_model.clone(),
                config.gemini_api_key.clone(),
            ),
            image_relay: relay::from_config(&config),
            styles,
            config,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/styles", get(handlers::list_styles))
        .route("/api/generate", post(handlers::generate_prompt))
        .route("/api/image", post(handlers::relay_image))
        .route("/api/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
