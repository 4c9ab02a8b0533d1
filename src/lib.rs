//! Imaginator API library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the binary.
//! - `styles`: The fixed registry of visual styles and their prompt fragments.
//! - `prompt`: Deterministic prompt assembly, plus the keyword enhancer.
//! - `relay`: Forwarding prompts to image providers and returning the bytes.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `StyleRegistry`,
//! `PromptBuilder`, `Formula`, and `ImageRelay`.
pub mod api;
pub mod config;
pub mod error;
pub mod prompt;
pub mod relay;
pub mod styles;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use prompt::{Formula, PromptBuilder, PromptEnhancer};
pub use relay::{ImageRelay, RelayedImage};
pub use styles::StyleRegistry;
