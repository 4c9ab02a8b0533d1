pub mod builder;
pub mod enhancer;

pub use builder::{lenient_text, Formula, PromptBuilder};
pub use enhancer::PromptEnhancer;
