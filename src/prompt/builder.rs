//! Deterministic prompt assembly from a structured form.
//!
//! The output is a plain concatenation in a fixed order:
//! `[style fragment, ]subject[ action][, featuring F][, set in B][, M atmosphere][, quality suffix]`.
//! Empty strings are treated the same as missing fields.
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::styles::StyleRegistry;

pub const SUBJECT_PLACEHOLDER: &str = "a subject";
pub const QUALITY_SUFFIX: &str = ", high quality, detailed, 8k";
const QUALITY_MARKER: &str = "high quality";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    #[serde(default, deserialize_with = "lenient_text")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub features: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mood: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub background: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub style_id: Option<String>,
}

/// Accept any JSON value for a text field. Non-zero numbers and `true` are
/// rendered as text; `null`, `false`, `0`, `""`, arrays and objects count as
/// absent.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    styles: Arc<StyleRegistry>,
}

impl PromptBuilder {
    pub fn new(styles: Arc<StyleRegistry>) -> Self {
        PromptBuilder { styles }
    }

    pub fn build(&self, formula: &Formula) -> String {
        let fragment = self.styles.lookup(formula.style_id.as_deref());

        let mut prompt = String::new();
        if !fragment.is_empty() {
            prompt.push_str(fragment);
            prompt.push_str(", ");
        }

        prompt.push_str(present(&formula.subject).unwrap_or(SUBJECT_PLACEHOLDER));
        if let Some(action) = present(&formula.action) {
            prompt.push(' ');
            prompt.push_str(action);
        }
        if let Some(features) = present(&formula.features) {
            prompt.push_str(", featuring ");
            prompt.push_str(features);
        }
        if let Some(background) = present(&formula.background) {
            prompt.push_str(", set in ");
            prompt.push_str(background);
        }
        if let Some(mood) = present(&formula.mood) {
            prompt.push_str(", ");
            prompt.push_str(mood);
            prompt.push_str(" atmosphere");
        }

        // Case-sensitive substring test; "High Quality" does not suppress.
        if fragment.is_empty() || !fragment.contains(QUALITY_MARKER) {
            prompt.push_str(QUALITY_SUFFIX);
        }
        prompt
    }
}
