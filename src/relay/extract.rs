//! Finding the image in a chat-completion style reply.
//!
//! Providers disagree on where the image goes. Strategies are tried in a
//! fixed order and the first hit wins:
//! 1. `message.images`: the dedicated image list on the first choice.
//! 2. `data-uri`: an inline `data:image/...;base64,...` in the message text.
//! 3. `markdown-image`: a `![alt](https://...)` link in the message text.
//! 4. `image-url`: a bare `https://...png|jpg|jpeg|webp|gif` URL in the text.
use std::sync::OnceLock;

use base64::Engine;
use regex::Regex;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    /// Image carried in the reply itself, already base64-decoded.
    Inline { mime_type: String, bytes: Vec<u8> },
    /// URL that still has to be fetched.
    Remote(String),
}

impl ImageReference {
    /// Classify a reference string; anything that is neither a decodable
    /// data URI nor an http(s) URL is not an image reference.
    pub fn parse(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        if reference.starts_with("data:") {
            return inline_from_text(reference);
        }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Some(ImageReference::Remote(reference.to_string()));
        }
        None
    }
}

/// First `data:image/...;base64,` payload in `text` that decodes cleanly.
fn inline_from_text(text: &str) -> Option<ImageReference> {
    data_uri_re().captures_iter(text).find_map(|caps| {
        let bytes = base64::engine::general_purpose::STANDARD.decode(&caps[2]).ok()?;
        Some(ImageReference::Inline { mime_type: caps[1].to_string(), bytes })
    })
}

type Extractor = fn(&Value) -> Option<ImageReference>;

pub const EXTRACTORS: &[(&str, Extractor)] = &[
    ("message.images", from_message_images),
    ("data-uri", from_data_uri),
    ("markdown-image", from_markdown_image),
    ("image-url", from_image_url),
];

/// Run the strategies in order. Returns the name of the one that matched.
pub fn find_image_reference(response: &Value) -> Option<(&'static str, ImageReference)> {
    EXTRACTORS
        .iter()
        .find_map(|(name, extract)| extract(response).map(|r| (*name, r)))
}

fn data_uri_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"data:(image/[A-Za-z0-9.+-]+);base64,([A-Za-z0-9+/]+={0,2})").expect("valid regex")
    })
}

fn markdown_image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[[^\]]*\]\((https?://[^\s)]+)\)").expect("valid regex"))
}

fn image_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)https?://[^\s)"'<>]+\.(?:png|jpe?g|webp|gif)(?:\?[^\s)"'<>]*)?"#).expect("valid regex")
    })
}

fn first_message(response: &Value) -> Option<&Value> {
    response.get("choices")?.get(0)?.get("message")
}

/// Message `content` as text: either the string itself or the joined
/// `text` of its parts.
fn message_text(response: &Value) -> Option<String> {
    match first_message(response)?.get("content")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => {
            let text: Vec<&str> = parts.iter().filter_map(|p| p.get("text").and_then(Value::as_str)).collect();
            Some(text.join("\n"))
        }
        _ => None,
    }
}

fn from_message_images(response: &Value) -> Option<ImageReference> {
    let images = first_message(response)?.get("images")?.as_array()?;
    images.iter().find_map(|image| {
        let reference = image
            .get("image_url")
            .and_then(|u| u.get("url"))
            .or_else(|| image.get("url"))
            .and_then(Value::as_str)
            .or_else(|| image.as_str())?;
        ImageReference::parse(reference)
    })
}

fn from_data_uri(response: &Value) -> Option<ImageReference> {
    inline_from_text(&message_text(response)?)
}

fn from_markdown_image(response: &Value) -> Option<ImageReference> {
    let text = message_text(response)?;
    let caps = markdown_image_re().captures(&text)?;
    Some(ImageReference::Remote(caps[1].to_string()))
}

fn from_image_url(response: &Value) -> Option<ImageReference> {
    let text = message_text(response)?;
    let m = image_url_re().find(&text)?;
    Some(ImageReference::Remote(m.as_str().to_string()))
}
