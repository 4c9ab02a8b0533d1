//! Fixed registry of visual styles.
//!
//! Each style pairs a display name with a text fragment that gets prepended
//! to generated prompts. The registry is built once and shared read-only.
use serde::Serialize;

const BUILTIN_STYLES: &[(&str, &str, &str)] = &[
    (
        "minimalist",
        "Minimalist Product",
        "clean minimalist background, studio lighting, product photography, high-end commercial style, soft shadows, 8k",
    ),
    (
        "lifestyle",
        "Instagram Lifestyle",
        "lifestyle photography, natural sunlight, depth of field, vibrant colors, modern aesthetic, social media influencer style",
    ),
    (
        "neon-pop",
        "Neon Pop Art",
        "bold neon colors, high contrast, pop art style, energetic, youth marketing, dynamic lighting",
    ),
    (
        "corporate",
        "Corporate Flat",
        "corporate flat illustration style, vector art, clean lines, professional, trusting colors, business presentation",
    ),
    (
        "cyber-tech",
        "Tech / Cyber",
        "futuristic tech background, glowing blue nodes, dark mode aesthetic, cybersecurity, modern SaaS layout",
    ),
    (
        "vintage",
        "Vintage Nostalgia",
        "retro vintage aesthetic, 1970s film grain, nostalgic colors, warm amber lighting, classic advertisement style",
    ),
    (
        "luxury",
        "Luxury Premium",
        "luxury mood, dark sleek background, subtle gold accents, high-end brand, sophisticated, professional studio photography",
    ),
    (
        "editorial",
        "Fashion Editorial",
        "vogue magazine editorial style, dramatic lighting, high fashion, sharp focus, professional color grading",
    ),
];

#[derive(Debug, Clone, Serialize)]
pub struct StyleEntry {
    pub id: String,
    pub name: String,
    pub fragment: String,
}

impl StyleEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, fragment: impl Into<String>) -> Self {
        StyleEntry { id: id.into(), name: name.into(), fragment: fragment.into() }
    }
}

/// Public view of a style. The fragment stays server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct StyleRegistry {
    entries: Vec<StyleEntry>,
}

impl StyleRegistry {
    pub fn new(entries: Vec<StyleEntry>) -> Self {
        StyleRegistry { entries }
    }

    /// The eight styles offered by the site.
    pub fn builtin() -> Self {
        let entries = BUILTIN_STYLES
            .iter()
            .map(|(id, name, fragment)| StyleEntry::new(*id, *name, *fragment))
            .collect();
        StyleRegistry { entries }
    }

    pub fn get(&self, id: &str) -> Option<&StyleEntry> {
        self.entries.iter().find(|s| s.id == id)
    }

    /// Fragment for `style_id`, or `""` when the id is absent, empty or unknown.
    pub fn lookup(&self, style_id: Option<&str>) -> &str {
        style_id
            .filter(|id| !id.is_empty())
            .and_then(|id| self.get(id))
            .map(|s| s.fragment.as_str())
            .unwrap_or("")
    }

    pub fn list(&self) -> Vec<StyleSummary> {
        self.entries
            .iter()
            .map(|s| StyleSummary { id: s.id.clone(), name: s.name.clone() })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_eight_styles_in_order() {
        let registry = StyleRegistry::builtin();
        assert_eq!(registry.len(), 8);
        let ids: Vec<String> = registry.list().into_iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            ["minimalist", "lifestyle", "neon-pop", "corporate", "cyber-tech", "vintage", "luxury", "editorial"]
        );
    }

    #[test]
    fn lookup_known_id() {
        let registry = StyleRegistry::builtin();
        assert!(registry.lookup(Some("vintage")).starts_with("retro vintage aesthetic"));
    }

    #[test]
    fn lookup_falls_back_to_empty() {
        let registry = StyleRegistry::builtin();
        assert_eq!(registry.lookup(Some("unknown")), "");
        assert_eq!(registry.lookup(Some("")), "");
        assert_eq!(registry.lookup(None), "");
    }

    #[test]
    fn listing_omits_fragments() {
        let registry = StyleRegistry::builtin();
        let json = serde_json::to_value(registry.list()).unwrap();
        for item in json.as_array().unwrap() {
            let obj = item.as_object().unwrap();
            assert_eq!(obj.len(), 2);
            assert!(obj.contains_key("id"));
            assert!(obj.contains_key("name"));
        }
    }
}
