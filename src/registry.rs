//! Provider registry: identifier → validator lookup table.
//!
//! Entries are plain data: an id, a label, a category and a function
//! pointer. The registry is immutable once handed to the dispatcher.

use serde::Serialize;

use crate::validators::{self, ValidatorFn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AiModel,
    ImageGeneration,
    SocialPlatform,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::AiModel => "AI model",
            Category::ImageGeneration => "Image generation",
            Category::SocialPlatform => "Social & platforms",
        }
    }
}

#[derive(Clone, Copy, Serialize)]
pub struct ProviderEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: Category,
    #[serde(skip)]
    pub validate: ValidatorFn,
}

impl std::fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<ProviderEntry>,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every provider this crate knows how to probe.
    pub fn builtin() -> Self {
        use Category::*;

        let mut registry = Self::empty();
        // AI models
        registry.register("openai", "OpenAI", AiModel, validators::openai::validate);
        registry.register("anthropic", "Anthropic", AiModel, validators::anthropic::validate);
        registry.register("gemini", "Google Gemini", AiModel, validators::gemini::validate);
        registry.register("mistral", "Mistral AI", AiModel, validators::mistral::validate);
        registry.register("deepseek", "DeepSeek", AiModel, validators::deepseek::validate);
        registry.register("groq", "Groq", AiModel, validators::groq::validate);
        registry.register("cohere", "Cohere", AiModel, validators::cohere::validate);
        // Image generation
        registry.register("leonardo", "Leonardo.ai", ImageGeneration, validators::leonardo::validate);
        registry.register("fal", "fal.ai", ImageGeneration, validators::fal::validate);
        // Social & platforms
        registry.register("facebook", "Facebook Graph", SocialPlatform, validators::facebook::validate);
        registry.register("youtube", "YouTube Data", SocialPlatform, validators::youtube::validate);
        registry.register("linkedin", "LinkedIn", SocialPlatform, validators::linkedin::validate);
        registry.register("tiktok", "TikTok", SocialPlatform, validators::tiktok::validate);
        registry.register("pinterest", "Pinterest", SocialPlatform, validators::pinterest::validate);
        registry.register("stripe", "Stripe", SocialPlatform, validators::stripe::validate);
        registry
    }

    /// Add a provider. Re-registering an id replaces the earlier entry in
    /// place.
    pub fn register(
        &mut self,
        id: &'static str,
        display_name: &'static str,
        category: Category,
        validate: ValidatorFn,
    ) {
        let entry = ProviderEntry { id, display_name, category, validate };
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ProviderEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderEntry> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_every_provider() {
        let registry = Registry::builtin();
        assert_eq!(registry.len(), 15);
        assert_eq!(
            registry.ids(),
            vec![
                "openai", "anthropic", "gemini", "mistral", "deepseek", "groq", "cohere",
                "leonardo", "fal", "facebook", "youtube", "linkedin", "tiktok", "pinterest",
                "stripe",
            ]
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        let registry = Registry::builtin();
        assert_eq!(registry.get("stripe").unwrap().display_name, "Stripe");
        assert!(registry.get("Stripe").is_none());
        assert!(registry.get("myspace").is_none());
    }

    #[test]
    fn test_reregister_replaces() {
        let mut registry = Registry::builtin();
        registry.register("openai", "OpenAI (proxy)", Category::AiModel, validators::groq::validate);
        assert_eq!(registry.len(), 15);
        assert_eq!(registry.get("openai").unwrap().display_name, "OpenAI (proxy)");
        assert_eq!(registry.ids()[0], "openai");
    }

    #[test]
    fn test_categories() {
        let registry = Registry::builtin();
        let count = |c: Category| registry.iter().filter(|e| e.category == c).count();
        assert_eq!(count(Category::AiModel), 7);
        assert_eq!(count(Category::ImageGeneration), 2);
        assert_eq!(count(Category::SocialPlatform), 6);
    }
}
