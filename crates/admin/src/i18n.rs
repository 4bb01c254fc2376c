//! Message translation.

use std::collections::HashMap;

/// Translates messages of a text domain.
pub trait Translator: Send + Sync {
    /// Translation of `message` in `domain`; the message itself if unknown.
    fn dt(&self, domain: &str, message: &str) -> String;
}

/// Table-backed translator.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    messages: HashMap<(String, String), String>,
}

impl CatalogTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        domain: impl Into<String>,
        message: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        self.messages
            .insert((domain.into(), message.into()), translation.into());
        self
    }
}

impl Translator for CatalogTranslator {
    fn dt(&self, domain: &str, message: &str) -> String {
        self.messages
            .get(&(domain.to_string(), message.to_string()))
            .cloned()
            .unwrap_or_else(|| message.to_string())
    }
}
