use serde::{Deserialize, Serialize};

use catalog_core::{Entity, SiteId};

catalog_core::uuid_id!(
    /// Text record identifier.
    TextId,
    "TextId"
);

/// Localised text content (names, descriptions) owned by the text store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    id: Option<TextId>,
    site_id: Option<SiteId>,
    domain: String,
    content: String,
}

impl TextItem {
    pub fn new(domain: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            site_id: None,
            domain: domain.into(),
            content: content.into(),
        }
    }

    pub fn with_identity(mut self, id: TextId, site_id: SiteId) -> Self {
        self.id = Some(id);
        self.site_id = Some(site_id);
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Entity for TextItem {
    type Id = TextId;

    fn id(&self) -> Option<TextId> {
        self.id
    }
}
