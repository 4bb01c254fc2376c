use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, Entity, SiteId};

catalog_core::uuid_id!(
    /// Product identifier.
    ProductId,
    "ProductId"
);

/// Product status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Active,
    Archived,
}

/// Catalog product: the parent of price list associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: Option<ProductId>,
    site_id: Option<SiteId>,
    code: String,
    label: String,
    status: ProductStatus,
}

impl Product {
    /// Create a new, not yet persisted product.
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        let label = label.into();

        if label.trim().is_empty() {
            return Err(DomainError::validation("label cannot be empty"));
        }

        if code.trim().is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }

        Ok(Self {
            id: None,
            site_id: None,
            code: code.trim().to_string(),
            label: label.trim().to_string(),
            status: ProductStatus::Draft,
        })
    }

    /// Stamp the store-assigned identity on a freshly inserted product.
    pub fn with_identity(mut self, id: ProductId, site_id: SiteId) -> Self {
        self.id = Some(id);
        self.site_id = Some(site_id);
        self
    }

    pub fn site_id(&self) -> Option<SiteId> {
        self.site_id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn set_status(&mut self, status: ProductStatus) {
        self.status = status;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<ProductId> {
        self.id
    }
}
