//! Type catalogs (price types, list types) and currencies.

use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, Entity};

catalog_core::uuid_id!(
    /// Identifier of a price type or list type.
    TypeId,
    "TypeId"
);

/// Code of the type listed first in type selections.
pub const DEFAULT_TYPE_CODE: &str = "default";

/// A typed classification scoped to a domain (e.g. price type `default` in domain `product`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeItem {
    id: Option<TypeId>,
    domain: String,
    code: String,
    label: String,
}

impl TypeItem {
    pub fn new(
        domain: impl Into<String>,
        code: impl Into<String>,
        label: impl Into<String>,
    ) -> DomainResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::validation("type code cannot be empty"));
        }

        Ok(Self {
            id: None,
            domain: domain.into(),
            code: code.trim().to_string(),
            label: label.into(),
        })
    }

    pub fn with_id(mut self, id: TypeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Entity for TypeItem {
    type Id = TypeId;

    fn id(&self) -> Option<TypeId> {
        self.id
    }
}

/// Order list types for selection: the `default` type first, the rest by label.
pub fn sort_list_types(mut types: Vec<TypeItem>) -> Vec<TypeItem> {
    types.sort_by(|a, b| {
        let a_rank = a.code != DEFAULT_TYPE_CODE;
        let b_rank = b.code != DEFAULT_TYPE_CODE;
        a_rank
            .cmp(&b_rank)
            .then_with(|| a.label.cmp(&b.label))
    });
    types
}

/// A currency that prices may be denominated in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    id: String,
    label: String,
    status: i32,
}

impl Currency {
    pub fn new(code: &str, label: impl Into<String>) -> DomainResult<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(DomainError::validation(format!(
                "invalid currency code '{code}'"
            )));
        }

        Ok(Self {
            id: code.to_string(),
            label: label.into(),
            status: 1,
        })
    }

    pub fn disabled(mut self) -> Self {
        self.status = 0;
        self
    }

    pub fn code(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.status > 0
    }
}
