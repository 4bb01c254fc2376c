//! Store abstractions for catalog records.
//!
//! Every operation is scoped to a site: records saved under one site are
//! invisible to every other site.

pub mod in_memory;

use std::panic::Location;

use thiserror::Error;

use catalog_core::{DomainError, SiteId};
use catalog_products::{
    Currency, ListId, ListItem, PriceId, PriceItem, Product, ProductId, TextItem,
    TypeItem, PRODUCT_DOMAIN,
};

pub use in_memory::{CatalogState, InMemoryCurrencyStore, InMemoryDatabase, InMemoryTypeStore, TextState};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Deterministic domain failure (validation, missing record, conflict).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Unclassified backend failure, tagged with the place it was raised.
    #[error("{message}")]
    Backend {
        message: String,
        location: &'static Location<'static>,
    },
}

impl StoreError {
    #[track_caller]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            location: Location::caller(),
        }
    }

    /// Source location of a backend failure.
    pub fn location(&self) -> Option<&'static Location<'static>> {
        match self {
            StoreError::Domain(_) => None,
            StoreError::Backend { location, .. } => Some(location),
        }
    }
}

/// Local begin/commit/rollback unit on one store connection.
///
/// Calls nest: each `begin` must be matched by exactly one `commit` or `rollback`.
pub trait Transactional: Send + Sync {
    fn begin(&self) -> StoreResult<()>;
    fn commit(&self) -> StoreResult<()>;
    fn rollback(&self) -> StoreResult<()>;
}

pub trait ProductStore: Send + Sync {
    /// Fails with `DomainError::NotFound` if the product does not exist.
    fn get_product(&self, site_id: SiteId, id: ProductId) -> StoreResult<Product>;
    fn search_products(&self, site_id: SiteId) -> StoreResult<Vec<Product>>;
    /// Inserts new products (assigning an id) or replaces existing ones.
    fn save_product(&self, site_id: SiteId, product: Product) -> StoreResult<Product>;
    fn delete_products(&self, site_id: SiteId, ids: &[ProductId]) -> StoreResult<()>;
}

pub trait PriceStore: Send + Sync {
    /// Fresh, unsaved price for catalog products.
    fn create_price(&self) -> PriceItem {
        PriceItem::new(PRODUCT_DOMAIN)
    }

    /// Returns the prices that exist; unknown ids are skipped.
    fn get_prices(&self, site_id: SiteId, ids: &[PriceId]) -> StoreResult<Vec<PriceItem>>;
    fn save_price(&self, site_id: SiteId, price: PriceItem) -> StoreResult<PriceItem>;
    fn delete_prices(&self, site_id: SiteId, ids: &[PriceId]) -> StoreResult<()>;
}

/// Product list associations (`product -> referenced record`).
pub trait ListStore: Transactional {
    /// Associations of `parent_id` in `domain`, ordered by position.
    fn list_items(
        &self,
        site_id: SiteId,
        parent_id: ProductId,
        domain: &str,
    ) -> StoreResult<Vec<ListItem>>;

    /// Persists the association only; the referenced record is never saved here.
    fn save_list_item(&self, site_id: SiteId, item: ListItem) -> StoreResult<ListItem>;
    fn delete_list_items(&self, site_id: SiteId, ids: &[ListId]) -> StoreResult<()>;
}

/// Read access to a type catalog (price types or list types).
pub trait TypeStore: Send + Sync {
    /// Types of `domain`, sorted by label.
    fn search_types(&self, domain: &str) -> StoreResult<Vec<TypeItem>>;
}

pub trait CurrencyStore: Send + Sync {
    fn search_currencies(&self, enabled_only: bool) -> StoreResult<Vec<Currency>>;
}

pub trait TextStore: Transactional {
    fn search_texts(&self, site_id: SiteId, domain: &str) -> StoreResult<Vec<TextItem>>;
    fn save_text(&self, site_id: SiteId, text: TextItem) -> StoreResult<TextItem>;
}
