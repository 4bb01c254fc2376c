use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use catalog_core::SiteId;
use catalog_infra::{
    CurrencyStore, ListStore, PriceStore, ProductPrices, ProductStore, StoreResult, TextStore,
    TypeStore, load_product_prices,
};
use catalog_products::ProductId;

use crate::i18n::Translator;

/// Site context for a request.
///
/// This is immutable and must be present for all catalog routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SiteContext {
    site_id: SiteId,
}

impl SiteContext {
    pub fn new(site_id: SiteId) -> Self {
        Self { site_id }
    }

    pub fn site_id(&self) -> SiteId {
        self.site_id
    }
}

/// Orders access to the catalog between readers and writers.
///
/// In-memory transactions write to the live state and roll back from a
/// snapshot, so reads take the shared side and writing units the exclusive
/// side. Guards are not reentrant.
#[derive(Debug, Clone, Default)]
pub struct AccessGate(Arc<RwLock<()>>);

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, ()> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, ()> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Store handles the admin clients work with.
#[derive(Clone)]
pub struct Stores {
    pub products: Arc<dyn ProductStore>,
    pub prices: Arc<dyn PriceStore>,
    pub lists: Arc<dyn ListStore>,
    pub price_types: Arc<dyn TypeStore>,
    pub list_types: Arc<dyn TypeStore>,
    pub currencies: Arc<dyn CurrencyStore>,
    pub texts: Arc<dyn TextStore>,
    pub gate: AccessGate,
}

/// Everything a client operation needs: site, stores and translations.
#[derive(Clone)]
pub struct AdminContext {
    pub site_id: SiteId,
    pub stores: Stores,
    pub i18n: Arc<dyn Translator>,
}

impl AdminContext {
    pub fn new(site: SiteContext, stores: Stores, i18n: Arc<dyn Translator>) -> Self {
        Self {
            site_id: site.site_id(),
            stores,
            i18n,
        }
    }

    /// Load a product of the current site with its price associations.
    pub fn load_prices(&self, product_id: ProductId) -> StoreResult<ProductPrices> {
        load_product_prices(
            self.site_id,
            &*self.stores.products,
            &*self.stores.lists,
            &*self.stores.prices,
            product_id,
        )
    }
}
