//! Shared fixtures for unit tests.

use std::sync::Arc;

use catalog_core::{Entity, SiteId};
use catalog_infra::ProductPrices;
use catalog_products::{Product, ProductId};

use crate::app::services::InMemoryBackend;
use crate::context::{AdminContext, SiteContext};
use crate::i18n::CatalogTranslator;
use crate::price::{PriceClient, SubClient};

/// Seeded in-memory backend with a context for a fresh site.
pub(crate) struct Fixture {
    pub backend: InMemoryBackend,
    pub ctx: AdminContext,
}

impl Fixture {
    pub fn new() -> Self {
        let backend = InMemoryBackend::new();
        backend
            .seed(&["EUR".to_string(), "USD".to_string()])
            .unwrap();
        let ctx = AdminContext::new(
            SiteContext::new(SiteId::new()),
            backend.stores(),
            Arc::new(CatalogTranslator::new()),
        );
        Self { backend, ctx }
    }

    /// Save a new product and return its id.
    pub fn product(&self) -> ProductId {
        let site_id = self.ctx.site_id;
        let count = self.ctx.stores.products.search_products(site_id).unwrap().len();
        let product = Product::new(format!("SKU-{}", count + 1), "Shirt").unwrap();
        self.ctx
            .stores
            .products
            .save_product(site_id, product)
            .unwrap()
            .id()
            .unwrap()
    }

    pub fn load(&self, product_id: ProductId) -> ProductPrices {
        self.ctx.load_prices(product_id).unwrap()
    }

    pub fn client(&self, subclients: Vec<Arc<dyn SubClient>>) -> PriceClient {
        PriceClient::new(self.ctx.clone(), subclients)
    }
}
