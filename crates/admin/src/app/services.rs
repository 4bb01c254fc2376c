//! Store wiring and seed data.

use std::sync::Arc;

use catalog_infra::StoreResult;
use catalog_infra::store::{
    CatalogState, InMemoryCurrencyStore, InMemoryDatabase, InMemoryTypeStore, TextState,
};
use catalog_products::{Currency, PRICE_DOMAIN, PRODUCT_DOMAIN, TypeItem};

use crate::config::AdminConfig;
use crate::context::{AccessGate, AdminContext, SiteContext, Stores};
use crate::error::AdminResult;
use crate::i18n::{CatalogTranslator, Translator};
use crate::price::{PriceClient, SubClient, SubClientRegistry};

/// Price types (domain `product`) seeded at startup.
const PRICE_TYPES: &[(&str, &str)] = &[("default", "Selling price"), ("purchase", "Purchase price")];

/// Price list types (domain `price`) seeded at startup.
const LIST_TYPES: &[(&str, &str)] = &[("default", "Standard"), ("promotion", "Promotion")];

/// In-memory backend (dev/test).
///
/// Products, prices and list associations share the catalog connection;
/// texts use their own.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    pub catalog: Arc<InMemoryDatabase<CatalogState>>,
    pub texts: Arc<InMemoryDatabase<TextState>>,
    pub price_types: Arc<InMemoryTypeStore>,
    pub list_types: Arc<InMemoryTypeStore>,
    pub currencies: Arc<InMemoryCurrencyStore>,
    pub gate: AccessGate,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed enabled `currencies` and the default price and list types.
    pub fn seed(&self, currencies: &[String]) -> StoreResult<()> {
        for code in currencies {
            self.currencies
                .insert(Currency::new(code, currency_label(code))?)?;
        }
        for (code, label) in PRICE_TYPES {
            self.price_types
                .insert(TypeItem::new(PRODUCT_DOMAIN, *code, *label)?)?;
        }
        for (code, label) in LIST_TYPES {
            self.list_types
                .insert(TypeItem::new(PRICE_DOMAIN, *code, *label)?)?;
        }
        Ok(())
    }

    pub fn stores(&self) -> Stores {
        Stores {
            products: self.catalog.clone(),
            prices: self.catalog.clone(),
            lists: self.catalog.clone(),
            price_types: self.price_types.clone(),
            list_types: self.list_types.clone(),
            currencies: self.currencies.clone(),
            texts: self.texts.clone(),
            gate: self.gate.clone(),
        }
    }
}

fn currency_label(code: &str) -> &str {
    match code {
        "EUR" => "Euro",
        "USD" => "US dollar",
        "GBP" => "Pound sterling",
        "CHF" => "Swiss franc",
        other => other,
    }
}

/// Services shared by all request handlers.
#[derive(Clone)]
pub struct AppServices {
    stores: Stores,
    i18n: Arc<dyn Translator>,
    price_subclients: Vec<Arc<dyn SubClient>>,
}

impl AppServices {
    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn context(&self, site: SiteContext) -> AdminContext {
        AdminContext::new(site, self.stores.clone(), self.i18n.clone())
    }

    pub fn price_client(&self, site: SiteContext) -> PriceClient {
        PriceClient::new(self.context(site), self.price_subclients.clone())
    }
}

pub fn build_services(config: &AdminConfig, registry: &SubClientRegistry) -> AdminResult<AppServices> {
    let price_subclients = registry.resolve(&config.price_subparts)?;

    let backend = InMemoryBackend::new();
    backend.seed(&config.currencies)?;

    tracing::info!(
        currencies = ?config.currencies,
        price_subparts = ?config.price_subparts,
        "in-memory catalog ready"
    );

    Ok(AppServices {
        stores: backend.stores(),
        i18n: Arc::new(CatalogTranslator::new()),
        price_subclients,
    })
}
