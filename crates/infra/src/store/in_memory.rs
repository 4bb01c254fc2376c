//! In-memory stores for tests/dev.
//!
//! `InMemoryDatabase` plays the role of one database connection: every table
//! in its state shares the same transaction. Products, prices and list
//! associations live on the catalog connection, texts on their own.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use catalog_core::{DomainError, Entity, SiteId};
use catalog_products::{
    Currency, ListId, ListItem, PriceId, PriceItem, Product, ProductId, TextId, TextItem, TypeId,
    TypeItem, PRICE_DOMAIN,
};

use super::{
    CurrencyStore, ListStore, PriceStore, ProductStore, StoreError, StoreResult, TextStore,
    Transactional, TypeStore,
};

/// Tables on the catalog connection.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    products: HashMap<(SiteId, ProductId), Product>,
    prices: HashMap<(SiteId, PriceId), PriceItem>,
    lists: HashMap<(SiteId, ListId), ListItem>,
}

/// Tables on the text connection.
#[derive(Debug, Clone, Default)]
pub struct TextState {
    texts: HashMap<(SiteId, TextId), TextItem>,
}

/// Snapshot-based transactional state.
///
/// `begin` pushes a copy of the state, `rollback` restores the latest copy and
/// `commit` discards it. Rollback restores the whole connection, so concurrent
/// writers on the same database must not interleave with an open transaction.
#[derive(Debug, Default)]
pub struct InMemoryDatabase<S> {
    state: RwLock<S>,
    savepoints: Mutex<Vec<S>>,
}

impl<S: Clone + Default> InMemoryDatabase<S> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(S::default()),
            savepoints: Mutex::new(Vec::new()),
        }
    }

    /// Number of currently open (nested) transactions.
    pub fn transaction_depth(&self) -> usize {
        self.savepoints.lock().map(|s| s.len()).unwrap_or(0)
    }

    #[track_caller]
    fn read(&self) -> StoreResult<RwLockReadGuard<'_, S>> {
        match self.state.read() {
            Ok(guard) => Ok(guard),
            Err(_) => Err(StoreError::backend("lock poisoned")),
        }
    }

    #[track_caller]
    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, S>> {
        match self.state.write() {
            Ok(guard) => Ok(guard),
            Err(_) => Err(StoreError::backend("lock poisoned")),
        }
    }
}

impl<S> Transactional for InMemoryDatabase<S>
where
    S: Clone + Default + Send + Sync,
{
    fn begin(&self) -> StoreResult<()> {
        let snapshot = self.read()?.clone();
        let mut savepoints = self
            .savepoints
            .lock()
            .map_err(|_| StoreError::backend("savepoint lock poisoned"))?;
        savepoints.push(snapshot);
        Ok(())
    }

    fn commit(&self) -> StoreResult<()> {
        let mut savepoints = self
            .savepoints
            .lock()
            .map_err(|_| StoreError::backend("savepoint lock poisoned"))?;
        match savepoints.pop() {
            Some(_) => Ok(()),
            None => Err(StoreError::backend("commit without an open transaction")),
        }
    }

    fn rollback(&self) -> StoreResult<()> {
        let mut savepoints = self
            .savepoints
            .lock()
            .map_err(|_| StoreError::backend("savepoint lock poisoned"))?;
        let snapshot = match savepoints.pop() {
            Some(s) => s,
            None => return Err(StoreError::backend("rollback without an open transaction")),
        };
        *self.write()? = snapshot;
        Ok(())
    }
}

impl ProductStore for InMemoryDatabase<CatalogState> {
    fn get_product(&self, site_id: SiteId, id: ProductId) -> StoreResult<Product> {
        self.read()?
            .products
            .get(&(site_id, id))
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("product {id}")).into())
    }

    fn search_products(&self, site_id: SiteId) -> StoreResult<Vec<Product>> {
        let state = self.read()?;
        let mut items: Vec<Product> = state
            .products
            .iter()
            .filter_map(|((s, _), p)| if *s == site_id { Some(p.clone()) } else { None })
            .collect();
        items.sort_by(|a, b| a.code().cmp(b.code()));
        Ok(items)
    }

    fn save_product(&self, site_id: SiteId, product: Product) -> StoreResult<Product> {
        let mut state = self.write()?;

        let duplicate = state.products.iter().any(|((s, id), p)| {
            *s == site_id && Some(*id) != product.id() && p.code() == product.code()
        });
        if duplicate {
            return Err(DomainError::conflict(format!(
                "product code '{}' already exists",
                product.code()
            ))
            .into());
        }

        let product = match product.id() {
            None => product.with_identity(ProductId::new(), site_id),
            Some(id) if state.products.contains_key(&(site_id, id)) => product,
            Some(id) => return Err(DomainError::not_found(format!("product {id}")).into()),
        };

        if let Some(id) = product.id() {
            state.products.insert((site_id, id), product.clone());
        }
        Ok(product)
    }

    fn delete_products(&self, site_id: SiteId, ids: &[ProductId]) -> StoreResult<()> {
        let mut state = self.write()?;
        for id in ids {
            state.products.remove(&(site_id, *id));
        }
        state
            .lists
            .retain(|(s, _), item| *s != site_id || !ids.contains(&item.parent_id()));
        Ok(())
    }
}

impl PriceStore for InMemoryDatabase<CatalogState> {
    fn get_prices(&self, site_id: SiteId, ids: &[PriceId]) -> StoreResult<Vec<PriceItem>> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.prices.get(&(site_id, *id)).cloned())
            .collect())
    }

    fn save_price(&self, site_id: SiteId, price: PriceItem) -> StoreResult<PriceItem> {
        let mut state = self.write()?;

        let price = match price.id() {
            None => price.with_identity(PriceId::new(), site_id),
            Some(id) if state.prices.contains_key(&(site_id, id)) => price,
            Some(id) => return Err(DomainError::not_found(format!("price {id}")).into()),
        };

        if let Some(id) = price.id() {
            state.prices.insert((site_id, id), price.clone());
        }
        Ok(price)
    }

    fn delete_prices(&self, site_id: SiteId, ids: &[PriceId]) -> StoreResult<()> {
        let mut state = self.write()?;
        for id in ids {
            state.prices.remove(&(site_id, *id));
        }
        Ok(())
    }
}

impl ListStore for InMemoryDatabase<CatalogState> {
    fn list_items(
        &self,
        site_id: SiteId,
        parent_id: ProductId,
        domain: &str,
    ) -> StoreResult<Vec<ListItem>> {
        let state = self.read()?;
        let mut items: Vec<ListItem> = state
            .lists
            .iter()
            .filter(|((s, _), item)| {
                *s == site_id && item.parent_id() == parent_id && item.domain() == domain
            })
            .map(|(_, item)| item.clone())
            .collect();
        items.sort_by_key(|item| (item.position(), item.id()));
        Ok(items)
    }

    fn save_list_item(&self, site_id: SiteId, item: ListItem) -> StoreResult<ListItem> {
        let mut state = self.write()?;

        if !state.products.contains_key(&(site_id, item.parent_id())) {
            return Err(DomainError::invariant(format!(
                "parent product {} does not exist",
                item.parent_id()
            ))
            .into());
        }

        if item.domain() == PRICE_DOMAIN {
            let exists = item
                .ref_id()
                .is_some_and(|ref_id| state.prices.contains_key(&(site_id, ref_id)));
            if !exists {
                return Err(DomainError::invariant(
                    "price association must reference an existing price",
                )
                .into());
            }
        }

        let item = match item.id() {
            None => item.with_identity(ListId::new(), site_id),
            Some(id) if state.lists.contains_key(&(site_id, id)) => item,
            Some(id) => return Err(DomainError::not_found(format!("list item {id}")).into()),
        };

        if let Some(id) = item.id() {
            state.lists.insert((site_id, id), item.clone());
        }
        Ok(item)
    }

    fn delete_list_items(&self, site_id: SiteId, ids: &[ListId]) -> StoreResult<()> {
        let mut state = self.write()?;
        for id in ids {
            state.lists.remove(&(site_id, *id));
        }
        Ok(())
    }
}

impl TextStore for InMemoryDatabase<TextState> {
    fn search_texts(&self, site_id: SiteId, domain: &str) -> StoreResult<Vec<TextItem>> {
        let state = self.read()?;
        Ok(state
            .texts
            .iter()
            .filter(|((s, _), t)| *s == site_id && t.domain() == domain)
            .map(|(_, t)| t.clone())
            .collect())
    }

    fn save_text(&self, site_id: SiteId, text: TextItem) -> StoreResult<TextItem> {
        let mut state = self.write()?;

        let text = match text.id() {
            None => text.with_identity(TextId::new(), site_id),
            Some(id) if state.texts.contains_key(&(site_id, id)) => text,
            Some(id) => return Err(DomainError::not_found(format!("text {id}")).into()),
        };

        if let Some(id) = text.id() {
            state.texts.insert((site_id, id), text.clone());
        }
        Ok(text)
    }
}

/// Type catalog shared by all sites.
#[derive(Debug, Default)]
pub struct InMemoryTypeStore {
    types: RwLock<Vec<TypeItem>>,
}

impl InMemoryTypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type, assigning an id if it has none.
    pub fn insert(&self, item: TypeItem) -> StoreResult<TypeItem> {
        let item = match item.id() {
            Some(_) => item,
            None => item.with_id(TypeId::new()),
        };
        self.types
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?
            .push(item.clone());
        Ok(item)
    }
}

impl TypeStore for InMemoryTypeStore {
    fn search_types(&self, domain: &str) -> StoreResult<Vec<TypeItem>> {
        let types = self
            .types
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        let mut items: Vec<TypeItem> = types
            .iter()
            .filter(|t| t.domain() == domain)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.label().cmp(b.label()));
        Ok(items)
    }
}

/// Currency catalog shared by all sites.
#[derive(Debug, Default)]
pub struct InMemoryCurrencyStore {
    currencies: RwLock<Vec<Currency>>,
}

impl InMemoryCurrencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, currency: Currency) -> StoreResult<()> {
        let mut currencies = self
            .currencies
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        currencies.retain(|c| c.code() != currency.code());
        currencies.push(currency);
        Ok(())
    }
}

impl CurrencyStore for InMemoryCurrencyStore {
    fn search_currencies(&self, enabled_only: bool) -> StoreResult<Vec<Currency>> {
        let currencies = self
            .currencies
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        let mut items: Vec<Currency> = currencies
            .iter()
            .filter(|c| !enabled_only || c.is_enabled())
            .cloned()
            .collect();
        items.sort_by(|a, b| a.code().cmp(b.code()));
        Ok(items)
    }
}
