//! Loading a product together with its price associations.

use catalog_core::{Entity, SiteId};
use catalog_products::{ListId, ListItem, PriceId, PriceItem, Product, ProductId, PRICE_DOMAIN};

use crate::store::{ListStore, PriceStore, ProductStore, StoreResult};

/// A price association and the price it references (`None` if the price is gone).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRef {
    pub list: ListItem,
    pub price: Option<PriceItem>,
}

/// A product with its price associations preloaded, in position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPrices {
    pub product: Product,
    pub refs: Vec<PriceRef>,
}

impl ProductPrices {
    pub fn find(&self, list_id: ListId) -> Option<&PriceRef> {
        self.refs.iter().find(|r| r.list.id() == Some(list_id))
    }

    pub fn list_ids(&self) -> Vec<ListId> {
        self.refs.iter().filter_map(|r| r.list.id()).collect()
    }

    /// Ids of all referenced prices, including dangling references.
    pub fn price_ids(&self) -> Vec<PriceId> {
        self.refs.iter().filter_map(|r| r.list.ref_id()).collect()
    }
}

/// Load `product_id` with its `price` list associations and referenced prices.
pub fn load_product_prices(
    site_id: SiteId,
    products: &dyn ProductStore,
    lists: &dyn ListStore,
    prices: &dyn PriceStore,
    product_id: ProductId,
) -> StoreResult<ProductPrices> {
    let product = products.get_product(site_id, product_id)?;
    let items = lists.list_items(site_id, product_id, PRICE_DOMAIN)?;

    let ref_ids: Vec<PriceId> = items.iter().filter_map(ListItem::ref_id).collect();
    let found = prices.get_prices(site_id, &ref_ids)?;

    let refs = items
        .into_iter()
        .map(|list| {
            let price = list
                .ref_id()
                .and_then(|id| found.iter().find(|p| p.id() == Some(id)).cloned());
            PriceRef { list, price }
        })
        .collect();

    Ok(ProductPrices { product, refs })
}
