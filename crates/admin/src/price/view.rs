use std::collections::BTreeMap;

use serde::Serialize;

use catalog_products::{Currency, Product, TypeItem};

use crate::price::form::PriceFormData;

/// Error map key of price failures.
pub const PRICE_ERROR_KEY: &str = "product-item-price";

/// Data rendered by the product price editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceView {
    pub item: Option<Product>,
    pub price_data: PriceFormData,
    /// Concatenated output of the registered sub-clients.
    pub price_body: String,
    pub price_currencies: Vec<Currency>,
    pub price_types: Vec<TypeItem>,
    pub price_list_types: Vec<TypeItem>,
    pub errors: BTreeMap<String, String>,
}

impl PriceView {
    pub(crate) fn append_body(&mut self, body: Option<String>) {
        if let Some(body) = body {
            self.price_body.push_str(&body);
        }
    }
}
