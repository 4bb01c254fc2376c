use serde::{Deserialize, Serialize};

use catalog_core::Entity;
use catalog_products::{Product, ProductStatus};

use crate::price::PriceFormData;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub code: String,
    pub label: String,
    pub status: Option<ProductStatus>,
}

/// Body of the price editor operations; `price` holds the form columns.
#[derive(Debug, Default, Deserialize)]
pub struct PriceRequest {
    #[serde(default)]
    pub price: PriceFormData,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Option<String>,
    pub site_id: Option<String>,
    pub code: String,
    pub label: String,
    pub status: ProductStatus,
}

pub fn product_to_json(product: &Product) -> ProductResponse {
    ProductResponse {
        id: product.id().map(|id| id.to_string()),
        site_id: product.site_id().map(|id| id.to_string()),
        code: product.code().to_string(),
        label: product.label().to_string(),
        status: product.status(),
    }
}
