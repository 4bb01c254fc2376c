//! Products domain module.
//!
//! This crate contains the catalog records the admin works with (products,
//! prices, list associations, types, currencies, texts) and their value rules.
//! It is pure domain logic: no IO, no HTTP, no storage.

pub mod amount;
pub mod list;
pub mod price;
pub mod product;
pub mod text;
pub mod types;

pub use amount::Amount;
pub use list::{ListConfig, ListId, ListItem, parse_datetime};
pub use price::{PriceId, PriceItem};
pub use product::{Product, ProductId, ProductStatus};
pub use text::{TextId, TextItem};
pub use types::{Currency, TypeId, TypeItem, sort_list_types};

/// List domain of product-to-price associations.
pub const PRICE_DOMAIN: &str = "price";

/// Domain of price records attached to products.
pub const PRODUCT_DOMAIN: &str = "product";
