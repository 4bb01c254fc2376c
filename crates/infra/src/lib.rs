//! Infrastructure layer: store abstractions, in-memory stores and transactions.

pub mod catalog;
pub mod store;
pub mod transaction;

pub use catalog::{PriceRef, ProductPrices, load_product_prices};
pub use store::{
    CurrencyStore, ListStore, PriceStore, ProductStore, StoreError, StoreResult, TextStore,
    Transactional, TypeStore,
};
pub use transaction::UnitOfWork;
