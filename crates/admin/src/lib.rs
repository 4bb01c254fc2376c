//! Catalog admin: the product price editor client and its HTTP surface.

pub mod app;
pub mod config;
pub mod context;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod price;

#[cfg(test)]
mod testing;

pub use config::AdminConfig;
pub use context::{AccessGate, AdminContext, SiteContext, Stores};
pub use error::{AdminError, AdminResult};
pub use price::{PriceClient, PriceView, SubClient, SubClientRegistry};
