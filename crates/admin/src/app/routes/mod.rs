use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};

use catalog_products::ProductId;

use crate::app::errors;

pub mod prices;
pub mod products;
pub mod system;

/// Router for all site-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/prices/create", post(prices::create_prices))
        .nest("/products", products::router().merge(prices::router()))
}

pub(crate) fn parse_product_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))
}
