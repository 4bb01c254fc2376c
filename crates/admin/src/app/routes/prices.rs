use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::app::routes::parse_product_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SiteContext;
use crate::error::AdminResult;
use crate::price::PriceView;

/// Price editor routes below `/products`.
pub fn router() -> Router {
    Router::new()
        .route("/:id/price", get(get_prices).put(save_prices))
        .route("/:id/price/copy", get(copy_prices))
}

fn view_response(result: AdminResult<PriceView>) -> axum::response::Response {
    match result {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => errors::admin_error_to_response(e),
    }
}

pub async fn get_prices(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(site): Extension<SiteContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match parse_product_id(&id) {
        Ok(product_id) => view_response(services.price_client(site).get(product_id)),
        Err(resp) => resp,
    }
}

pub async fn copy_prices(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(site): Extension<SiteContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match parse_product_id(&id) {
        Ok(product_id) => view_response(services.price_client(site).copy(product_id)),
        Err(resp) => resp,
    }
}

pub async fn create_prices(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(site): Extension<SiteContext>,
    Json(body): Json<dto::PriceRequest>,
) -> axum::response::Response {
    view_response(services.price_client(site).create(body.price))
}

pub async fn save_prices(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(site): Extension<SiteContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::PriceRequest>,
) -> axum::response::Response {
    match parse_product_id(&id) {
        Ok(product_id) => view_response(services.price_client(site).save(product_id, body.price)),
        Err(resp) => resp,
    }
}
