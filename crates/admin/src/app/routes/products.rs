use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use catalog_products::Product;

use crate::app::routes::parse_product_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SiteContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", get(get_product).delete(delete_product))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(site): Extension<SiteContext>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let mut product = match Product::new(body.code, body.label) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Some(status) = body.status {
        product.set_status(status);
    }

    let _gate = services.stores().gate.write();
    match services.stores().products.save_product(site.site_id(), product) {
        Ok(saved) => (StatusCode::CREATED, Json(dto::product_to_json(&saved))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(site): Extension<SiteContext>,
) -> axum::response::Response {
    let _gate = services.stores().gate.read();
    match services.stores().products.search_products(site.site_id()) {
        Ok(products) => {
            let items = products.iter().map(dto::product_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(site): Extension<SiteContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let _gate = services.stores().gate.read();
    match services.stores().products.get_product(site.site_id(), product_id) {
        Ok(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Deletes the product's prices first, then the product itself.
///
/// The price client takes the write gate on its own, so it is acquired here only
/// after the prices are gone.
pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(site): Extension<SiteContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    if let Err(e) = services.price_client(site).delete(product_id) {
        return errors::admin_error_to_response(e);
    }

    let _gate = services.stores().gate.write();
    match services
        .stores()
        .products
        .delete_products(site.site_id(), &[product_id])
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
