//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring and seed data
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::AdminConfig;
use crate::error::AdminResult;
use crate::middleware;
use crate::price::SubClientRegistry;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Fails if a configured price sub-client is not in `registry`.
pub fn build_app(config: &AdminConfig, registry: &SubClientRegistry) -> AdminResult<Router> {
    let services = Arc::new(services::build_services(config, registry)?);
    let site_state = middleware::SiteState {
        default_site: config.default_site,
    };

    // Catalog routes: require a site context.
    let scoped = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            site_state,
            middleware::site_middleware,
        ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(scoped)
        .layer(ServiceBuilder::new()))
}
