use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use catalog_core::SiteId;

use crate::app::errors;
use crate::context::SiteContext;

pub const SITE_HEADER: &str = "x-site-id";

#[derive(Debug, Clone, Copy)]
pub struct SiteState {
    pub default_site: SiteId,
}

/// Attach a [`SiteContext`] from the `X-Site-Id` header, or the default site.
pub async fn site_middleware(
    State(state): State<SiteState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let site_id = match extract_site(req.headers()) {
        Ok(Some(site_id)) => site_id,
        Ok(None) => state.default_site,
        Err(message) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_site", message);
        }
    };

    req.extensions_mut().insert(SiteContext::new(site_id));
    next.run(req).await
}

fn extract_site(headers: &HeaderMap) -> Result<Option<SiteId>, String> {
    let Some(header) = headers.get(SITE_HEADER) else {
        return Ok(None);
    };

    let value = header
        .to_str()
        .map_err(|_| "site header is not valid ASCII".to_string())?
        .trim();
    if value.is_empty() {
        return Ok(None);
    }

    value.parse().map(Some).map_err(|e: catalog_core::DomainError| e.to_string())
}
