use axum::{Extension, Json, http::StatusCode, response::IntoResponse};

use crate::context::SiteContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(site): Extension<SiteContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "site_id": site.site_id().to_string(),
    }))
}
