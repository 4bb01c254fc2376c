use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::DomainError;
use catalog_infra::StoreError;

use crate::error::AdminError;

pub fn admin_error_to_response(err: AdminError) -> axum::response::Response {
    match err {
        AdminError::Configuration(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "configuration_error", msg)
        }
        AdminError::UnknownSubClient(name) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "unknown_subclient",
            format!("unknown price sub-client: {name}"),
        ),
        AdminError::Store(e) => store_error_to_response(e),
        AdminError::SaveFailed(view) => {
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(*view)).into_response()
        }
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(e) => domain_error_to_response(e),
        StoreError::Backend { message, .. } => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", message)
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        DomainError::InvariantViolation(_) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", message)
        }
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", message),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
