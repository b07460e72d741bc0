use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use vendora_core::CoreError;

/// Map a domain error onto its stable HTTP status + machine-readable code.
pub fn core_error_to_response(err: CoreError) -> axum::response::Response {
    match err {
        CoreError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        CoreError::NotFound(what) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
        }
        CoreError::InsufficientStock { .. } => {
            json_error(StatusCode::CONFLICT, "insufficient_stock", err.to_string())
        }
        CoreError::ProductInactive(_) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "product_inactive", err.to_string())
        }
        CoreError::Forbidden => json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden"),
        CoreError::InvalidTransition { .. } => {
            json_error(StatusCode::CONFLICT, "invalid_transition", err.to_string())
        }
        CoreError::StorageUnavailable(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable", msg)
        }
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
