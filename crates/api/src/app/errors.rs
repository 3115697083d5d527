use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockpile_core::{InfrastructureError, InventoryError};

pub fn error_to_response(err: InventoryError) -> axum::response::Response {
    match err {
        InventoryError::NegativeQuantity { .. } => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
        }
        InventoryError::NotFound { .. } => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        InventoryError::Infrastructure(e) => infrastructure_error_to_response(e),
    }
}

/// Store failures are opaque 500s; the cause stays in the logs, not the
/// response body.
pub fn infrastructure_error_to_response(err: InfrastructureError) -> axum::response::Response {
    tracing::error!(error = %err, sku_code = err.sku_code(), "infrastructure failure");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "infrastructure_error",
        err.to_string(),
    )
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
