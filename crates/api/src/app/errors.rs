use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use mandi_catalog::ValidationErrors;
use mandi_core::CatalogId;
use mandi_infra::{BroadcastError, LogStoreError, StoreError};

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn validation_errors_to_response(errs: ValidationErrors) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({
            "error": "validation_error",
            "message": errs.to_string(),
            "details": errs.errors(),
        })),
    )
        .into_response()
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound(id) => json_error(StatusCode::NOT_FOUND, "not_found", format!("catalog {id} not found")),
        StoreError::Storage(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg),
    }
}

pub fn log_store_error_to_response(err: LogStoreError) -> axum::response::Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "log_store_error", err.to_string())
}

pub fn broadcast_error_to_response(err: BroadcastError) -> axum::response::Response {
    match err {
        BroadcastError::NotFound(id) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("catalog {id} not found"))
        }
        BroadcastError::AlreadyPending(id) => json_error(
            StatusCode::CONFLICT,
            "simulation_pending",
            format!("a simulation for catalog {id} is already pending"),
        ),
        BroadcastError::Persistence(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "persistence_error", msg),
        BroadcastError::Aborted(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "simulation_aborted", msg),
    }
}

pub fn parse_catalog_id(raw: &str) -> Result<CatalogId, axum::response::Response> {
    raw.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid catalog id"))
}
