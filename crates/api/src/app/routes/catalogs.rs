use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};

use mandi_catalog::validate;
use mandi_infra::{publish_catalog, BroadcastError, SimulationState};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_catalog).get(list_catalogs))
        .route("/:id", get(get_catalog))
        .route("/:id/broadcast", post(broadcast_catalog))
        .route("/:id/simulate", post(simulate_bid))
}

/// Translate without saving. Always succeeds; the `source` field tells the
/// caller whether the fallback entry was substituted.
pub async fn translate(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::TranslateRequest>,
) -> axum::response::Response {
    let outcome = services.translator.translate_detailed(&body.text).await;
    (StatusCode::OK, Json(dto::outcome_json(&outcome))).into_response()
}

pub async fn create_catalog(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCatalogRequest>,
) -> axum::response::Response {
    let (item, source) = match (body.catalog, body.text) {
        (Some(raw), None) => match validate(&raw) {
            Ok(item) => (item, None),
            Err(errs) => return errors::validation_errors_to_response(errs),
        },
        (None, Some(text)) => {
            let outcome = services.translator.translate_detailed(&text).await;
            (outcome.item, Some(outcome.source))
        }
        _ => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                "provide exactly one of `catalog` or `text`",
            );
        }
    };

    let id = match services.catalogs.save_draft(item) {
        Ok(id) => id,
        Err(e) => return errors::store_error_to_response(e),
    };

    let record = match services.catalogs.get(id) {
        Ok(Some(r)) => r,
        Ok(None) => return errors::store_error_to_response(mandi_infra::StoreError::NotFound(id)),
        Err(e) => return errors::store_error_to_response(e),
    };

    info!(catalog_id = %id, name = record.item.name(), "catalog draft saved");

    let mut body = dto::catalog_record_json(&record);
    if let Some(source) = source {
        body["source"] = serde_json::json!(source);
    }
    (StatusCode::CREATED, Json(body)).into_response()
}

pub async fn list_catalogs(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.catalogs.list() {
        Ok(records) => {
            let items: Vec<serde_json::Value> = records.iter().map(dto::catalog_record_json).collect();
            Json(items).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_catalog(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_catalog_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.catalogs.get(id) {
        Ok(Some(record)) => Json(dto::catalog_record_json(&record)).into_response(),
        Ok(None) => errors::store_error_to_response(mandi_infra::StoreError::NotFound(id)),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Publish the catalog and schedule one background bid simulation.
pub async fn broadcast_catalog(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_catalog_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let record = match publish_catalog(services.catalogs.as_ref(), services.logs.as_ref(), id) {
        Ok(r) => r,
        Err(e) => return errors::broadcast_error_to_response(e),
    };

    // The handle is dropped: the task keeps running and records its own outcome.
    let simulation = match services.simulator.simulate_broadcast(id) {
        Ok(_handle) => Some(SimulationState::Pending),
        Err(BroadcastError::AlreadyPending(_)) => {
            warn!(catalog_id = %id, "broadcast while a simulation is pending; not scheduling another");
            Some(SimulationState::Pending)
        }
        Err(e) => {
            warn!(catalog_id = %id, error = %e, "failed to schedule broadcast simulation");
            services.simulator.state(id)
        }
    };

    (StatusCode::ACCEPTED, Json(dto::broadcast_json(&record, simulation))).into_response()
}

/// Run one simulation and wait for the bid.
pub async fn simulate_bid(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_catalog_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.simulator.simulate(id).await {
        Ok(bid) => Json(bid).into_response(),
        Err(e) => errors::broadcast_error_to_response(e),
    }
}
