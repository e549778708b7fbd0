use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
    Json,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Network log, oldest first; optionally restricted to one catalog.
pub async fn list_logs(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::LogsQuery>,
) -> axum::response::Response {
    let entries = match query.catalog_id.as_deref() {
        Some(raw) => {
            let id = match errors::parse_catalog_id(raw) {
                Ok(id) => id,
                Err(resp) => return resp,
            };
            services.logs.list_for_catalog(id)
        }
        None => services.logs.list(),
    };

    match entries {
        Ok(entries) => Json(entries).into_response(),
        Err(e) => errors::log_store_error_to_response(e),
    }
}
