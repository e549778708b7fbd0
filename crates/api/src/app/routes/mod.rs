use axum::{
    routing::{get, post},
    Router,
};

pub mod catalogs;
pub mod logs;
pub mod system;

/// Router for the versioned API (`/v1`).
pub fn router() -> Router {
    Router::new()
        .route("/catalog/translate", post(catalogs::translate))
        .nest("/catalogs", catalogs::router())
        .route("/logs", get(logs::list_logs))
}
