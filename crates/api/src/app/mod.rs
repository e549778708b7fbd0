//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: translator, stores and simulator wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and JSON response mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use mandi_infra::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Router {
    build_app_with(Arc::new(services::build_services(config)))
}

/// Build the router around pre-wired services.
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/v1", routes::router())
        .layer(Extension(services))
}
