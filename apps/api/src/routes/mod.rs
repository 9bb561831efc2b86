pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::document::handlers as document;
use crate::report::handlers as report;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/report/catalog", get(report::handle_catalog))
        .route("/api/v1/reports/generate", post(report::handle_generate))
        .route("/api/v1/reports/regenerate", post(report::handle_regenerate))
        .route("/api/v1/reports/export", post(document::handle_export))
        .with_state(state)
}
