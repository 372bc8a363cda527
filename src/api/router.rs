//! Dashboard API router.
//!
//! Returns a composable `Router` serving the JSON dashboard under `/api/`.
//! The server binds to loopback by default; there is no auth layer — the
//! dashboard is a local, single-user surface.

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the dashboard router from the shared context.
pub fn dashboard_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/api/health", get(endpoints::health::check))
        .route("/api/reports/parse", post(endpoints::reports::parse))
        .route(
            "/api/reports",
            get(endpoints::reports::list).post(endpoints::reports::save),
        )
        .route(
            "/api/patients/:patient_id/insight",
            get(endpoints::insights::latest),
        )
        .route(
            "/api/patients/:patient_id/trends",
            get(endpoints::trends::for_patient),
        )
        .route(
            "/api/patients/:patient_id/summary",
            get(endpoints::summary::download),
        )
        .route("/api/chat", post(endpoints::chat::ask))
        .route("/api/models/train", post(endpoints::models::train))
        .route("/api/synthetic/seed", post(endpoints::synthetic::seed))
        .with_state(ctx)
}
