use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::config;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub reports: usize,
}

pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    let reports = ctx.store().report_count(None)?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: config::APP_VERSION,
        reports,
    }))
}
