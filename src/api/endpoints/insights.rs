use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::interpreter::interpret_report;
use crate::models::Insight;

#[derive(Serialize)]
pub struct InsightResponse {
    pub patient_id: String,
    pub test_date: NaiveDate,
    pub insight: Insight,
}

/// Rule-engine insight for the patient's latest report.
pub async fn latest(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<InsightResponse>, ApiError> {
    let report = ctx
        .store()
        .latest_report(&patient_id)?
        .ok_or_else(|| ApiError::NotFound(format!("No reports for patient {patient_id}")))?;

    let insight = interpret_report(&report);

    Ok(Json(InsightResponse {
        patient_id: report.patient_id.clone(),
        test_date: report.test_date,
        insight,
    }))
}
