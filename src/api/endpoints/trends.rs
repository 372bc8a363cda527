use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::trends::{hemoglobin_early_warning, marker_series, MarkerSeries};

#[derive(Serialize)]
pub struct TrendsResponse {
    pub patient_id: String,
    pub report_count: usize,
    pub series: Vec<MarkerSeries>,
    /// Hemoglobin declined strictly across the last three reports
    pub hemoglobin_early_warning: bool,
}

/// Per-marker series for the dashboard chart, plus the early-warning check.
pub async fn for_patient(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<TrendsResponse>, ApiError> {
    let reports = ctx.store().load_reports(Some(&patient_id))?;
    if reports.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No reports for patient {patient_id}"
        )));
    }

    Ok(Json(TrendsResponse {
        patient_id,
        report_count: reports.len(),
        series: marker_series(&reports),
        hemoglobin_early_warning: hemoglobin_early_warning(&reports),
    }))
}
