use axum::extract::{Query, State};
use axum::Json;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::SaveOutcome;
use crate::extract::parse_report_text;
use crate::ingest::{detect_format, extract_text, format::sanitize_filename, FormatDetection};
use crate::models::LabReport;

#[derive(Deserialize)]
pub struct ParseRequest {
    pub filename: String,
    /// Raw upload content, base64-encoded
    pub data: String,
}

#[derive(Serialize)]
pub struct ParseResponse {
    /// Correlates this parse with later log lines and the save call
    pub upload_id: Uuid,
    pub filename: String,
    pub format: FormatDetection,
    pub report: LabReport,
}

/// Parse an uploaded report without storing it.
///
/// The client reviews (and can correct) the extracted fields before saving.
pub async fn parse(
    State(ctx): State<ApiContext>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, ApiError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(request.data.as_bytes())
        .map_err(|e| ApiError::BadRequest(format!("invalid base64 payload: {e}")))?;

    let format = detect_format(&bytes)?;
    let text = extract_text(&bytes, &format, ctx.ocr())?;
    let report = parse_report_text(&text);

    let upload_id = Uuid::new_v4();
    tracing::info!(
        %upload_id,
        filename = %sanitize_filename(&request.filename),
        category = format.category.as_str(),
        "Report parsed"
    );

    Ok(Json(ParseResponse {
        upload_id,
        filename: sanitize_filename(&request.filename),
        format,
        report,
    }))
}

#[derive(Deserialize)]
pub struct SaveRequest {
    pub report: LabReport,
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub outcome: &'static str,
    pub patient_id: String,
}

/// Encrypt and store a (reviewed) report row.
pub async fn save(
    State(ctx): State<ApiContext>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
    if request.report.patient_id.trim().is_empty() {
        return Err(ApiError::BadRequest("patient_id must not be empty".into()));
    }

    let outcome = match ctx.store().save_report(&request.report)? {
        SaveOutcome::Saved => "stored",
        SaveOutcome::DuplicateSkipped => "duplicate_skipped",
    };

    Ok(Json(SaveResponse {
        outcome,
        patient_id: request.report.patient_id.clone(),
    }))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub patient_id: Option<String>,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub reports: Vec<LabReport>,
    pub patients: Vec<String>,
}

/// Decrypted report history, optionally scoped to one patient.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let reports = ctx.store().load_reports(query.patient_id.as_deref())?;
    let patients = ctx.store().list_patients()?;
    Ok(Json(ListResponse { reports, patients }))
}
