use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::interpreter::interpret_report;

/// Patient-friendly plain-text summary, served as a download.
pub async fn download(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<String>,
) -> Result<Response, ApiError> {
    let report = ctx
        .store()
        .latest_report(&patient_id)?
        .ok_or_else(|| ApiError::NotFound(format!("No reports for patient {patient_id}")))?;

    let insight = interpret_report(&report);

    let mut lines = vec![
        format!("Patient: {}", report.patient_id),
        format!("Date: {}", report.test_date),
        format!("Severity Score: {}/100", insight.severity_score),
        format!("Anemia Risk: {:.0}%", insight.anemia_risk * 100.0),
        format!("Cardio Risk: {:.0}%", insight.cardio_risk * 100.0),
        format!("Infection Risk: {:.0}%", insight.infection_risk * 100.0),
        String::new(),
        "Explanation:".to_string(),
        insight.narrative.clone(),
        String::new(),
        "Suggestions:".to_string(),
    ];
    lines.extend(insight.diet_tips.iter().map(|tip| format!("- {tip}")));

    let body = lines.join("\n");
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"health_summary.txt\"",
            ),
        ],
        body,
    )
        .into_response())
}
