use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::chat::{answer_question, classify_question};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub patient_id: String,
    pub question: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub topic: &'static str,
    pub answer: String,
}

/// Answer a keyword question from the patient's latest report.
pub async fn ask(
    State(ctx): State<ApiContext>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::BadRequest("question must not be empty".into()));
    }

    let latest = ctx
        .store()
        .latest_report(&request.patient_id)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No reports for patient {}", request.patient_id))
        })?;

    Ok(Json(ChatResponse {
        topic: classify_question(&request.question).as_str(),
        answer: answer_question(&request.question, &latest),
    }))
}
