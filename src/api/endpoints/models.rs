use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::modeling::{train_models, ModelMetrics};

#[derive(Deserialize, Default)]
pub struct TrainRequest {
    /// Train on one patient's history, or on the whole store when absent
    pub patient_id: Option<String>,
}

#[derive(Serialize)]
pub struct TrainResponse {
    pub trained_on: usize,
    pub metrics: ModelMetrics,
    pub model_kinds: ModelKinds,
    pub explanation: String,
}

#[derive(Serialize)]
pub struct ModelKinds {
    pub anemia: &'static str,
    pub cardio: &'static str,
    pub infection: &'static str,
}

/// Train the per-category risk classifiers and report held-out AUC.
pub async fn train(
    State(ctx): State<ApiContext>,
    Json(request): Json<TrainRequest>,
) -> Result<Json<TrainResponse>, ApiError> {
    let reports = ctx.store().load_reports(request.patient_id.as_deref())?;
    let artifacts = train_models(&reports)?;

    Ok(Json(TrainResponse {
        trained_on: reports.len(),
        metrics: artifacts.metrics,
        model_kinds: ModelKinds {
            anemia: artifacts.anemia.kind(),
            cardio: artifacts.cardio.kind(),
            infection: artifacts.infection.kind(),
        },
        explanation: artifacts.explanation,
    }))
}
