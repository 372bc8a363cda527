use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::SaveOutcome;
use crate::synthetic::{generate_synthetic_dataset, DEFAULT_COHORT_SIZE, DEFAULT_SEED};

const MAX_COHORT_SIZE: usize = 10_000;

#[derive(Deserialize, Default)]
pub struct SeedRequest {
    pub count: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Serialize)]
pub struct SeedResponse {
    pub generated: usize,
    pub stored: usize,
    pub duplicates_skipped: usize,
    pub patients: usize,
}

/// Generate a synthetic cohort and persist it into the encrypted store.
pub async fn seed(
    State(ctx): State<ApiContext>,
    Json(request): Json<SeedRequest>,
) -> Result<Json<SeedResponse>, ApiError> {
    let count = request.count.unwrap_or(DEFAULT_COHORT_SIZE);
    if count == 0 || count > MAX_COHORT_SIZE {
        return Err(ApiError::BadRequest(format!(
            "count must be between 1 and {MAX_COHORT_SIZE}"
        )));
    }

    let reports = generate_synthetic_dataset(count, request.seed.unwrap_or(DEFAULT_SEED));

    let mut stored = 0;
    let mut duplicates = 0;
    for report in &reports {
        match ctx.store().save_report(report)? {
            SaveOutcome::Saved => stored += 1,
            SaveOutcome::DuplicateSkipped => duplicates += 1,
        }
    }

    let patients = ctx.store().list_patients()?.len();
    tracing::info!(stored, duplicates, "Synthetic cohort seeded");

    Ok(Json(SeedResponse {
        generated: reports.len(),
        stored,
        duplicates_skipped: duplicates,
        patients,
    }))
}
