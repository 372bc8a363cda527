//! Optional classifier trainer: one small binary model per risk category,
//! fitted with stock `linfa` calls and fixed hyperparameters.
//!
//! Labels come from the same thresholds the rule engine uses, so the models
//! learn to reproduce (and smooth) the deterministic flags from the marker
//! values.

pub mod dataset;
pub mod explain;
pub mod metrics;
pub mod train;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MIN_REPORTS_FOR_TRAINING;
use crate::models::{LabReport, RiskCategory};

pub use dataset::FEATURES;
pub use train::RiskModel;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Need at least {need} reports to train, have {have}")]
    NotEnoughReports { have: usize, need: usize },

    #[error("Training failed: {0}")]
    Training(String),
}

/// Held-out ROC AUC per risk category
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub anemia_auc: f64,
    pub cardio_auc: f64,
    pub infection_auc: f64,
}

/// Everything one training run produces
pub struct ModelArtifacts {
    pub anemia: RiskModel,
    pub cardio: RiskModel,
    pub infection: RiskModel,
    pub metrics: ModelMetrics,
    /// Top-influence summary derived from the cardio model weights
    pub explanation: String,
}

impl ModelArtifacts {
    pub fn model_for(&self, category: RiskCategory) -> &RiskModel {
        match category {
            RiskCategory::Anemia => &self.anemia,
            RiskCategory::Cardio => &self.cardio,
            RiskCategory::Infection => &self.infection,
        }
    }
}

const TEST_RATIO: f64 = 0.2;
const SPLIT_SEED: u64 = 42;

/// Train the three per-category classifiers on the stored reports.
pub fn train_models(reports: &[LabReport]) -> Result<ModelArtifacts, ModelError> {
    if reports.len() < MIN_REPORTS_FOR_TRAINING {
        return Err(ModelError::NotEnoughReports {
            have: reports.len(),
            need: MIN_REPORTS_FOR_TRAINING,
        });
    }

    let records = dataset::impute_median(dataset::feature_matrix(reports));
    let labels = dataset::category_labels(reports);

    let anemia_split =
        dataset::train_test_split(&records, &labels.anemia, TEST_RATIO, SPLIT_SEED);
    let cardio_split =
        dataset::train_test_split(&records, &labels.cardio, TEST_RATIO, SPLIT_SEED);
    let infection_split =
        dataset::train_test_split(&records, &labels.infection, TEST_RATIO, SPLIT_SEED);

    let anemia = train::fit_logistic_or_majority(
        &anemia_split.train_records,
        &anemia_split.train_targets,
    )?;
    let cardio = train::fit_logistic_or_majority(
        &cardio_split.train_records,
        &cardio_split.train_targets,
    )?;
    let infection = train::fit_tree_or_majority(
        &infection_split.train_records,
        &infection_split.train_targets,
    )?;

    let metrics = ModelMetrics {
        anemia_auc: metrics::safe_auc(
            &anemia_split.test_targets,
            &anemia.positive_probability(&anemia_split.test_records),
        ),
        cardio_auc: metrics::safe_auc(
            &cardio_split.test_targets,
            &cardio.positive_probability(&cardio_split.test_records),
        ),
        infection_auc: metrics::safe_auc(
            &infection_split.test_targets,
            &infection.positive_probability(&infection_split.test_records),
        ),
    };

    tracing::info!(
        anemia = metrics.anemia_auc,
        cardio = metrics.cardio_auc,
        infection = metrics.infection_auc,
        "Risk models trained"
    );

    let explanation = explain::top_influence(&cardio);

    Ok(ModelArtifacts {
        anemia,
        cardio,
        infection,
        metrics,
        explanation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::generate_synthetic_dataset;

    #[test]
    fn training_needs_ten_reports() {
        let reports = generate_synthetic_dataset(9, 1);
        let result = train_models(&reports);
        assert!(matches!(
            result,
            Err(ModelError::NotEnoughReports { have: 9, need: 10 })
        ));
    }

    #[test]
    fn training_on_synthetic_cohort_produces_sane_metrics() {
        let reports = generate_synthetic_dataset(300, 42);
        let artifacts = train_models(&reports).unwrap();

        for auc in [
            artifacts.metrics.anemia_auc,
            artifacts.metrics.cardio_auc,
            artifacts.metrics.infection_auc,
        ] {
            assert!((0.0..=1.0).contains(&auc), "AUC out of range: {auc}");
        }

        // Labels are threshold functions of the features, so the linear model
        // should rank the anemia class far better than chance.
        assert!(
            artifacts.metrics.anemia_auc > 0.7,
            "anemia AUC unexpectedly low: {}",
            artifacts.metrics.anemia_auc
        );
    }

    #[test]
    fn training_is_deterministic_for_same_input() {
        let reports = generate_synthetic_dataset(120, 7);
        let a = train_models(&reports).unwrap();
        let b = train_models(&reports).unwrap();
        assert_eq!(a.metrics.anemia_auc, b.metrics.anemia_auc);
        assert_eq!(a.metrics.cardio_auc, b.metrics.cardio_auc);
        assert_eq!(a.metrics.infection_auc, b.metrics.infection_auc);
    }

    #[test]
    fn explanation_names_a_feature() {
        let reports = generate_synthetic_dataset(200, 42);
        let artifacts = train_models(&reports).unwrap();
        assert!(artifacts.explanation.contains("Top risk influence"));
    }

    #[test]
    fn model_lookup_by_category() {
        let reports = generate_synthetic_dataset(120, 42);
        let artifacts = train_models(&reports).unwrap();
        for category in RiskCategory::all() {
            // Every category resolves to a fitted model of a known kind
            let kind = artifacts.model_for(category).kind();
            assert!(["logistic", "tree", "majority"].contains(&kind));
        }
    }
}
