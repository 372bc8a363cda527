use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, Axis};

use super::ModelError;

const LOGISTIC_MAX_ITERATIONS: u64 = 400;
const TREE_MAX_DEPTH: usize = 4;

/// Column-wise standardization fitted on the training partition
pub struct Standardizer {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl Standardizer {
    pub fn fit(records: &Array2<f64>) -> Self {
        let mean = records
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(records.ncols()));
        // Constant columns keep their values unscaled
        let std = records
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s == 0.0 { 1.0 } else { s });
        Self { mean, std }
    }

    pub fn transform(&self, records: &Array2<f64>) -> Array2<f64> {
        (records - &self.mean) / &self.std
    }
}

/// A fitted per-category binary model
pub enum RiskModel {
    Logistic {
        scaler: Standardizer,
        model: FittedLogisticRegression<f64, usize>,
    },
    Tree(DecisionTree<f64, usize>),
    /// Single-class fallback: always predicts the class seen in training
    Majority(usize),
}

impl RiskModel {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Logistic { .. } => "logistic",
            Self::Tree(_) => "tree",
            Self::Majority(_) => "majority",
        }
    }

    /// Probability of the positive class per row.
    ///
    /// Trees and the majority fallback have no calibrated probabilities;
    /// trees report their hard prediction as 0/1, the fallback reports 0.
    pub fn positive_probability(&self, records: &Array2<f64>) -> Array1<f64> {
        match self {
            Self::Logistic { scaler, model } => {
                model.predict_probabilities(&scaler.transform(records))
            }
            Self::Tree(model) => model.predict(records).mapv(|label| label as f64),
            Self::Majority(_) => Array1::zeros(records.nrows()),
        }
    }

    /// Hard class prediction per row
    pub fn predict(&self, records: &Array2<f64>) -> Array1<usize> {
        match self {
            Self::Logistic { scaler, model } => model.predict(&scaler.transform(records)),
            Self::Tree(model) => model.predict(records),
            Self::Majority(label) => Array1::from_elem(records.nrows(), *label),
        }
    }
}

/// Standardized logistic regression, or the majority fallback when the
/// training labels hold a single class.
pub fn fit_logistic_or_majority(
    records: &Array2<f64>,
    targets: &Array1<usize>,
) -> Result<RiskModel, ModelError> {
    if distinct_classes(targets) < 2 {
        return Ok(RiskModel::Majority(majority_label(targets)));
    }

    let scaler = Standardizer::fit(records);
    let dataset = Dataset::new(scaler.transform(records), targets.clone());
    let model = LogisticRegression::default()
        .max_iterations(LOGISTIC_MAX_ITERATIONS)
        .fit(&dataset)
        .map_err(|e| ModelError::Training(e.to_string()))?;

    Ok(RiskModel::Logistic { scaler, model })
}

/// Depth-bounded decision tree, or the majority fallback when the training
/// labels hold a single class.
pub fn fit_tree_or_majority(
    records: &Array2<f64>,
    targets: &Array1<usize>,
) -> Result<RiskModel, ModelError> {
    if distinct_classes(targets) < 2 {
        return Ok(RiskModel::Majority(majority_label(targets)));
    }

    let dataset = Dataset::new(records.clone(), targets.clone());
    let model = DecisionTree::params()
        .max_depth(Some(TREE_MAX_DEPTH))
        .fit(&dataset)
        .map_err(|e| ModelError::Training(e.to_string()))?;

    Ok(RiskModel::Tree(model))
}

fn distinct_classes(targets: &Array1<usize>) -> usize {
    let mut seen: Vec<usize> = targets.iter().copied().collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

fn majority_label(targets: &Array1<usize>) -> usize {
    let positives = targets.iter().filter(|&&t| t == 1).count();
    usize::from(positives * 2 > targets.len())
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    /// Two well-separated clusters in two dimensions
    fn separable() -> (Array2<f64>, Array1<usize>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..10 {
            rows.push([i as f64 * 0.1, i as f64 * 0.1]);
            labels.push(0usize);
            rows.push([10.0 + i as f64 * 0.1, 10.0 + i as f64 * 0.1]);
            labels.push(1usize);
        }
        let records = Array2::from_shape_fn((rows.len(), 2), |(i, j)| rows[i][j]);
        (records, Array1::from_vec(labels))
    }

    #[test]
    fn standardizer_centers_and_scales() {
        let records = array![[1.0, 10.0], [3.0, 30.0]];
        let scaler = Standardizer::fit(&records);
        let scaled = scaler.transform(&records);
        assert!((scaled[[0, 0]] + 1.0).abs() < 1e-9);
        assert!((scaled[[1, 0]] - 1.0).abs() < 1e-9);
        assert!((scaled[[0, 1]] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn standardizer_leaves_constant_columns_finite() {
        let records = array![[5.0, 1.0], [5.0, 2.0]];
        let scaler = Standardizer::fit(&records);
        let scaled = scaler.transform(&records);
        assert!(scaled.iter().all(|v| v.is_finite()));
        assert_eq!(scaled[[0, 0]], 0.0);
    }

    #[test]
    fn logistic_separates_clean_clusters() {
        let (records, targets) = separable();
        let model = fit_logistic_or_majority(&records, &targets).unwrap();
        assert_eq!(model.kind(), "logistic");

        let predictions = model.predict(&records);
        assert_eq!(predictions, targets);

        let probs = model.positive_probability(&records);
        for (p, t) in probs.iter().zip(targets.iter()) {
            if *t == 1 {
                assert!(*p > 0.5, "positive sample got probability {p}");
            } else {
                assert!(*p < 0.5, "negative sample got probability {p}");
            }
        }
    }

    #[test]
    fn tree_separates_clean_clusters() {
        let (records, targets) = separable();
        let model = fit_tree_or_majority(&records, &targets).unwrap();
        assert_eq!(model.kind(), "tree");
        assert_eq!(model.predict(&records), targets);
    }

    #[test]
    fn single_class_falls_back_to_majority() {
        let records = Array2::zeros((5, 2));
        let targets = Array1::from_elem(5, 1usize);

        let logistic = fit_logistic_or_majority(&records, &targets).unwrap();
        assert_eq!(logistic.kind(), "majority");
        assert_eq!(logistic.predict(&records).to_vec(), vec![1; 5]);

        let tree = fit_tree_or_majority(&records, &targets).unwrap();
        assert_eq!(tree.kind(), "majority");
    }

    #[test]
    fn majority_probability_is_flat_zero() {
        let records = Array2::zeros((4, 2));
        let model = RiskModel::Majority(1);
        assert_eq!(model.positive_probability(&records).to_vec(), vec![0.0; 4]);
    }
}
