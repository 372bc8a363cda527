use ndarray::{Array1, Array2, Axis};
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::models::{LabReport, Marker};

/// Feature columns, in matrix order
pub const FEATURES: [Marker; 9] = [
    Marker::Hemoglobin,
    Marker::Wbc,
    Marker::Rbc,
    Marker::Platelets,
    Marker::Cholesterol,
    Marker::Hdl,
    Marker::Ldl,
    Marker::Triglycerides,
    Marker::Age,
];

/// Binary labels per risk category, from the rule-engine thresholds.
/// A missing marker never labels positive.
pub struct CategoryLabels {
    pub anemia: Array1<usize>,
    pub cardio: Array1<usize>,
    pub infection: Array1<usize>,
}

/// Build the raw feature matrix; missing markers become NaN for imputation
pub fn feature_matrix(reports: &[LabReport]) -> Array2<f64> {
    let mut matrix = Array2::from_elem((reports.len(), FEATURES.len()), f64::NAN);
    for (i, report) in reports.iter().enumerate() {
        for (j, marker) in FEATURES.iter().enumerate() {
            if let Some(value) = report.marker(*marker) {
                matrix[[i, j]] = value;
            }
        }
    }
    matrix
}

/// Replace NaNs with the column median (0.0 when a column is entirely missing)
pub fn impute_median(mut matrix: Array2<f64>) -> Array2<f64> {
    let medians: Vec<f64> = matrix
        .axis_iter(Axis(1))
        .map(|column| {
            let mut present: Vec<f64> = column.iter().copied().filter(|v| !v.is_nan()).collect();
            if present.is_empty() {
                return 0.0;
            }
            present.sort_by(|a, b| a.partial_cmp(b).expect("no NaN after filter"));
            let mid = present.len() / 2;
            if present.len() % 2 == 0 {
                (present[mid - 1] + present[mid]) / 2.0
            } else {
                present[mid]
            }
        })
        .collect();

    for (j, median) in medians.iter().enumerate() {
        for value in matrix.column_mut(j) {
            if value.is_nan() {
                *value = *median;
            }
        }
    }
    matrix
}

pub fn category_labels(reports: &[LabReport]) -> CategoryLabels {
    let anemia = reports
        .iter()
        .map(|r| usize::from(r.hemoglobin.map(|hb| hb < 12.0).unwrap_or(false)))
        .collect();
    let cardio = reports
        .iter()
        .map(|r| {
            let flagged = r.ldl.map(|v| v > 130.0).unwrap_or(false)
                || r.cholesterol.map(|v| v > 200.0).unwrap_or(false)
                || r.triglycerides.map(|v| v > 150.0).unwrap_or(false);
            usize::from(flagged)
        })
        .collect();
    let infection = reports
        .iter()
        .map(|r| usize::from(r.wbc.map(|v| v > 11.0).unwrap_or(false)))
        .collect();

    CategoryLabels {
        anemia,
        cardio,
        infection,
    }
}

/// One deterministic train/test partition
pub struct Split {
    pub train_records: Array2<f64>,
    pub train_targets: Array1<usize>,
    pub test_records: Array2<f64>,
    pub test_targets: Array1<usize>,
}

/// Seeded shuffle split. The test partition gets `ceil(n * test_ratio)` rows,
/// capped so the training side keeps at least one row.
pub fn train_test_split(
    records: &Array2<f64>,
    targets: &Array1<usize>,
    test_ratio: f64,
    seed: u64,
) -> Split {
    let n = records.nrows();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((n as f64 * test_ratio).ceil() as usize)
        .min(n.saturating_sub(1))
        .max(1);
    let (test_idx, train_idx) = indices.split_at(test_len);

    Split {
        train_records: records.select(Axis(0), train_idx),
        train_targets: targets.select(Axis(0), train_idx),
        test_records: records.select(Axis(0), test_idx),
        test_targets: targets.select(Axis(0), test_idx),
    }
}
