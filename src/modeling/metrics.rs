use std::cmp::Ordering;

use ndarray::Array1;

/// ROC AUC via the rank-sum formulation, with tied scores averaged.
///
/// Returns 0.5 when the labels are single-class — the metric is undefined
/// there and 0.5 is the conventional neutral report.
pub fn safe_auc(y_true: &Array1<usize>, scores: &Array1<f64>) -> f64 {
    let n = y_true.len();
    let n_pos = y_true.iter().filter(|&&y| y == 1).count();
    let n_neg = n - n_pos;

    if n_pos == 0 || n_neg == 0 {
        return 0.5;
    }

    // Ascending score order; ties share their average rank
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(Ordering::Equal)
    });

    let mut ranks = vec![0.0f64; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let average_rank = (i + j + 2) as f64 / 2.0; // ranks are 1-based
        for k in i..=j {
            ranks[order[k]] = average_rank;
        }
        i = j + 1;
    }

    let positive_rank_sum: f64 = (0..n).filter(|&k| y_true[k] == 1).map(|k| ranks[k]).sum();

    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    (positive_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg)
}
