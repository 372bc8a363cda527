use super::dataset::FEATURES;
use super::train::RiskModel;

/// Summarize the strongest feature influence of a fitted model.
///
/// Inputs are standardized before the logistic fit, so the weight magnitudes
/// are directly comparable across features. Tree and fallback models carry no
/// comparable weights.
pub fn top_influence(model: &RiskModel) -> String {
    let RiskModel::Logistic { model, .. } = model else {
        return "Influence summary unavailable for this model type.".to_string();
    };

    let weights = model.params();
    let impacts: Vec<f64> = weights.iter().map(|w| w.abs()).collect();
    let total: f64 = impacts.iter().sum();

    let (top_index, top_impact) = impacts
        .iter()
        .enumerate()
        .fold((0, 0.0), |(best_i, best_v), (i, &v)| {
            if v > best_v {
                (i, v)
            } else {
                (best_i, best_v)
            }
        });

    let percent = top_impact / (total + 1e-9) * 100.0;
    let feature = FEATURES
        .get(top_index)
        .map(|m| m.label())
        .unwrap_or("Unknown");

    format!("Top risk influence: {feature} contributes approximately {percent:.1}% of model signal.")
}
