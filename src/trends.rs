//! Trend analyzer: per-marker time series for the dashboard chart, plus the
//! hemoglobin early-warning check over the most recent reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{LabReport, Marker};

/// Markers charted on the dashboard
pub const TREND_MARKERS: [Marker; 5] = [
    Marker::Hemoglobin,
    Marker::Wbc,
    Marker::Ldl,
    Marker::Cholesterol,
    Marker::Triglycerides,
];

/// How many trailing reports the early-warning check looks at
const EARLY_WARNING_WINDOW: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub test_date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerSeries {
    pub marker: String,
    pub points: Vec<TrendPoint>,
}

/// Build chartable series for each trend marker.
///
/// Reports are expected oldest-first (the store loads them that way).
/// Reports missing a marker simply don't contribute a point to that series.
pub fn marker_series(reports: &[LabReport]) -> Vec<MarkerSeries> {
    TREND_MARKERS
        .iter()
        .map(|marker| MarkerSeries {
            marker: marker.label().to_string(),
            points: reports
                .iter()
                .filter_map(|r| {
                    r.marker(*marker).map(|value| TrendPoint {
                        test_date: r.test_date,
                        value,
                    })
                })
                .collect(),
        })
        .collect()
}

/// True when hemoglobin declined strictly across the last three reports.
///
/// Fewer than three reports (or missing hemoglobin values among them) never
/// warn.
pub fn hemoglobin_early_warning(reports: &[LabReport]) -> bool {
    let recent: Vec<f64> = reports
        .iter()
        .filter_map(|r| r.hemoglobin)
        .collect();

    if recent.len() < EARLY_WARNING_WINDOW {
        return false;
    }

    let tail = &recent[recent.len() - EARLY_WARNING_WINDOW..];
    tail[0] > tail[1] && tail[1] > tail[2]
}
