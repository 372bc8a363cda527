use crate::models::{LabReport, RiskFlags};

use super::rules::age_band;

/// Narrative template builder. Calm framing: observations, not diagnoses,
/// and no alarm wording.
pub struct NarrativeTemplates;

impl NarrativeTemplates {
    pub fn hemoglobin_low() -> &'static str {
        "Your hemoglobin is below the expected range and may indicate mild anemia."
    }

    pub fn hemoglobin_ok() -> &'static str {
        "Your hemoglobin appears within expected range."
    }

    pub fn lipids_borderline(band: &str) -> String {
        format!("Your lipid values are borderline high for age group {band}.")
    }

    pub fn wbc_elevated() -> &'static str {
        "Your WBC is elevated, which can appear in infection or inflammation."
    }

    pub fn severity(score: u8) -> String {
        format!("Current overall severity score: {score}/100.")
    }
}

/// Assemble the narrative paragraph for one report.
pub fn build_narrative(report: &LabReport, flags: &RiskFlags, score: u8) -> String {
    let mut parts: Vec<String> = Vec::new();

    if flags.anemia {
        parts.push(NarrativeTemplates::hemoglobin_low().to_string());
    } else {
        parts.push(NarrativeTemplates::hemoglobin_ok().to_string());
    }

    if flags.cardio {
        parts.push(NarrativeTemplates::lipids_borderline(&age_band(report.age)));
    }
    if flags.infection {
        parts.push(NarrativeTemplates::wbc_elevated().to_string());
    }

    parts.push(NarrativeTemplates::severity(score));
    parts.join(" ")
}
