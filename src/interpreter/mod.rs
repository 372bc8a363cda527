//! Deterministic rule engine: fixed thresholds in, risk narrative out.
//!
//! Single pass, stateless. The same report always produces the same insight.

pub mod messages;
pub mod rules;
pub mod suggestions;

use crate::models::{Insight, LabReport};

/// Risk probability surfaced when a rule flags / does not flag
const ANEMIA_RISK: (f64, f64) = (0.75, 0.15);
const CARDIO_RISK: (f64, f64) = (0.72, 0.20);
const INFECTION_RISK: (f64, f64) = (0.70, 0.18);

/// Interpret one report: flags, severity, narrative, and lifestyle tips.
pub fn interpret_report(report: &LabReport) -> Insight {
    let flags = rules::risk_flags(report);
    let score = rules::severity_score(report);
    let narrative = messages::build_narrative(report, &flags, score);

    Insight {
        anemia_risk: if flags.anemia {
            ANEMIA_RISK.0
        } else {
            ANEMIA_RISK.1
        },
        cardio_risk: if flags.cardio {
            CARDIO_RISK.0
        } else {
            CARDIO_RISK.1
        },
        infection_risk: if flags.infection {
            INFECTION_RISK.0
        } else {
            INFECTION_RISK.1
        },
        severity_score: score,
        narrative,
        diet_tips: suggestions::lifestyle_suggestions(&flags),
    }
}
