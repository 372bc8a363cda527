//! Keyword chatbot over the patient's latest report.
//!
//! Substring classification into four topics, then a templated answer built
//! from the stored marker values. No retrieval, no generation — every reply
//! is grounded in the latest row or says it could not read the value.

use serde::{Deserialize, Serialize};

use crate::models::LabReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatTopic {
    WhiteCells,
    Anemia,
    Lipids,
    General,
}

impl ChatTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhiteCells => "white_cells",
            Self::Anemia => "anemia",
            Self::Lipids => "lipids",
            Self::General => "general",
        }
    }
}

/// Classify a patient question into a topic using keyword heuristics.
pub fn classify_question(text: &str) -> ChatTopic {
    let lower = text.to_lowercase();

    if lower.contains("wbc") {
        return ChatTopic::WhiteCells;
    }
    if lower.contains("hemoglobin") || lower.contains("anemia") {
        return ChatTopic::Anemia;
    }
    if lower.contains("cholesterol") || lower.contains("ldl") {
        return ChatTopic::Lipids;
    }

    ChatTopic::General
}

/// Answer a question from the latest report.
pub fn answer_question(question: &str, latest: &LabReport) -> String {
    match classify_question(question) {
        ChatTopic::WhiteCells => match latest.wbc {
            None => "I couldn't read your WBC value from the latest report.".to_string(),
            Some(wbc) if wbc > 11.0 => format!(
                "Your WBC is {wbc:.1}, which is higher than typical range and can indicate \
                 infection/inflammation."
            ),
            Some(wbc) => {
                format!("Your WBC is {wbc:.1}, which is generally in expected range.")
            }
        },
        ChatTopic::Anemia => match latest.hemoglobin {
            None => "I couldn't read your hemoglobin value from the latest report.".to_string(),
            Some(hb) => format!(
                "Your hemoglobin is {hb:.1}. Low values may relate to anemia, especially with \
                 fatigue symptoms."
            ),
        },
        ChatTopic::Lipids => match (latest.ldl, latest.cholesterol) {
            (Some(ldl), Some(cholesterol)) => format!(
                "Your LDL is {ldl:.0} and total cholesterol is {cholesterol:.0}; improving diet \
                 and exercise can lower risk."
            ),
            _ => "I couldn't read LDL/cholesterol from the latest report.".to_string(),
        },
        ChatTopic::General => {
            "I can explain WBC, hemoglobin/anemia, and cholesterol/LDL questions based on your \
             report."
                .to_string()
        }
    }
}
