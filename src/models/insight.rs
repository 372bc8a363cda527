use serde::{Deserialize, Serialize};

/// Booleans derived from comparing measurements to fixed thresholds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlags {
    pub anemia: bool,
    pub cardio: bool,
    pub infection: bool,
}

impl RiskFlags {
    pub fn any(&self) -> bool {
        self.anemia || self.cardio || self.infection
    }
}

/// The interpreter's full output for one report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub anemia_risk: f64,
    pub cardio_risk: f64,
    pub infection_risk: f64,
    pub severity_score: u8,
    pub narrative: String,
    pub diet_tips: Vec<String>,
}
