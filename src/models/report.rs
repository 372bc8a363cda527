use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::Gender;

/// One row of lab measurements for a patient at a test date.
///
/// Markers are optional: an uploaded report rarely carries all of them.
/// Age and gender always hold a value — the extractor fills defaults when
/// the source text does not mention them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabReport {
    pub patient_id: String,
    pub test_date: NaiveDate,
    pub hemoglobin: Option<f64>,
    pub wbc: Option<f64>,
    pub rbc: Option<f64>,
    pub platelets: Option<f64>,
    pub cholesterol: Option<f64>,
    pub hdl: Option<f64>,
    pub ldl: Option<f64>,
    pub triglycerides: Option<f64>,
    pub age: u32,
    pub gender: Gender,
    pub symptoms: Option<String>,
}

impl LabReport {
    /// Marker value lookup used by the trainer and the trend analyzer
    pub fn marker(&self, marker: Marker) -> Option<f64> {
        match marker {
            Marker::Hemoglobin => self.hemoglobin,
            Marker::Wbc => self.wbc,
            Marker::Rbc => self.rbc,
            Marker::Platelets => self.platelets,
            Marker::Cholesterol => self.cholesterol,
            Marker::Hdl => self.hdl,
            Marker::Ldl => self.ldl,
            Marker::Triglycerides => self.triglycerides,
            Marker::Age => Some(f64::from(self.age)),
        }
    }
}

/// Numeric markers a report can carry. Age rides along as a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    Hemoglobin,
    Wbc,
    Rbc,
    Platelets,
    Cholesterol,
    Hdl,
    Ldl,
    Triglycerides,
    Age,
}

impl Marker {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hemoglobin => "Hemoglobin",
            Self::Wbc => "WBC",
            Self::Rbc => "RBC",
            Self::Platelets => "Platelets",
            Self::Cholesterol => "Cholesterol",
            Self::Hdl => "HDL",
            Self::Ldl => "LDL",
            Self::Triglycerides => "Triglycerides",
            Self::Age => "Age",
        }
    }
}
