use crate::models::{Gender, LabReport, RiskFlags};

// Threshold table. Anemia cutoffs follow the usual sex-specific reference
// ranges; lipid and WBC cutoffs are the standard borderline values.
const ANEMIA_HB_FEMALE: f64 = 12.0;
const ANEMIA_HB_OTHER: f64 = 13.0;
const INFECTION_WBC: f64 = 11.0;
const CARDIO_LDL: f64 = 130.0;
const CARDIO_TRIGLYCERIDES: f64 = 150.0;
const CARDIO_CHOLESTEROL: f64 = 200.0;

/// Derive the boolean risk flags for one report.
///
/// A missing marker never raises a flag.
pub fn risk_flags(report: &LabReport) -> RiskFlags {
    let female = report.gender == Gender::Female;
    let hb_cutoff = if female {
        ANEMIA_HB_FEMALE
    } else {
        ANEMIA_HB_OTHER
    };

    RiskFlags {
        anemia: report.hemoglobin.map(|hb| hb < hb_cutoff).unwrap_or(false),
        infection: report.wbc.map(|wbc| wbc > INFECTION_WBC).unwrap_or(false),
        cardio: report.ldl.map(|v| v > CARDIO_LDL).unwrap_or(false)
            || report
                .triglycerides
                .map(|v| v > CARDIO_TRIGLYCERIDES)
                .unwrap_or(false)
            || report
                .cholesterol
                .map(|v| v > CARDIO_CHOLESTEROL)
                .unwrap_or(false),
    }
}

/// Weighted sum of threshold excesses, clipped to [0, 100].
///
/// Missing markers contribute nothing (they default to their neutral value).
pub fn severity_score(report: &LabReport) -> u8 {
    let hb = report.hemoglobin.unwrap_or(12.0);
    let ldl = report.ldl.unwrap_or(100.0);
    let triglycerides = report.triglycerides.unwrap_or(120.0);
    let wbc = report.wbc.unwrap_or(7.0);

    let mut score = 0.0;
    score += (12.0 - hb).max(0.0) * 8.0;
    score += (ldl - 100.0).max(0.0) * 0.2;
    score += (triglycerides - 120.0).max(0.0) * 0.15;
    score += (wbc - 10.0).max(0.0) * 4.0;
    if report.age > 50 {
        score += 7.0;
    }

    score.clamp(0.0, 100.0) as u8
}

/// Decade band for narrative wording, e.g. 57 -> "50-59"
pub fn age_band(age: u32) -> String {
    let lo = age / 10 * 10;
    format!("{}-{}", lo, lo + 9)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn report_with(gender: Gender, hb: Option<f64>) -> LabReport {
        LabReport {
            patient_id: "P-1000".into(),
            test_date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            hemoglobin: hb,
            wbc: None,
            rbc: None,
            platelets: None,
            cholesterol: None,
            hdl: None,
            ldl: None,
            triglycerides: None,
            age: 30,
            gender,
            symptoms: None,
        }
    }

    #[test]
    fn anemia_threshold_is_sex_specific() {
        // 12.5 sits between the two cutoffs
        let female = report_with(Gender::Female, Some(12.5));
        let male = report_with(Gender::Male, Some(12.5));
        assert!(!risk_flags(&female).anemia);
        assert!(risk_flags(&male).anemia);
    }

    #[test]
    fn other_gender_uses_stricter_cutoff() {
        let other = report_with(Gender::Other, Some(12.5));
        assert!(risk_flags(&other).anemia);
    }

    #[test]
    fn missing_hemoglobin_never_flags_anemia() {
        let report = report_with(Gender::Female, None);
        assert!(!risk_flags(&report).anemia);
    }

    #[test]
    fn cardio_flag_triggers_on_any_lipid() {
        let mut report = report_with(Gender::Female, Some(13.0));
        assert!(!risk_flags(&report).cardio);

        report.ldl = Some(131.0);
        assert!(risk_flags(&report).cardio);

        report.ldl = Some(100.0);
        report.triglycerides = Some(151.0);
        assert!(risk_flags(&report).cardio);

        report.triglycerides = Some(120.0);
        report.cholesterol = Some(201.0);
        assert!(risk_flags(&report).cardio);
    }

    #[test]
    fn infection_flag_is_strictly_above_cutoff() {
        let mut report = report_with(Gender::Female, Some(13.0));
        report.wbc = Some(11.0);
        assert!(!risk_flags(&report).infection);
        report.wbc = Some(11.1);
        assert!(risk_flags(&report).infection);
    }

    #[test]
    fn severity_zero_for_neutral_report() {
        let report = report_with(Gender::Female, None);
        assert_eq!(severity_score(&report), 0);
    }

    #[test]
    fn severity_weights_hemoglobin_deficit() {
        let mut report = report_with(Gender::Female, Some(10.0));
        // (12 - 10) * 8 = 16
        assert_eq!(severity_score(&report), 16);

        report.wbc = Some(12.0);
        // + (12 - 10) * 4 = 8 -> 24
        assert_eq!(severity_score(&report), 24);
    }

    #[test]
    fn severity_adds_age_bonus_above_fifty() {
        let mut report = report_with(Gender::Female, Some(10.0));
        report.age = 51;
        assert_eq!(severity_score(&report), 23);

        report.age = 50;
        assert_eq!(severity_score(&report), 16);
    }

    #[test]
    fn severity_clips_at_one_hundred() {
        let mut report = report_with(Gender::Female, Some(1.0));
        report.wbc = Some(30.0);
        report.ldl = Some(300.0);
        report.triglycerides = Some(500.0);
        report.age = 80;
        assert_eq!(severity_score(&report), 100);
    }

    #[test]
    fn severity_fractional_weights_accumulate() {
        let mut report = report_with(Gender::Female, Some(12.0));
        report.ldl = Some(150.0);
        report.triglycerides = Some(160.0);
        // 50*0.2 + 40*0.15 = 16
        assert_eq!(severity_score(&report), 16);
    }

    #[test]
    fn age_band_rounds_down_to_decade() {
        assert_eq!(age_band(28), "20-29");
        assert_eq!(age_band(30), "30-39");
        assert_eq!(age_band(57), "50-59");
        assert_eq!(age_band(9), "0-9");
    }
}
