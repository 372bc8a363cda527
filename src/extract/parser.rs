use crate::models::{Gender, LabReport, Marker};

use super::patterns::{AGE_PATTERN, GENDER_PATTERN, MARKER_PATTERNS, PATIENT_ID_PATTERN};

const DEFAULT_PATIENT_ID: &str = "P-UNKNOWN";
const DEFAULT_AGE: u32 = 30;

/// Parse free-form report text into one structured report row.
///
/// Single pass over the lowercased text with the fixed pattern table.
/// Missing demographics fall back to the historical defaults: age 30 and,
/// when the text never mentions gender at all, female (the stricter anemia
/// threshold is the male one, so the female default under-flags rather than
/// inventing risk).
pub fn parse_report_text(text: &str) -> LabReport {
    let normalized = text.to_lowercase();

    let mut report = LabReport {
        patient_id: DEFAULT_PATIENT_ID.to_string(),
        test_date: chrono::Local::now().date_naive(),
        hemoglobin: None,
        wbc: None,
        rbc: None,
        platelets: None,
        cholesterol: None,
        hdl: None,
        ldl: None,
        triglycerides: None,
        age: DEFAULT_AGE,
        gender: Gender::Female,
        symptoms: None,
    };

    for (marker, pattern) in MARKER_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(&normalized) {
            if let Ok(value) = captures[1].parse::<f64>() {
                set_marker(&mut report, *marker, value);
            }
        }
    }

    if let Some(captures) = AGE_PATTERN.captures(&normalized) {
        if let Ok(age) = captures[1].parse::<u32>() {
            report.age = age;
        }
    }

    report.gender = match GENDER_PATTERN.captures(&normalized) {
        Some(captures) => match &captures[1] {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        },
        // Mentioned but unreadable: treat as unspecified rather than female
        None if normalized.contains("gender") => Gender::Other,
        None => Gender::Female,
    };

    if let Some(captures) = PATIENT_ID_PATTERN.captures(&normalized) {
        report.patient_id = captures[1].to_uppercase();
    }

    report
}

fn set_marker(report: &mut LabReport, marker: Marker, value: f64) {
    match marker {
        Marker::Hemoglobin => report.hemoglobin = Some(value),
        Marker::Wbc => report.wbc = Some(value),
        Marker::Rbc => report.rbc = Some(value),
        Marker::Platelets => report.platelets = Some(value),
        Marker::Cholesterol => report.cholesterol = Some(value),
        Marker::Hdl => report.hdl = Some(value),
        Marker::Ldl => report.ldl = Some(value),
        Marker::Triglycerides => report.triglycerides = Some(value),
        Marker::Age => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPORT: &str = "\
        Patient ID: P-1042\n\
        Age: 57  Gender: Male\n\
        Hemoglobin: 11.4\n\
        WBC: 12.3\n\
        RBC: 4.51\n\
        Platelets: 240\n\
        Cholesterol: 212\n\
        HDL: 44\n\
        LDL: 141\n\
        Triglycerides: 180\n";

    #[test]
    fn full_report_extracts_every_field() {
        let report = parse_report_text(FULL_REPORT);
        assert_eq!(report.patient_id, "P-1042");
        assert_eq!(report.age, 57);
        assert_eq!(report.gender, Gender::Male);
        assert_eq!(report.hemoglobin, Some(11.4));
        assert_eq!(report.wbc, Some(12.3));
        assert_eq!(report.rbc, Some(4.51));
        assert_eq!(report.platelets, Some(240.0));
        assert_eq!(report.cholesterol, Some(212.0));
        assert_eq!(report.hdl, Some(44.0));
        assert_eq!(report.ldl, Some(141.0));
        assert_eq!(report.triglycerides, Some(180.0));
    }

    #[test]
    fn extraction_is_case_insensitive() {
        let report = parse_report_text("HEMOGLOBIN: 13.2\nGENDER: FEMALE");
        assert_eq!(report.hemoglobin, Some(13.2));
        assert_eq!(report.gender, Gender::Female);
    }

    #[test]
    fn missing_markers_stay_none() {
        let report = parse_report_text("Hemoglobin: 12.5");
        assert_eq!(report.hemoglobin, Some(12.5));
        assert_eq!(report.wbc, None);
        assert_eq!(report.ldl, None);
    }

    #[test]
    fn demographics_default_when_absent() {
        let report = parse_report_text("Hemoglobin: 12.5");
        assert_eq!(report.age, 30);
        assert_eq!(report.gender, Gender::Female);
        assert_eq!(report.patient_id, "P-UNKNOWN");
    }

    #[test]
    fn gender_mentioned_but_unreadable_is_other() {
        let report = parse_report_text("Gender: unknown\nHemoglobin: 12.5");
        assert_eq!(report.gender, Gender::Other);
    }

    #[test]
    fn integer_values_parse_without_decimals() {
        let report = parse_report_text("Platelets: 250");
        assert_eq!(report.platelets, Some(250.0));
    }

    #[test]
    fn dash_separator_is_accepted() {
        let report = parse_report_text("wbc - 9.8");
        assert_eq!(report.wbc, Some(9.8));
    }

    #[test]
    fn test_date_defaults_to_today() {
        let report = parse_report_text("Hemoglobin: 12.5");
        assert_eq!(report.test_date, chrono::Local::now().date_naive());
    }

    #[test]
    fn ocr_style_noisy_text_still_yields_fields() {
        let noisy = "LAB  CORP  RESULTS\n  hemoglobin   10.9 g/dL\n wbc :  13.8 x10^9/L\n age- 62";
        let report = parse_report_text(noisy);
        assert_eq!(report.hemoglobin, Some(10.9));
        assert_eq!(report.wbc, Some(13.8));
        assert_eq!(report.age, 62);
    }
}
