//! Fixed pattern table for pulling structured fields out of free report text.
//!
//! Patterns run against the lowercased text, one pass each. They tolerate the
//! usual label separators seen in lab printouts ("Hemoglobin: 13.1",
//! "hemoglobin - 13.1", "HEMOGLOBIN 13.1").

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Marker;

/// Numeric marker patterns, in extraction order
pub static MARKER_PATTERNS: LazyLock<Vec<(Marker, Regex)>> = LazyLock::new(|| {
    vec![
        (
            Marker::Hemoglobin,
            Regex::new(r"hemoglobin\s*[:\-]?\s*([0-9]+\.?[0-9]*)").unwrap(),
        ),
        (
            Marker::Wbc,
            Regex::new(r"wbc\s*[:\-]?\s*([0-9]+\.?[0-9]*)").unwrap(),
        ),
        (
            Marker::Rbc,
            Regex::new(r"rbc\s*[:\-]?\s*([0-9]+\.?[0-9]*)").unwrap(),
        ),
        (
            Marker::Platelets,
            Regex::new(r"platelets?\s*[:\-]?\s*([0-9]+\.?[0-9]*)").unwrap(),
        ),
        (
            Marker::Cholesterol,
            Regex::new(r"cholesterol\s*[:\-]?\s*([0-9]+\.?[0-9]*)").unwrap(),
        ),
        (
            Marker::Hdl,
            Regex::new(r"hdl\s*[:\-]?\s*([0-9]+\.?[0-9]*)").unwrap(),
        ),
        (
            Marker::Ldl,
            Regex::new(r"ldl\s*[:\-]?\s*([0-9]+\.?[0-9]*)").unwrap(),
        ),
        (
            Marker::Triglycerides,
            Regex::new(r"triglycerides?\s*[:\-]?\s*([0-9]+\.?[0-9]*)").unwrap(),
        ),
    ]
});

pub static AGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"age\s*[:\-]?\s*([0-9]+)").unwrap());

pub static GENDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gender\s*[:\-]?\s*(male|female|other)").unwrap());

pub static PATIENT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"patient\s*(?:id)?\s*[:\-]?\s*(p-[0-9]+)").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_patterns_cover_all_lab_values() {
        let covered: Vec<Marker> = MARKER_PATTERNS.iter().map(|(m, _)| *m).collect();
        assert_eq!(covered.len(), 8);
        assert!(covered.contains(&Marker::Hemoglobin));
        assert!(covered.contains(&Marker::Triglycerides));
        // Age rides separately as an integer pattern
        assert!(!covered.contains(&Marker::Age));
    }

    #[test]
    fn separators_are_optional() {
        let (_, hb) = &MARKER_PATTERNS[0];
        assert!(hb.is_match("hemoglobin: 13.1"));
        assert!(hb.is_match("hemoglobin - 13.1"));
        assert!(hb.is_match("hemoglobin 13.1"));
    }

    #[test]
    fn singular_and_plural_forms_match() {
        let (_, platelets) = &MARKER_PATTERNS[3];
        assert!(platelets.is_match("platelet 250"));
        assert!(platelets.is_match("platelets: 250"));

        let (_, trig) = &MARKER_PATTERNS[7];
        assert!(trig.is_match("triglyceride 145"));
        assert!(trig.is_match("triglycerides: 145"));
    }

    #[test]
    fn gender_accepts_three_values_only() {
        assert!(GENDER_PATTERN.is_match("gender: male"));
        assert!(GENDER_PATTERN.is_match("gender female"));
        assert!(GENDER_PATTERN.is_match("gender - other"));
        assert!(!GENDER_PATTERN.is_match("gender: unknown"));
    }

    #[test]
    fn patient_id_pattern_matches_common_layouts() {
        assert!(PATIENT_ID_PATTERN.is_match("patient id: p-1042"));
        assert!(PATIENT_ID_PATTERN.is_match("patient: p-1042"));
        assert!(!PATIENT_ID_PATTERN.is_match("patient id: 1042"));
    }
}
