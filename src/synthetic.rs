//! Synthetic demo dataset: seeded, repeatable cohort with per-patient
//! longitudinal trends so the dashboard and the trainer have data on day one.

use chrono::Duration;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::models::{Gender, LabReport};

pub const DEFAULT_COHORT_SIZE: usize = 500;
pub const DEFAULT_SEED: u64 = 42;

struct PatientProfile {
    id: String,
    age: u32,
    gender: Gender,
    /// Latent per-patient drift: pushes markers up or down consistently
    /// across that patient's reports.
    trend: f64,
}

/// Generate `n` synthetic reports over a pool of `max(25, n/5)` patients,
/// sorted by patient then test date.
pub fn generate_synthetic_dataset(n: usize, seed: u64) -> Vec<LabReport> {
    let mut rng = StdRng::seed_from_u64(seed);
    let today = chrono::Local::now().date_naive();

    let pool_size = (n / 5).max(25);
    let trend_dist = Normal::new(0.0, 0.6).expect("valid distribution");

    let patients: Vec<PatientProfile> = (0..pool_size)
        .map(|i| PatientProfile {
            id: format!("P-{}", 1000 + i),
            age: rng.gen_range(18..80),
            gender: if rng.gen_bool(0.5) {
                Gender::Male
            } else {
                Gender::Female
            },
            trend: trend_dist.sample(&mut rng),
        })
        .collect();

    let hemoglobin_dist = Normal::new(13.2, 1.4).expect("valid distribution");
    let wbc_dist = Normal::new(7.0, 2.0).expect("valid distribution");
    let rbc_dist = Normal::new(4.8, 0.6).expect("valid distribution");
    let platelets_dist = Normal::new(280.0, 60.0).expect("valid distribution");
    let cholesterol_dist = Normal::new(190.0, 35.0).expect("valid distribution");
    let hdl_dist = Normal::new(50.0, 12.0).expect("valid distribution");
    let ldl_dist = Normal::new(120.0, 30.0).expect("valid distribution");
    let triglycerides_dist = Normal::new(140.0, 45.0).expect("valid distribution");

    let mut reports: Vec<LabReport> = (0..n)
        .map(|_| {
            let patient = &patients[rng.gen_range(0..pool_size)];
            let female = patient.gender == Gender::Female;
            let older = patient.age > 45;
            let trending_up = patient.trend > 0.4;
            let trending_down = patient.trend < -0.4;

            let hemoglobin = round1(
                hemoglobin_dist.sample(&mut rng)
                    - if female { 0.7 } else { 0.0 }
                    + patient.trend * 0.6,
            );
            let wbc = round1(wbc_dist.sample(&mut rng) + if trending_down { 0.9 } else { 0.0 });
            let rbc = round2(rbc_dist.sample(&mut rng));
            let platelets = round0(platelets_dist.sample(&mut rng));
            let cholesterol = round0(
                cholesterol_dist.sample(&mut rng)
                    + if older { 15.0 } else { 0.0 }
                    + if trending_up { 10.0 } else { 0.0 },
            );
            let hdl = round0(hdl_dist.sample(&mut rng));
            let ldl = round0(
                ldl_dist.sample(&mut rng)
                    + if older { 12.0 } else { 0.0 }
                    + if trending_up { 10.0 } else { 0.0 },
            );
            let triglycerides = round0(
                triglycerides_dist.sample(&mut rng) + if trending_up { 8.0 } else { 0.0 },
            );

            let symptoms = if hemoglobin < 11.5 {
                Some("Fatigue".to_string())
            } else if wbc > 11.0 {
                Some("Fever".to_string())
            } else {
                None
            };

            let days_ago = rng.gen_range(0..365);
            let test_date = today - Duration::days(days_ago);

            LabReport {
                patient_id: patient.id.clone(),
                test_date,
                hemoglobin: Some(hemoglobin),
                wbc: Some(wbc),
                rbc: Some(rbc),
                platelets: Some(platelets),
                cholesterol: Some(cholesterol),
                hdl: Some(hdl),
                ldl: Some(ldl),
                triglycerides: Some(triglycerides),
                age: patient.age,
                gender: patient.gender,
                symptoms,
            }
        })
        .collect();

    reports.sort_by(|a, b| {
        a.patient_id
            .cmp(&b.patient_id)
            .then(a.test_date.cmp(&b.test_date))
    });
    reports
}

fn round0(v: f64) -> f64 {
    v.round()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
