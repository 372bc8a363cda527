//! High-level report store: encrypt-on-write, decrypt-on-read.
//!
//! Each report row carries its marker values as an AES-GCM sealed JSON blob.
//! Only the patient id and test date stay queryable in the clear, which is
//! what the trend and history queries need.

use std::path::Path;
use std::sync::Mutex;

use base64::Engine;
use rusqlite::Connection;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::crypto::{CryptoError, EncryptedData, StoreKey};
use crate::db::{repository, sqlite, DatabaseError};
use crate::models::LabReport;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Payload serialization error: {0}")]
    Serialization(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Outcome of a save: duplicates are skipped, not errored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    DuplicateSkipped,
}

pub struct Store {
    conn: Mutex<Connection>,
    key: StoreKey,
}

impl Store {
    /// Open (or create) the store at the given database path
    pub fn open(db_path: &Path, key: StoreKey) -> Result<Self, StoreError> {
        let conn = sqlite::open_database(db_path)?;
        Ok(Self {
            conn: Mutex::new(conn),
            key,
        })
    }

    /// In-memory store (for testing)
    pub fn open_in_memory(key: StoreKey) -> Result<Self, StoreError> {
        let conn = sqlite::open_memory_database()?;
        Ok(Self {
            conn: Mutex::new(conn),
            key,
        })
    }

    /// Encrypt and persist one report. A re-upload of identical content for
    /// the same patient is skipped.
    pub fn save_report(&self, report: &LabReport) -> Result<SaveOutcome, StoreError> {
        let json = serde_json::to_vec(report)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let fingerprint = report_fingerprint(&json);

        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        if repository::fingerprint_exists(&conn, &report.patient_id, &fingerprint)? {
            tracing::info!(patient = %report.patient_id, "Duplicate report skipped");
            return Ok(SaveOutcome::DuplicateSkipped);
        }

        let sealed = self.key.encrypt(&json)?.to_bytes();
        repository::insert_report(
            &conn,
            &report.patient_id,
            &report.test_date,
            &fingerprint,
            &sealed,
        )?;
        tracing::debug!(patient = %report.patient_id, date = %report.test_date, "Report stored");
        Ok(SaveOutcome::Saved)
    }

    /// Load and decrypt reports, oldest first, optionally for one patient
    pub fn load_reports(&self, patient_id: Option<&str>) -> Result<Vec<LabReport>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let rows = repository::load_rows(&conn, patient_id)?;
        drop(conn);

        rows.into_iter().map(|row| self.open_row(row)).collect()
    }

    /// The most recent report for a patient, if any
    pub fn latest_report(&self, patient_id: &str) -> Result<Option<LabReport>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let row = repository::latest_row(&conn, patient_id)?;
        drop(conn);

        row.map(|r| self.open_row(r)).transpose()
    }

    pub fn report_count(&self, patient_id: Option<&str>) -> Result<usize, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(repository::count_reports(&conn, patient_id)?)
    }

    pub fn list_patients(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(repository::list_patients(&conn)?)
    }

    /// Decrypt a row and rebind the queryable columns over the payload.
    /// The columns are authoritative — the payload may predate an id rename.
    fn open_row(&self, row: repository::ReportRow) -> Result<LabReport, StoreError> {
        let sealed = EncryptedData::from_bytes(&row.payload)?;
        let json = self.key.decrypt(&sealed)?;
        let mut report: LabReport = serde_json::from_slice(&json)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        report.patient_id = row.patient_id;
        report.test_date = row.test_date;
        Ok(report)
    }
}

/// SHA-256 content fingerprint of the serialized report, base64-encoded
fn report_fingerprint(json: &[u8]) -> String {
    let hash = Sha256::digest(json);
    base64::engine::general_purpose::STANDARD.encode(hash)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::Gender;

    fn test_store() -> Store {
        Store::open_in_memory(StoreKey::generate()).unwrap()
    }

    fn report(patient: &str, date: (i32, u32, u32), hb: f64) -> LabReport {
        LabReport {
            patient_id: patient.into(),
            test_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            hemoglobin: Some(hb),
            wbc: Some(7.0),
            rbc: None,
            platelets: None,
            cholesterol: Some(180.0),
            hdl: None,
            ldl: Some(105.0),
            triglycerides: Some(120.0),
            age: 37,
            gender: Gender::Female,
            symptoms: None,
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let store = test_store();
        let original = report("P-1000", (2026, 2, 1), 12.8);
        assert_eq!(store.save_report(&original).unwrap(), SaveOutcome::Saved);

        let loaded = store.load_reports(Some("P-1000")).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], original);
    }

    #[test]
    fn payload_on_disk_is_not_plaintext() {
        let store = test_store();
        store.save_report(&report("P-1000", (2026, 2, 1), 12.8)).unwrap();

        let conn = store.conn.lock().unwrap();
        let payload: Vec<u8> = conn
            .query_row("SELECT payload FROM reports LIMIT 1", [], |row| row.get(0))
            .unwrap();
        let as_text = String::from_utf8_lossy(&payload);
        assert!(!as_text.contains("hemoglobin"));
        assert!(!as_text.contains("12.8"));
    }

    #[test]
    fn duplicate_content_is_skipped() {
        let store = test_store();
        let r = report("P-1000", (2026, 2, 1), 12.8);
        assert_eq!(store.save_report(&r).unwrap(), SaveOutcome::Saved);
        assert_eq!(
            store.save_report(&r).unwrap(),
            SaveOutcome::DuplicateSkipped
        );
        assert_eq!(store.report_count(None).unwrap(), 1);
    }

    #[test]
    fn same_content_different_patient_is_kept() {
        let store = test_store();
        let mut r = report("P-1000", (2026, 2, 1), 12.8);
        store.save_report(&r).unwrap();
        r.patient_id = "P-1001".into();
        assert_eq!(store.save_report(&r).unwrap(), SaveOutcome::Saved);
        assert_eq!(store.report_count(None).unwrap(), 2);
    }

    #[test]
    fn latest_report_tracks_test_date() {
        let store = test_store();
        store.save_report(&report("P-1000", (2026, 1, 1), 11.0)).unwrap();
        store.save_report(&report("P-1000", (2026, 5, 1), 13.0)).unwrap();
        store.save_report(&report("P-1000", (2026, 3, 1), 12.0)).unwrap();

        let latest = store.latest_report("P-1000").unwrap().unwrap();
        assert_eq!(latest.hemoglobin, Some(13.0));
    }

    #[test]
    fn wrong_key_cannot_read_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.db");

        let store = Store::open(&path, StoreKey::derive("alpha", &[0u8; 32])).unwrap();
        store.save_report(&report("P-1000", (2026, 2, 1), 12.8)).unwrap();
        drop(store);

        let wrong = Store::open(&path, StoreKey::derive("beta", &[0u8; 32])).unwrap();
        assert!(wrong.load_reports(Some("P-1000")).is_err());
    }

    #[test]
    fn list_patients_is_sorted_and_distinct() {
        let store = test_store();
        store.save_report(&report("P-1001", (2026, 1, 1), 12.0)).unwrap();
        store.save_report(&report("P-1000", (2026, 1, 2), 12.1)).unwrap();
        store.save_report(&report("P-1000", (2026, 1, 3), 12.2)).unwrap();

        assert_eq!(store.list_patients().unwrap(), vec!["P-1000", "P-1001"]);
    }
}
