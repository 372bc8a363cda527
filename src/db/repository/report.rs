use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;

/// Raw report row: encrypted payload plus the two queryable columns
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub patient_id: String,
    pub test_date: NaiveDate,
    pub payload: Vec<u8>,
}

pub fn insert_report(
    conn: &Connection,
    patient_id: &str,
    test_date: &NaiveDate,
    fingerprint: &str,
    payload: &[u8],
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO reports (patient_id, test_date, fingerprint, payload)
         VALUES (?1, ?2, ?3, ?4)",
        params![patient_id, test_date, fingerprint, payload],
    )?;
    Ok(())
}

/// True when this patient already has a row with the same content fingerprint
pub fn fingerprint_exists(
    conn: &Connection,
    patient_id: &str,
    fingerprint: &str,
) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM reports WHERE patient_id = ?1 AND fingerprint = ?2",
        params![patient_id, fingerprint],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// All rows, oldest first, optionally scoped to one patient
pub fn load_rows(
    conn: &Connection,
    patient_id: Option<&str>,
) -> Result<Vec<ReportRow>, DatabaseError> {
    let mut rows = Vec::new();

    match patient_id {
        Some(pid) => {
            let mut stmt = conn.prepare(
                "SELECT patient_id, test_date, payload FROM reports
                 WHERE patient_id = ?1 ORDER BY test_date ASC, id ASC",
            )?;
            let mapped = stmt.query_map(params![pid], row_from_rusqlite)?;
            for row in mapped {
                rows.push(row?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT patient_id, test_date, payload FROM reports
                 ORDER BY patient_id ASC, test_date ASC, id ASC",
            )?;
            let mapped = stmt.query_map([], row_from_rusqlite)?;
            for row in mapped {
                rows.push(row?);
            }
        }
    }

    Ok(rows)
}

/// The most recent row for a patient (latest test date wins)
pub fn latest_row(
    conn: &Connection,
    patient_id: &str,
) -> Result<Option<ReportRow>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT patient_id, test_date, payload FROM reports
             WHERE patient_id = ?1 ORDER BY test_date DESC, id DESC LIMIT 1",
            params![patient_id],
            row_from_rusqlite,
        )
        .optional()?;
    Ok(row)
}

pub fn count_reports(
    conn: &Connection,
    patient_id: Option<&str>,
) -> Result<usize, DatabaseError> {
    let count: i64 = match patient_id {
        Some(pid) => conn.query_row(
            "SELECT COUNT(*) FROM reports WHERE patient_id = ?1",
            params![pid],
            |row| row.get(0),
        )?,
        None => conn.query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))?,
    };
    Ok(count as usize)
}

/// Distinct patient ids, sorted
pub fn list_patients(conn: &Connection) -> Result<Vec<String>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT patient_id FROM reports ORDER BY patient_id ASC")?;
    let mapped = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut patients = Vec::new();
    for patient in mapped {
        patients.push(patient?);
    }
    Ok(patients)
}

fn row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<ReportRow, rusqlite::Error> {
    Ok(ReportRow {
        patient_id: row.get(0)?,
        test_date: row.get(1)?,
        payload: row.get(2)?,
    })
}
