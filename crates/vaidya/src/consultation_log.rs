/// Append-only consultation log backed by a single SQLite table.
///
/// Rows are never updated or deleted. The table is created on first use, so a fresh data
/// directory needs no setup. SQLite calls are blocking; async callers go through
/// `tokio::task::spawn_blocking`.
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection};
use serde::Serialize;

use crate::error::AppError;
use crate::model::{ConsultationRecord, DiseaseRecord, MatchResult, Severity};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS consultations (
    timestamp TEXT NOT NULL,
    symptoms TEXT NOT NULL,
    diagnosis TEXT,
    risk_level TEXT NOT NULL,
    recommendation TEXT NOT NULL
)";

pub struct ConsultationLog {
    conn: Mutex<Connection>,
}

impl ConsultationLog {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let conn = Connection::open(path)?;
        configure_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()?;
        configure_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn append(&self, record: &ConsultationRecord) -> Result<(), AppError> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA)?;
        conn.execute(
            "INSERT INTO consultations (timestamp, symptoms, diagnosis, risk_level, recommendation)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.timestamp,
                record.symptoms,
                record.diagnosis,
                record.risk_level.as_str(),
                record.recommendation,
            ],
        )?;
        Ok(())
    }

    /// All consultations in insertion order. Empty if nothing was ever logged.
    pub fn list_all(&self) -> Result<Vec<ConsultationRecord>, AppError> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA)?;

        let mut stmt = conn.prepare(
            "SELECT timestamp, symptoms, diagnosis, risk_level, recommendation
             FROM consultations ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (timestamp, symptoms, diagnosis, risk_level, recommendation) = row?;
            let risk_level = risk_level
                .parse::<Severity>()
                .map_err(|e| AppError::LogCorrupt(e.to_string()))?;
            records.push(ConsultationRecord {
                timestamp,
                symptoms,
                diagnosis,
                risk_level,
                recommendation,
            });
        }
        Ok(records)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.conn.lock().map_err(|_| AppError::LogPoisoned)
    }
}

fn configure_pragmas(conn: &Connection) -> Result<(), AppError> {
    conn.execute_batch("PRAGMA synchronous=FULL;")?;
    Ok(())
}

#[derive(Serialize)]
struct MatchSummary<'a> {
    disease: &'a str,
    severity: Severity,
    treatment: &'a str,
    escalation_criteria: &'a str,
}

impl<'a> From<&'a DiseaseRecord> for MatchSummary<'a> {
    fn from(record: &'a DiseaseRecord) -> Self {
        Self {
            disease: &record.disease,
            severity: record.severity,
            treatment: &record.treatment,
            escalation_criteria: &record.escalation_criteria,
        }
    }
}

/// Build the log row for one analyzed query, stamped with the current UTC time.
pub fn consultation_record(
    symptoms: &str,
    result: &MatchResult<'_>,
) -> Result<ConsultationRecord, AppError> {
    let diagnosis = if result.matches.is_empty() {
        None
    } else {
        let summary: Vec<MatchSummary<'_>> =
            result.matches.iter().map(|&r| MatchSummary::from(r)).collect();
        Some(serde_json::to_string(&summary)?)
    };

    Ok(ConsultationRecord {
        timestamp: chrono::Utc::now().to_rfc3339(),
        symptoms: symptoms.to_string(),
        diagnosis,
        risk_level: result.overall_severity,
        recommendation: result.recommendation.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{analyze, tests::sample_catalog};

    fn record(symptoms: &str, risk_level: Severity) -> ConsultationRecord {
        ConsultationRecord {
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            symptoms: symptoms.to_string(),
            diagnosis: None,
            risk_level,
            recommendation: "rest".to_string(),
        }
    }

    #[test]
    fn empty_log_lists_nothing() {
        let log = ConsultationLog::open_in_memory().unwrap();
        assert!(log.list_all().unwrap().is_empty());
    }

    #[test]
    fn appends_are_listed_in_insertion_order() {
        let log = ConsultationLog::open_in_memory().unwrap();
        log.append(&record("cough", Severity::Mild)).unwrap();
        log.append(&record("fever", Severity::Severe)).unwrap();
        log.append(&record("rash", Severity::Moderate)).unwrap();

        let all = log.list_all().unwrap();
        let symptoms: Vec<&str> = all.iter().map(|r| r.symptoms.as_str()).collect();
        assert_eq!(symptoms, vec!["cough", "fever", "rash"]);
        assert_eq!(all[1], record("fever", Severity::Severe));
    }

    #[test]
    fn table_is_created_on_first_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("consultations.db");

        let log = ConsultationLog::open(&path).unwrap();
        log.append(&record("cough", Severity::Mild)).unwrap();
        drop(log);

        let reopened = ConsultationLog::open(&path).unwrap();
        reopened.append(&record("fever", Severity::Severe)).unwrap();
        assert_eq!(reopened.list_all().unwrap().len(), 2);

        let conn = Connection::open(&path).unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='consultations'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn record_summarizes_matches_as_json() {
        let catalog = sample_catalog();
        let result = analyze("cough, fever", &catalog);
        let row = consultation_record("cough, fever", &result).unwrap();

        assert_eq!(row.symptoms, "cough, fever");
        assert_eq!(row.risk_level, Severity::Severe);
        assert_eq!(row.recommendation, "Seek immediate care");
        assert!(chrono::DateTime::parse_from_rfc3339(&row.timestamp).is_ok());

        let diagnosis: serde_json::Value =
            serde_json::from_str(row.diagnosis.as_deref().unwrap()).unwrap();
        assert_eq!(diagnosis[0]["disease"], "Common Cold");
        assert_eq!(diagnosis[1]["disease"], "Pneumonia");
        assert_eq!(diagnosis[1]["severity"], "Severe");
    }

    #[test]
    fn record_without_matches_has_no_diagnosis() {
        let catalog = sample_catalog();
        let result = analyze("headache", &catalog);
        let row = consultation_record("headache", &result).unwrap();
        assert_eq!(row.diagnosis, None);
        assert_eq!(row.risk_level, Severity::Mild);
    }
}
