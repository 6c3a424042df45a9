//! SQLite-based exam storage.
//!
//! Exams are the only persisted data: the allocator reads them to decide
//! which subjects need extra study time this week.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::{data_dir, migrations};
use crate::error::{DatabaseError, Result, ValidationError};
use crate::study::ExamReference;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    pub id: i64,
    pub subject: String,
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl From<&ExamRecord> for ExamReference {
    fn from(record: &ExamRecord) -> Self {
        ExamReference::new(record.subject.clone(), record.date)
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns a validation error for anything else.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            value: value.to_string(),
        }
    })
}

/// SQLite database for exams.
pub struct ExamDb {
    conn: Connection,
}

impl ExamDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/studyplan/studyplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("studyplan.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        migrations::migrate(&self.conn)?;
        Ok(())
    }

    /// Store an exam and return its id.
    ///
    /// # Errors
    /// Returns an error if the subject is blank or the insert fails.
    pub fn add_exam(&self, subject: &str, date: NaiveDate, note: Option<&str>) -> Result<i64> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(ValidationError::EmptySubject.into());
        }
        self.conn.execute(
            "INSERT INTO exams (subject, date, note) VALUES (?1, ?2, ?3)",
            params![subject, date.format(DATE_FORMAT).to_string(), note],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, subject, %date, "stored exam");
        Ok(id)
    }

    /// All exams, earliest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list_exams(&self) -> Result<Vec<ExamRecord>> {
        self.query("SELECT id, subject, date, note FROM exams ORDER BY date, id", None)
    }

    /// Exams on or after `from`, earliest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn upcoming(&self, from: NaiveDate) -> Result<Vec<ExamRecord>> {
        self.query(
            "SELECT id, subject, date, note FROM exams WHERE date >= ?1 ORDER BY date, id",
            Some(from),
        )
    }

    /// Delete an exam. Returns whether a row was removed.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn remove_exam(&self, id: i64) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM exams WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    /// Every stored exam as allocator input.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn references(&self) -> Result<Vec<ExamReference>> {
        Ok(self.list_exams()?.iter().map(ExamReference::from).collect())
    }

    fn query(&self, sql: &str, from: Option<NaiveDate>) -> Result<Vec<ExamRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(i64, String, String, Option<String>)> {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        };
        let rows = match from {
            Some(from) => stmt
                .query_map(params![from.format(DATE_FORMAT).to_string()], map_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
            None => stmt
                .query_map([], map_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
        };

        let mut exams = Vec::with_capacity(rows.len());
        for (id, subject, date, note) in rows {
            match parse_date(&date) {
                Ok(date) => exams.push(ExamRecord {
                    id,
                    subject,
                    date,
                    note,
                }),
                Err(_) => tracing::warn!(id, date = %date, "skipping exam with malformed date"),
            }
        }
        Ok(exams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn add_and_list_in_date_order() {
        let db = ExamDb::open_memory().unwrap();
        db.add_exam("Storia", date("2024-10-20"), None).unwrap();
        let id = db
            .add_exam("Matematica", date("2024-10-05"), Some("derivate"))
            .unwrap();

        let exams = db.list_exams().unwrap();
        assert_eq!(exams.len(), 2);
        assert_eq!(exams[0].id, id);
        assert_eq!(exams[0].note.as_deref(), Some("derivate"));
        assert_eq!(exams[1].subject, "Storia");
    }

    #[test]
    fn upcoming_includes_the_given_day() {
        let db = ExamDb::open_memory().unwrap();
        db.add_exam("Storia", date("2024-09-30"), None).unwrap();
        db.add_exam("Inglese", date("2024-10-01"), None).unwrap();
        db.add_exam("Fisica", date("2024-10-09"), None).unwrap();

        let upcoming = db.upcoming(date("2024-10-01")).unwrap();
        let subjects: Vec<_> = upcoming.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(subjects, ["Inglese", "Fisica"]);
    }

    #[test]
    fn remove_reports_whether_row_existed() {
        let db = ExamDb::open_memory().unwrap();
        let id = db.add_exam("Storia", date("2024-10-20"), None).unwrap();
        assert!(db.remove_exam(id).unwrap());
        assert!(!db.remove_exam(id).unwrap());
        assert!(db.list_exams().unwrap().is_empty());
    }

    #[test]
    fn blank_subject_is_rejected() {
        let db = ExamDb::open_memory().unwrap();
        let err = db.add_exam("   ", date("2024-10-20"), None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EmptySubject)
        ));
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let db = ExamDb::open_memory().unwrap();
        db.add_exam("Storia", date("2024-10-20"), None).unwrap();
        db.conn()
            .execute(
                "INSERT INTO exams (subject, date) VALUES ('Latino', 'next week')",
                [],
            )
            .unwrap();

        let refs = db.references().unwrap();
        assert_eq!(refs, vec![ExamReference::new("Storia", date("2024-10-20"))]);
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("2024-10-05").is_ok());
        assert!(parse_date("05/10/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }
}
