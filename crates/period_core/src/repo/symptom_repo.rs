//! Symptom repository contract and SQLite implementation.
//!
//! # Invariants
//! - Symptom rows are append-only.
//! - Free-text fields are stored verbatim and never logged.

use super::{ensure_connection_ready, RepoResult};
use crate::model::symptom::{NewSymptom, SymptomId, SymptomRecord};
use log::info;
use rusqlite::{params, Connection, Row};

/// Repository interface for symptom entries.
pub trait SymptomRepository {
    /// Inserts a new symptom entry and returns its fresh id.
    fn add_symptom(&self, symptom: &NewSymptom) -> RepoResult<SymptomId>;
    /// Lists every symptom entry in storage order.
    fn list_symptoms(&self) -> RepoResult<Vec<SymptomRecord>>;
}

/// SQLite-backed symptom repository.
pub struct SqliteSymptomRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSymptomRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SymptomRepository for SqliteSymptomRepository<'_> {
    fn add_symptom(&self, symptom: &NewSymptom) -> RepoResult<SymptomId> {
        self.conn.execute(
            "INSERT INTO symptoms (date, mood, cramps, flow) VALUES (?1, ?2, ?3, ?4);",
            params![
                symptom.date.as_str(),
                symptom.mood.as_str(),
                symptom.cramps.as_str(),
                symptom.flow.as_str(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("event=symptom_add module=repo status=ok id={id}");
        Ok(id)
    }

    fn list_symptoms(&self) -> RepoResult<Vec<SymptomRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, date, mood, cramps, flow FROM symptoms ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut symptoms = Vec::new();

        while let Some(row) = rows.next()? {
            symptoms.push(parse_symptom_row(row)?);
        }

        Ok(symptoms)
    }
}

fn parse_symptom_row(row: &Row<'_>) -> RepoResult<SymptomRecord> {
    Ok(SymptomRecord {
        id: row.get("id")?,
        date: text_column(row, "date")?,
        mood: text_column(row, "mood")?,
        cramps: text_column(row, "cramps")?,
        flow: text_column(row, "flow")?,
    })
}

fn text_column(row: &Row<'_>, column: &str) -> RepoResult<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}
