//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every mutating call commits before returning (autocommit, no batching).
//! - Repository APIs return semantic errors (`NotFound`, `InvalidDate`) in
//!   addition to DB transport errors.

pub mod period_repo;
pub mod symptom_repo;

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use chrono::NaiveDate;
use rusqlite::Connection;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for tracker persistence and query operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{0}")]
    Db(#[from] DbError),
    #[error("period not found: {0}")]
    NotFound(i64),
    #[error("{column} {date} is outside the storable range 1969-01-01..=2068-12-31")]
    DateOutOfRange { column: &'static str, date: NaiveDate },
    #[error("invalid persisted date `{value}` in {column}")]
    InvalidDate { column: &'static str, value: String },
    #[error("connection is not ready: {0}")]
    NotReady(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that did not go through `open_db`.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let version = current_user_version(conn)?;
    if version != latest_version() {
        return Err(RepoError::NotReady(format!(
            "schema version {version}, expected {}",
            latest_version()
        )));
    }
    Ok(())
}
