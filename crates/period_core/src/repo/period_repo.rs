//! Period repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/update/list APIs over the `periods` table.
//! - Convert between `NaiveDate` and the stored `DD/MM/YY` text.
//!
//! # Invariants
//! - Listing order is storage order (`id ASC`, i.e. insertion order).
//! - Write paths reject dates that `DD/MM/YY` cannot represent, before any SQL.
//! - Read paths reject unparseable stored dates instead of masking them.
//! - Updating a missing id is reported as `NotFound` and changes nothing.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::date::{format_date, is_storable, parse_date};
use crate::model::period::{PeriodId, PeriodRecord};
use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::{params, Connection, Row};

const PERIOD_SELECT_SQL: &str = "SELECT id, start_date, end_date FROM periods";

/// Repository interface for period interval records.
pub trait PeriodRepository {
    /// Inserts a new interval and returns its fresh id.
    fn add_period(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<PeriodId>;
    /// Overwrites start/end of an existing interval.
    fn update_period(&self, id: PeriodId, start: NaiveDate, end: NaiveDate) -> RepoResult<()>;
    /// Gets one interval by id.
    fn get_period(&self, id: PeriodId) -> RepoResult<Option<PeriodRecord>>;
    /// Lists every interval in storage order.
    fn list_periods(&self) -> RepoResult<Vec<PeriodRecord>>;
}

/// SQLite-backed period repository.
pub struct SqlitePeriodRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePeriodRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PeriodRepository for SqlitePeriodRepository<'_> {
    fn add_period(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<PeriodId> {
        ensure_storable(start, end)?;
        self.conn.execute(
            "INSERT INTO periods (start_date, end_date) VALUES (?1, ?2);",
            params![format_date(start), format_date(end)],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("event=period_add module=repo status=ok id={id}");
        Ok(id)
    }

    fn update_period(&self, id: PeriodId, start: NaiveDate, end: NaiveDate) -> RepoResult<()> {
        ensure_storable(start, end)?;
        let changed = self.conn.execute(
            "UPDATE periods SET start_date = ?1, end_date = ?2 WHERE id = ?3;",
            params![format_date(start), format_date(end), id],
        )?;

        if changed == 0 {
            info!("event=period_update module=repo status=not_found id={id}");
            return Err(RepoError::NotFound(id));
        }

        info!("event=period_update module=repo status=ok id={id}");
        Ok(())
    }

    fn get_period(&self, id: PeriodId) -> RepoResult<Option<PeriodRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PERIOD_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_period_row(row)?));
        }

        Ok(None)
    }

    fn list_periods(&self) -> RepoResult<Vec<PeriodRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PERIOD_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut periods = Vec::new();

        while let Some(row) = rows.next()? {
            periods.push(parse_period_row(row)?);
        }

        debug!(
            "event=period_list module=repo status=ok count={}",
            periods.len()
        );
        Ok(periods)
    }
}

fn ensure_storable(start: NaiveDate, end: NaiveDate) -> RepoResult<()> {
    for (column, date) in [("start_date", start), ("end_date", end)] {
        if !is_storable(date) {
            return Err(RepoError::DateOutOfRange { column, date });
        }
    }
    Ok(())
}

fn parse_period_row(row: &Row<'_>) -> RepoResult<PeriodRecord> {
    Ok(PeriodRecord {
        id: row.get("id")?,
        start_date: parse_date_column(row, "start_date")?,
        end_date: parse_date_column(row, "end_date")?,
    })
}

fn parse_date_column(row: &Row<'_>, column: &'static str) -> RepoResult<NaiveDate> {
    let text: Option<String> = row.get(column)?;
    let text = text.unwrap_or_default();
    parse_date(&text).map_err(|_| RepoError::InvalidDate {
        column,
        value: text,
    })
}
