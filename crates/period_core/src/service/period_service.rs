//! Period use-case service.
//!
//! # Responsibility
//! - Provide add/update/list entry points for period intervals.
//! - Build the calendar view and the next-period prediction from one read.
//!
//! # Invariants
//! - Every read path re-queries storage; nothing is cached between calls.
//! - Service layer remains storage-agnostic.

use crate::model::date::format_date;
use crate::model::period::{PeriodId, PeriodRecord};
use crate::predict::{predict_next_start, Prediction};
use crate::repo::period_repo::PeriodRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;

/// One row of the period calendar table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarRow {
    pub id: PeriodId,
    /// `DD/MM/YY`.
    pub start_date: String,
    /// `DD/MM/YY`.
    pub end_date: String,
}

impl From<&PeriodRecord> for CalendarRow {
    fn from(record: &PeriodRecord) -> Self {
        Self {
            id: record.id,
            start_date: format_date(record.start_date),
            end_date: format_date(record.end_date),
        }
    }
}

/// Use-case service wrapper for period operations.
pub struct PeriodService<R: PeriodRepository> {
    repo: R,
}

impl<R: PeriodRepository> PeriodService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Logs a new period interval and returns its id.
    pub fn add_period(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<PeriodId> {
        self.repo.add_period(start, end)
    }

    /// Replaces start/end of an existing interval and returns the stored row.
    ///
    /// Returns `RepoError::NotFound` unchanged when `id` does not exist.
    pub fn update_period(
        &self,
        id: PeriodId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<PeriodRecord> {
        self.repo.update_period(id, start, end)?;
        self.repo
            .get_period(id)?
            .ok_or(RepoError::NotFound(id))
    }

    /// Gets one interval by id.
    pub fn get_period(&self, id: PeriodId) -> RepoResult<Option<PeriodRecord>> {
        self.repo.get_period(id)
    }

    /// Lists every interval in storage order.
    pub fn list_periods(&self) -> RepoResult<Vec<PeriodRecord>> {
        self.repo.list_periods()
    }

    /// Lists intervals as display rows for the calendar table.
    pub fn calendar(&self) -> RepoResult<Vec<CalendarRow>> {
        Ok(self
            .repo
            .list_periods()?
            .iter()
            .map(CalendarRow::from)
            .collect())
    }

    /// Recomputes the next-period prediction from all stored start dates.
    pub fn predict_next_period(&self) -> RepoResult<Prediction> {
        let start_dates: Vec<NaiveDate> = self
            .repo
            .list_periods()?
            .iter()
            .map(|record| record.start_date)
            .collect();
        let prediction = predict_next_start(&start_dates);
        info!(
            "event=predict module=service status=ok records={} outcome={}",
            start_dates.len(),
            outcome_code(&prediction)
        );
        Ok(prediction)
    }
}

fn outcome_code(prediction: &Prediction) -> &'static str {
    match prediction {
        Prediction::NoData => "no_data",
        Prediction::InsufficientData => "insufficient_data",
        Prediction::Predicted { .. } => "predicted",
    }
}
