//! Period interval record.
//!
//! # Invariants
//! - `id` is assigned by storage, unique and monotonic.
//! - No ordering is enforced between `start_date` and `end_date`.
//! - Overlapping or duplicate intervals are allowed.

use super::date::{format_date, serde_ddmmyy};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage-assigned row id of a period record.
pub type PeriodId = i64;

/// One logged menstrual period occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub id: PeriodId,
    #[serde(with = "serde_ddmmyy")]
    pub start_date: NaiveDate,
    #[serde(with = "serde_ddmmyy")]
    pub end_date: NaiveDate,
}

impl PeriodRecord {
    /// Selector label shown when picking a record to modify.
    ///
    /// Format: `ID {id}: {start} - {end}`.
    pub fn label(&self) -> String {
        format!(
            "ID {}: {} - {}",
            self.id,
            format_date(self.start_date),
            format_date(self.end_date)
        )
    }
}
