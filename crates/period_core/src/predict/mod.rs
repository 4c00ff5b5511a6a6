//! Next-period prediction from historical start dates.
//!
//! # Invariants
//! - Pure: no storage access, same input always yields the same output.
//! - Average cycle uses truncating integer division, not rounding.
//! - Input order is irrelevant; duplicates count as zero-day cycles.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Outcome of a prediction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Prediction {
    /// No period has been logged yet.
    NoData,
    /// Only one period is logged, so no cycle length can be measured.
    InsufficientData,
    /// Enough history to estimate the next start date.
    Predicted {
        #[serde(with = "crate::model::date::serde_ddmmyy")]
        next_start: NaiveDate,
        average_cycle_days: i64,
    },
}

impl Prediction {
    /// Returns the predicted date, if any.
    pub fn next_start(&self) -> Option<NaiveDate> {
        match self {
            Self::Predicted { next_start, .. } => Some(*next_start),
            Self::NoData | Self::InsufficientData => None,
        }
    }
}

/// Day gaps between consecutive start dates after sorting ascending.
pub fn cycle_lengths(start_dates: &[NaiveDate]) -> Vec<i64> {
    let mut sorted = start_dates.to_vec();
    sorted.sort_unstable();
    sorted
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .collect()
}

/// Predicts the next period start from all known start dates.
///
/// `next = max(dates) + sum(gaps) / count(gaps)` days.
pub fn predict_next_start(start_dates: &[NaiveDate]) -> Prediction {
    let Some(last) = start_dates.iter().max().copied() else {
        return Prediction::NoData;
    };

    let gaps = cycle_lengths(start_dates);
    if gaps.is_empty() {
        return Prediction::InsufficientData;
    }

    // Gaps are non-negative after sorting, so `/` is floor division here.
    let average_cycle_days = gaps.iter().sum::<i64>() / gaps.len() as i64;
    Prediction::Predicted {
        next_start: last + Duration::days(average_cycle_days),
        average_cycle_days,
    }
}
