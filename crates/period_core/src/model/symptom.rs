//! Symptom entry record.
//!
//! All fields are free text. `date` is kept as entered; its format is owned
//! by whoever captures the input.

use serde::Serialize;

/// Storage-assigned row id of a symptom record.
pub type SymptomId = i64;

/// Request model for logging one symptom entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSymptom {
    pub date: String,
    pub mood: String,
    pub cramps: String,
    pub flow: String,
}

impl NewSymptom {
    pub fn new(
        date: impl Into<String>,
        mood: impl Into<String>,
        cramps: impl Into<String>,
        flow: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            mood: mood.into(),
            cramps: cramps.into(),
            flow: flow.into(),
        }
    }
}

/// Persisted symptom entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomRecord {
    pub id: SymptomId,
    pub date: String,
    pub mood: String,
    pub cramps: String,
    pub flow: String,
}
