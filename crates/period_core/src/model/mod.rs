//! Domain model for period and symptom tracking.
//!
//! # Responsibility
//! - Define the records persisted by the tracker store.
//! - Own the canonical `DD/MM/YY` date text format.
//!
//! # Invariants
//! - Period and symptom records are independent; no cross-reference exists.
//! - Records are never deleted.

pub mod date;
pub mod period;
pub mod symptom;
