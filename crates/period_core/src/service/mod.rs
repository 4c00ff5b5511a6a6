//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and the predictor into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod period_service;
pub mod symptom_service;
