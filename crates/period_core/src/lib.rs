//! Core domain logic for the period tracker.
//! This crate is the single source of truth for storage and prediction rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod predict;
pub mod repo;
pub mod service;

pub use config::{Config, ConfigError};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError, LoggingStatus};
pub use model::date::{format_date, parse_date, DateParseError, DATE_FORMAT};
pub use model::period::{PeriodId, PeriodRecord};
pub use model::symptom::{NewSymptom, SymptomId, SymptomRecord};
pub use predict::{cycle_lengths, predict_next_start, Prediction};
pub use repo::period_repo::{PeriodRepository, SqlitePeriodRepository};
pub use repo::symptom_repo::{SqliteSymptomRepository, SymptomRepository};
pub use repo::{RepoError, RepoResult};
pub use service::period_service::{CalendarRow, PeriodService};
pub use service::symptom_service::SymptomService;
