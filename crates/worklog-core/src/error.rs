//! Error types for worklog-core.
//!
//! Only configuration and caller-supplied parameters can fail. Rejected
//! sheets and skipped rows are outcomes, reported through
//! [`Batch`](crate::Batch), and never surface here during batch processing.

use crate::types::CanonicalField;
use chrono::NaiveDate;

/// Errors produced by the normalization engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The layered configuration could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// The configuration deserialized but violates an engine invariant.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The caller asked for a date range whose start is after its end.
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A sheet header did not expose every canonical field.
    #[error("sheet {sheet:?} is missing columns: {}", join_fields(.missing))]
    MissingColumns {
        sheet: String,
        missing: Vec<CanonicalField>,
    },
}

fn join_fields(fields: &[CanonicalField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
