use chrono::{Duration, NaiveDate};
use thiserror::Error;

/// Configuration rejected before any record is generated or any node contacted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid chunk size: {0} (must be greater than zero)")]
    InvalidChunkSize(usize),

    #[error("Invalid concurrency: {0} (must be greater than zero)")]
    InvalidConcurrency(usize),

    #[error("Invalid sampling frequency: {0} (must be a positive whole number of seconds)")]
    InvalidFrequency(Duration),

    #[error("Invalid instrument count: {0} (must be at least 1)")]
    InvalidInstrumentCount(i32),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid daily window: {start} to {end} (must satisfy 0 <= start <= end <= 1d)")]
    InvalidDailyWindow { start: Duration, end: Duration },

    #[error("Invalid duration: {0:?} (expected e.g. \"15min\", \"8h\", \"30s\")")]
    InvalidDuration(String),

    #[error("No contact nodes configured")]
    NoNodes,

    #[error("Blank contact node in {0:?}")]
    BlankNode(Vec<String>),

    #[error("Invalid CQL identifier: {0:?}")]
    InvalidIdentifier(String),
}
