use crate::error::ConfigError;
use crate::types::InstrumentId;
use chrono::{Duration, NaiveDate};
use std::num::NonZeroUsize;
use std::ops::Range;

/// Records per batch statement
pub const DEFAULT_CHUNK_SIZE: usize = 142;

pub const DEFAULT_INSTRUMENTS: InstrumentId = 1000;

pub const DEFAULT_KEYSPACE: &str = "fastsandra";

pub const DEFAULT_TABLE: &str = "time_series";

pub const DEFAULT_NODE: &str = "127.0.0.1:9042";

/// Longest unquoted keyspace/table name CQL accepts
const MAX_IDENTIFIER_LEN: usize = 48;

/// What to generate: the business-day range, the instrument universe and the
/// intraday sampling grid.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Instrument ids run over `1..instruments`
    pub instruments: InstrumentId,
    /// Offset from midnight of the first sample of each day
    pub day_start: Duration,
    /// Offset from midnight of the last possible sample (inclusive, at most one day)
    pub day_end: Duration,
    pub frequency: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2019, 10, 1).expect("valid default start date"),
            end_date: NaiveDate::from_ymd_opt(2019, 10, 30).expect("valid default end date"),
            instruments: DEFAULT_INSTRUMENTS,
            day_start: Duration::hours(8),
            day_end: Duration::hours(17),
            frequency: Duration::minutes(15),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The grid steps in whole seconds, matching what parse_duration produces
        if self.frequency < Duration::seconds(1) || self.frequency.subsec_nanos() != 0 {
            return Err(ConfigError::InvalidFrequency(self.frequency));
        }
        if self.instruments < 1 {
            return Err(ConfigError::InvalidInstrumentCount(self.instruments));
        }
        if self.start_date > self.end_date {
            return Err(ConfigError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.day_start < Duration::zero()
            || self.day_start > self.day_end
            || self.day_end > Duration::days(1)
        {
            return Err(ConfigError::InvalidDailyWindow {
                start: self.day_start,
                end: self.day_end,
            });
        }
        Ok(())
    }

    /// Instrument ids generated for every timestamp (upper bound exclusive)
    pub fn instrument_ids(&self) -> Range<InstrumentId> {
        1..self.instruments
    }
}

/// How records are grouped and submitted
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub chunk_size: usize,
    /// Maximum batches in flight; 1 keeps submission strictly sequential
    pub concurrency: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            concurrency: 1,
        }
    }
}

impl LoaderConfig {
    pub fn chunk_size(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.chunk_size).ok_or(ConfigError::InvalidChunkSize(self.chunk_size))
    }

    pub fn concurrency(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.concurrency)
            .ok_or(ConfigError::InvalidConcurrency(self.concurrency))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunk_size()?;
        self.concurrency()?;
        Ok(())
    }
}

/// Where records are written
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Contact points as `host:port`
    pub nodes: Vec<String>,
    pub keyspace: String,
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            nodes: vec![DEFAULT_NODE.to_string()],
            keyspace: DEFAULT_KEYSPACE.to_string(),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nodes.is_empty() {
            return Err(ConfigError::NoNodes);
        }
        if self.nodes.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::BlankNode(self.nodes.clone()));
        }
        // The table name is interpolated into the insert statement text
        for name in [&self.keyspace, &self.table] {
            if !is_valid_identifier(name) {
                return Err(ConfigError::InvalidIdentifier(name.clone()));
            }
        }
        Ok(())
    }
}

/// Full configuration of one populate run
#[derive(Debug, Clone, Default)]
pub struct PopulateConfig {
    pub generator: GeneratorConfig,
    pub loader: LoaderConfig,
    pub store: StoreConfig,
    /// Seed for the value generator; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl PopulateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        self.loader.validate()?;
        self.store.validate()?;
        Ok(())
    }
}

/// Parse a pandas-style offset such as `15min`, `8h`, `30s` or `1d`.
///
/// `m` and `T` are accepted as minute aliases.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(input.to_string());

    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split);
    let amount: i64 = digits.parse().map_err(|_| invalid())?;

    let duration = match unit.trim() {
        "s" | "S" | "sec" => Duration::try_seconds(amount),
        "min" | "m" | "T" => Duration::try_minutes(amount),
        "h" | "H" => Duration::try_hours(amount),
        "d" | "D" => Duration::try_days(amount),
        _ => None,
    };

    duration.ok_or_else(invalid)
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.len() <= MAX_IDENTIFIER_LEN && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
