use crate::types::InstrumentId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One sampled value for one instrument at one intraday timestamp.
///
/// Records are created in bulk by the generator, handed to the loader and
/// dropped once their batch is acknowledged. They are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRecord {
    pub event_date: NaiveDate,
    pub instrument_id: InstrumentId,
    pub event_timestamp: DateTime<Utc>,
    /// Uniform sample in [0, 1)
    pub value: f64,
}

impl TimeSeriesRecord {
    pub fn new(
        event_date: NaiveDate,
        instrument_id: InstrumentId,
        event_timestamp: DateTime<Utc>,
        value: f64,
    ) -> Self {
        Self {
            event_date,
            instrument_id,
            event_timestamp,
            value,
        }
    }
}
