pub mod time_series_record;

// Re-export common types
pub use time_series_record::TimeSeriesRecord;

/// Instrument identifier, stored in the `instrument_id` int column
pub type InstrumentId = i32;
