pub mod calendar;
pub mod record_generator;
pub mod chunker;
pub mod time_series_store;
pub mod bulk_loader;

// Re-export commonly used items
pub use calendar::business_days;
pub use record_generator::{intraday_timestamps, RecordGenerator};
pub use chunker::{chunk_count, chunks};
pub use time_series_store::{build_insert_batch, record_row, TimeSeriesStore};
pub use bulk_loader::{BatchWriter, BulkLoader, LoadPlan, LoadStats};
