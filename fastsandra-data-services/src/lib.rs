pub mod populate;

// Re-export commonly used items
pub use populate::{
    business_days, chunk_count, chunks, BatchWriter, BulkLoader, LoadPlan, LoadStats,
    RecordGenerator, TimeSeriesStore,
};
