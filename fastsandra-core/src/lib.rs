pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use config::{parse_duration, GeneratorConfig, LoaderConfig, PopulateConfig, StoreConfig};
pub use error::ConfigError;
pub use types::{InstrumentId, TimeSeriesRecord};
