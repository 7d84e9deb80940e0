use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use fastsandra_core::config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_INSTRUMENTS, DEFAULT_KEYSPACE, DEFAULT_NODE, DEFAULT_TABLE,
};
use fastsandra_core::{
    parse_duration, GeneratorConfig, LoaderConfig, PopulateConfig, StoreConfig,
};
use fastsandra_data_services::{BulkLoader, RecordGenerator, TimeSeriesStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, Level};

/// Fastsandra time-series populator
///
/// Generates random values for every instrument at every intraday sampling
/// timestamp of every business day in a range, then bulk-loads them into the
/// `time_series` table with batched QUORUM writes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First business day (YYYY-MM-DD, inclusive)
    #[arg(long, default_value = "2019-10-01")]
    start_date: NaiveDate,

    /// Last business day (YYYY-MM-DD, inclusive)
    #[arg(long, default_value = "2019-10-30")]
    end_date: NaiveDate,

    /// Instrument ids generated are 1..instruments
    #[arg(short = 'n', long, default_value_t = DEFAULT_INSTRUMENTS)]
    instruments: i32,

    /// Offset of the first daily sample from midnight (e.g. "8h")
    #[arg(long, default_value = "8h")]
    day_start: String,

    /// Offset of the last daily sample from midnight (e.g. "17h")
    #[arg(long, default_value = "17h")]
    day_end: String,

    /// Sampling frequency (e.g. "15min")
    #[arg(short = 'f', long, default_value = "15min")]
    frequency: String,

    /// Inserts per batch statement
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Maximum batches in flight (1 = sequential)
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Contact points (comma-separated host:port)
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_NODE)]
    nodes: Vec<String>,

    /// Target keyspace
    #[arg(short = 'k', long, default_value = DEFAULT_KEYSPACE)]
    keyspace: String,

    /// Target table
    #[arg(short = 't', long, default_value = DEFAULT_TABLE)]
    table: String,

    /// Seed for reproducible values (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Generate and report the batch plan without connecting
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Build the run configuration, parsing offset strings
    fn to_config(&self) -> Result<PopulateConfig> {
        let config = PopulateConfig {
            generator: GeneratorConfig {
                start_date: self.start_date,
                end_date: self.end_date,
                instruments: self.instruments,
                day_start: parse_duration(&self.day_start)?,
                day_end: parse_duration(&self.day_end)?,
                frequency: parse_duration(&self.frequency)?,
            },
            loader: LoaderConfig {
                chunk_size: self.chunk_size,
                concurrency: self.concurrency,
            },
            store: StoreConfig {
                nodes: self.nodes.clone(),
                keyspace: self.keyspace.clone(),
                table: self.table.clone(),
            },
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse log level from string
    fn parse_log_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(args.parse_log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("🚀 Fastsandra Time-Series Populator");
    info!("===================================");

    let config = args.to_config()?;

    info!("Configuration:");
    info!(
        "  Dates: {} to {} (business days)",
        config.generator.start_date, config.generator.end_date
    );
    info!("  Instruments: 1..{}", config.generator.instruments);
    info!(
        "  Window: {} to {} every {}",
        args.day_start, args.day_end, args.frequency
    );
    info!("  Chunk size: {}", config.loader.chunk_size);
    info!("  Concurrency: {}", config.loader.concurrency);
    info!("  Nodes: {:?}", config.store.nodes);
    info!("  Target: {}.{}", config.store.keyspace, config.store.table);
    info!("");

    let generator = RecordGenerator::new(config.generator.clone())?;
    let loader = BulkLoader::new(&config.loader)?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    // Entire dataset is materialized before the first write
    let records = generator.generate_all(&mut rng);
    let plan = loader.plan(records.len());

    info!(
        "Plan: {} records in {} batches (last batch {} records)",
        plan.records, plan.batches, plan.last_batch_len
    );

    if args.dry_run {
        info!("Dry run, not connecting");
        return Ok(());
    }

    // Session lives for this block and is closed on every exit path
    let stats = {
        let store = TimeSeriesStore::connect(&config.store).await?;
        loader.load(&store, &records).await?
    };
    info!(
        "Session to {}.{} closed",
        config.store.keyspace, config.store.table
    );

    info!("");
    info!("✅ Populate Complete!");
    info!("=====================");
    info!(
        "  {} records written in {} batches",
        stats.records_written, stats.batches_written
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use fastsandra_core::ConfigError;

    #[test]
    fn test_no_flags_reproduces_defaults() {
        let args = Args::parse_from(["fastsandra-populate"]);
        let config = args.to_config().unwrap();

        assert_eq!(config.generator.start_date.to_string(), "2019-10-01");
        assert_eq!(config.generator.end_date.to_string(), "2019-10-30");
        assert_eq!(config.generator.instruments, 1000);
        assert_eq!(config.generator.day_start, Duration::hours(8));
        assert_eq!(config.generator.day_end, Duration::hours(17));
        assert_eq!(config.generator.frequency, Duration::minutes(15));
        assert_eq!(config.loader.chunk_size, 142);
        assert_eq!(config.loader.concurrency, 1);
        assert_eq!(config.store.nodes, vec!["127.0.0.1:9042".to_string()]);
        assert_eq!(config.store.keyspace, "fastsandra");
        assert_eq!(config.store.table, "time_series");
        assert!(!args.dry_run);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "fastsandra-populate",
            "--start-date",
            "2019-10-01",
            "--end-date",
            "2019-10-01",
            "-n",
            "2",
            "--frequency",
            "30min",
            "--nodes",
            "10.0.0.1:9042,10.0.0.2:9042",
            "--seed",
            "7",
            "--dry-run",
        ]);
        let config = args.to_config().unwrap();

        assert_eq!(config.generator.instruments, 2);
        assert_eq!(config.generator.frequency, Duration::minutes(30));
        assert_eq!(config.store.nodes.len(), 2);
        assert_eq!(config.seed, Some(7));
        assert!(args.dry_run);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let args = Args::parse_from(["fastsandra-populate", "--chunk-size", "0"]);
        let err = args.to_config().unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::InvalidChunkSize(0))
        );
    }

    #[test]
    fn test_trailing_comma_in_nodes_rejected() {
        let args = Args::parse_from(["fastsandra-populate", "--nodes", "10.0.0.1:9042,"]);
        let err = args.to_config().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::BlankNode(_))
        ));
    }

    #[test]
    fn test_bad_frequency_rejected() {
        let args = Args::parse_from(["fastsandra-populate", "--frequency", "fortnightly"]);
        assert!(args.to_config().is_err());
    }

    #[test]
    fn test_parse_log_level() {
        let args = Args::parse_from(["fastsandra-populate", "-l", "DEBUG"]);
        assert_eq!(args.parse_log_level(), Level::DEBUG);

        let args = Args::parse_from(["fastsandra-populate", "-l", "loud"]);
        assert_eq!(args.parse_log_level(), Level::INFO);
    }
}
