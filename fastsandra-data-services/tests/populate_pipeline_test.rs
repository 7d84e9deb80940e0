/// End-to-end tests for generate → chunk → load
///
/// These tests cover:
/// - Record counts for single-day and full default ranges
/// - Batch counts and sizes seen by the destination
/// - Failure propagation from the destination
///
/// The live-cluster test requires Cassandra/Scylla on 127.0.0.1:9042 with the
/// `fastsandra.time_series` table. To run:
/// cargo test --package fastsandra-data-services --test populate_pipeline_test -- --ignored
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use fastsandra_core::{GeneratorConfig, LoaderConfig, StoreConfig, TimeSeriesRecord};
use fastsandra_data_services::{BatchWriter, BulkLoader, RecordGenerator, TimeSeriesStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;

#[derive(Default)]
struct CountingWriter {
    batch_sizes: Mutex<Vec<usize>>,
}

#[async_trait]
impl BatchWriter for CountingWriter {
    async fn write_batch(&self, records: &[TimeSeriesRecord]) -> Result<()> {
        self.batch_sizes.lock().unwrap().push(records.len());
        Ok(())
    }
}

struct UnreachableCluster;

#[async_trait]
impl BatchWriter for UnreachableCluster {
    async fn write_batch(&self, _records: &[TimeSeriesRecord]) -> Result<()> {
        anyhow::bail!("no hosts available")
    }
}

fn single_day(instruments: i32) -> GeneratorConfig {
    let day = NaiveDate::from_ymd_opt(2019, 10, 1).unwrap();
    GeneratorConfig {
        start_date: day,
        end_date: day,
        instruments,
        ..GeneratorConfig::default()
    }
}

#[tokio::test]
async fn test_single_day_two_instruments_is_one_batch() {
    let generator = RecordGenerator::new(single_day(2)).unwrap();
    let records = generator.generate_all(&mut ChaCha8Rng::seed_from_u64(1));
    assert_eq!(records.len(), 37);
    assert!(records.iter().all(|r| r.instrument_id == 1));

    let loader = BulkLoader::new(&LoaderConfig::default()).unwrap();
    let writer = CountingWriter::default();
    let stats = loader.load(&writer, &records).await.unwrap();

    assert_eq!(stats.batches_written, 1);
    assert_eq!(stats.records_written, 37);
    assert_eq!(*writer.batch_sizes.lock().unwrap(), vec![37]);
}

#[tokio::test]
async fn test_batch_count_is_ceiling_of_records_over_chunk_size() {
    // 1 day × 19 instruments × 37 timestamps = 703 records
    let generator = RecordGenerator::new(single_day(20)).unwrap();
    let records = generator.generate_all(&mut ChaCha8Rng::seed_from_u64(2));
    assert_eq!(records.len(), 703);

    let loader = BulkLoader::new(&LoaderConfig::default()).unwrap();
    let writer = CountingWriter::default();
    let stats = loader.load(&writer, &records).await.unwrap();

    let sizes = writer.batch_sizes.lock().unwrap();
    assert_eq!(stats.batches_written, 5);
    assert_eq!(sizes.len(), 703usize.div_ceil(142));
    assert!(sizes.iter().all(|&s| s <= 142));
    assert_eq!(sizes.iter().sum::<usize>(), 703);
    assert_eq!(*sizes.last().unwrap(), 703 - 4 * 142);
}

#[test]
fn test_default_run_plan() {
    let generator = RecordGenerator::new(GeneratorConfig::default()).unwrap();
    let loader = BulkLoader::new(&LoaderConfig::default()).unwrap();

    let plan = loader.plan(generator.expected_record_count());

    assert_eq!(plan.records, 813_186);
    assert_eq!(plan.batches, 5727);
    assert_eq!(plan.last_batch_len, 94);
}

#[tokio::test]
async fn test_destination_failure_propagates() {
    let generator = RecordGenerator::new(single_day(5)).unwrap();
    let records = generator.generate_all(&mut ChaCha8Rng::seed_from_u64(3));

    let loader = BulkLoader::new(&LoaderConfig::default()).unwrap();
    let err = loader
        .load(&UnreachableCluster, &records)
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("no hosts available"));
}

#[tokio::test]
#[ignore] // Requires Cassandra/Scylla running
async fn test_populate_live_cluster() {
    let generator = RecordGenerator::new(single_day(2)).unwrap();
    let records = generator.generate_all(&mut ChaCha8Rng::seed_from_u64(4));

    let store = TimeSeriesStore::connect(&StoreConfig::default())
        .await
        .unwrap();
    let loader = BulkLoader::new(&LoaderConfig::default()).unwrap();
    let stats = loader.load(&store, &records).await.unwrap();

    assert_eq!(stats.batches_written, 1);
    assert_eq!(stats.records_written, 37);
}
