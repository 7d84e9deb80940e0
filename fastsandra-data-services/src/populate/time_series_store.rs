use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fastsandra_core::{InstrumentId, StoreConfig, TimeSeriesRecord};
use scylla::batch::{Batch, BatchStatement, BatchType};
use scylla::prepared_statement::PreparedStatement;
use scylla::statement::Consistency;
use scylla::{Session, SessionBuilder};
use tracing;

use super::bulk_loader::BatchWriter;

/// Bound values of one insert, in column order
pub type TimeSeriesRow = (NaiveDate, InstrumentId, DateTime<Utc>, f64);

/// Handle on the `time_series` table of a Cassandra/Scylla cluster.
///
/// Owns the session; it is released when the store is dropped.
pub struct TimeSeriesStore {
    session: Session,
    insert_statement: PreparedStatement,
}

impl TimeSeriesStore {
    /// Connect to the cluster, select the keyspace and prepare the insert
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            "Connecting to {:?} (keyspace {})",
            config.nodes,
            config.keyspace
        );

        let session = SessionBuilder::new()
            .known_nodes(&config.nodes)
            .use_keyspace(&config.keyspace, false)
            .build()
            .await?;

        let insert_statement = session.prepare(insert_query(&config.table)).await?;

        tracing::info!("Prepared insert into {}.{}", config.keyspace, config.table);

        Ok(Self {
            session,
            insert_statement,
        })
    }
}

#[async_trait]
impl BatchWriter for TimeSeriesStore {
    async fn write_batch(&self, records: &[TimeSeriesRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let batch = build_insert_batch(self.insert_statement.clone(), records.len());
        let values: Vec<TimeSeriesRow> = records.iter().map(record_row).collect();

        self.session.batch(&batch, values).await?;
        Ok(())
    }
}

/// Parameterized insert for `table`
pub fn insert_query(table: &str) -> String {
    format!(
        "INSERT INTO {} (event_date, instrument_id, event_timestamp, value) VALUES (?, ?, ?, ?)",
        table
    )
}

/// Logged batch of `len` inserts, written at QUORUM
pub fn build_insert_batch(statement: impl Into<BatchStatement> + Clone, len: usize) -> Batch {
    let mut batch = Batch::new(BatchType::Logged);
    for _ in 0..len {
        batch.append_statement(statement.clone());
    }
    batch.set_consistency(Consistency::Quorum);
    batch
}

/// Helper to bind a record to the insert's placeholders
pub fn record_row(record: &TimeSeriesRecord) -> TimeSeriesRow {
    (
        record.event_date,
        record.instrument_id,
        record.event_timestamp,
        record.value,
    )
}
