use anyhow::{Context, Result};
use async_trait::async_trait;
use fastsandra_core::{ConfigError, LoaderConfig, TimeSeriesRecord};
use futures::stream::{self, TryStreamExt};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing;

use super::chunker::{chunk_count, chunks};

/// Destination that accepts one batch write per call
#[async_trait]
pub trait BatchWriter: Send + Sync {
    /// Submit one batch containing one insert per record
    async fn write_batch(&self, records: &[TimeSeriesRecord]) -> Result<()>;
}

/// Statistics from a load run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    pub batches_written: usize,
    pub records_written: usize,
}

/// How a record set will be split into batches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPlan {
    pub records: usize,
    pub batches: usize,
    /// Size of the final (possibly partial) batch, 0 when there are no records
    pub last_batch_len: usize,
}

/// Splits records into fixed-size chunks and submits one batch per chunk.
///
/// With a concurrency of 1 batches go out strictly in order, one in flight
/// at a time. The first failed batch aborts the load and no further chunks
/// are submitted.
pub struct BulkLoader {
    chunk_size: NonZeroUsize,
    concurrency: NonZeroUsize,
}

impl BulkLoader {
    pub fn new(config: &LoaderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            chunk_size: config.chunk_size()?,
            concurrency: config.concurrency()?,
        })
    }

    pub fn plan(&self, records: usize) -> LoadPlan {
        let batches = chunk_count(records, self.chunk_size);
        let last_batch_len = if batches == 0 {
            0
        } else {
            records - self.chunk_size.get() * (batches - 1)
        };

        LoadPlan {
            records,
            batches,
            last_batch_len,
        }
    }

    /// Write every record through `writer`, one batch per chunk
    pub async fn load<W: BatchWriter + ?Sized>(
        &self,
        writer: &W,
        records: &[TimeSeriesRecord],
    ) -> Result<LoadStats> {
        let plan = self.plan(records.len());

        if plan.batches == 0 {
            tracing::warn!("No records to load");
            return Ok(LoadStats::default());
        }

        tracing::info!(
            "Loading {} records in {} batches of up to {} ({} in flight)",
            plan.records,
            plan.batches,
            self.chunk_size,
            self.concurrency
        );

        let written = AtomicUsize::new(0);
        let written_ref = &written;
        let total = plan.batches;

        stream::iter(chunks(records, self.chunk_size).enumerate().map(Ok::<_, anyhow::Error>))
            .try_for_each_concurrent(self.concurrency.get(), move |(index, chunk)| async move {
                tracing::debug!(
                    "Submitting batch {}/{} ({} records)",
                    index + 1,
                    total,
                    chunk.len()
                );

                writer
                    .write_batch(chunk)
                    .await
                    .with_context(|| format!("Batch {} of {} failed", index + 1, total))?;

                let done = written_ref.fetch_add(1, Ordering::Relaxed) + 1;
                if done % 1000 == 0 {
                    tracing::info!("Written {}/{} batches", done, total);
                }
                Ok::<(), anyhow::Error>(())
            })
            .await?;

        let stats = LoadStats {
            batches_written: written.load(Ordering::Relaxed),
            records_written: plan.records,
        };

        tracing::info!("Load complete: {:?}", stats);
        Ok(stats)
    }
}
