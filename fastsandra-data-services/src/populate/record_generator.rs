use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use fastsandra_core::{ConfigError, GeneratorConfig, TimeSeriesRecord};
use rand::Rng;
use tracing;

use super::calendar::business_days;

/// Intraday sampling grid for `date`: from `day_start` to `day_end`
/// (inclusive) past midnight UTC, stepping by `frequency`.
///
/// Yields nothing for a non-positive frequency, and stops at the end of the
/// representable time range rather than overflowing.
pub fn intraday_timestamps(date: NaiveDate, config: &GeneratorConfig) -> Vec<DateTime<Utc>> {
    let mut timestamps = Vec::new();
    if config.frequency <= Duration::zero() {
        return timestamps;
    }

    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    let (Some(mut current), Some(last)) = (
        midnight.checked_add_signed(config.day_start),
        midnight.checked_add_signed(config.day_end),
    ) else {
        return timestamps;
    };

    while current <= last {
        timestamps.push(current);
        match current.checked_add_signed(config.frequency) {
            Some(next) => current = next,
            None => break,
        }
    }

    timestamps
}

/// Generates synthetic time-series records for every business day in the
/// configured range, every instrument and every intraday timestamp.
///
/// Records come out date-major, then by instrument id, then by timestamp.
pub struct RecordGenerator {
    config: GeneratorConfig,
    days: Vec<NaiveDate>,
}

impl RecordGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let days = business_days(config.start_date, config.end_date);

        tracing::debug!(
            "Generator covers {} business days from {} to {}",
            days.len(),
            config.start_date,
            config.end_date
        );

        Ok(Self { config, days })
    }

    pub fn business_days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Length of the intraday grid, identical for every day.
    ///
    /// Validation guarantees a whole-second frequency of at least one second.
    pub fn timestamps_per_day(&self) -> usize {
        let span = (self.config.day_end - self.config.day_start).num_seconds();
        let step = self.config.frequency.num_seconds();
        (span / step) as usize + 1
    }

    pub fn instruments_per_timestamp(&self) -> usize {
        self.config.instrument_ids().len()
    }

    /// Total number of records [`generate_all`](Self::generate_all) produces
    pub fn expected_record_count(&self) -> usize {
        self.days.len() * self.instruments_per_timestamp() * self.timestamps_per_day()
    }

    /// All records for a single day
    pub fn records_for_day<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        rng: &mut R,
    ) -> Vec<TimeSeriesRecord> {
        let timestamps = intraday_timestamps(date, &self.config);
        let mut records = Vec::with_capacity(self.instruments_per_timestamp() * timestamps.len());

        for instrument_id in self.config.instrument_ids() {
            for &timestamp in &timestamps {
                records.push(TimeSeriesRecord::new(
                    date,
                    instrument_id,
                    timestamp,
                    rng.gen::<f64>(),
                ));
            }
        }

        records
    }

    /// Materialize the full dataset in memory
    pub fn generate_all<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<TimeSeriesRecord> {
        let mut records = Vec::with_capacity(self.expected_record_count());

        for &date in &self.days {
            let day_records = self.records_for_day(date, rng);
            tracing::debug!("Generated {} records for {}", day_records.len(), date);
            records.extend(day_records);
        }

        tracing::info!(
            "Generated {} records ({} days × {} instruments × {} timestamps)",
            records.len(),
            self.days.len(),
            self.instruments_per_timestamp(),
            self.timestamps_per_day()
        );

        records
    }
}
