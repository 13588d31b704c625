//! Batch loader: generate records and persist them in fixed-size batches.
//!
//! One batch is in flight at a time. Each batch is a single unordered bulk
//! write; a failed write ends the load without retry, leaving earlier
//! batches in place.

use std::num::NonZeroUsize;
use std::time::Duration;

use salesgen_core::clock::Clock;
use salesgen_core::error::DomainError;
use salesgen_core::progress::{BatchProgress, LoadSummary, ProgressObserver};
use salesgen_core::record::SaleRecord;
use salesgen_core::repository::{InsertOptions, SalesWriter};
use tracing::{debug, error, instrument};

use crate::domain::generator::SaleGenerator;

/// Records written by a default run.
pub const DEFAULT_TOTAL_RECORDS: u64 = 1_000_000;
/// Records per bulk write in a default run.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

/// How many records to load and how to group them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPlan {
    total_records: u64,
    batch_size: NonZeroUsize,
}

impl LoadPlan {
    /// Creates a plan.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `batch_size` is zero.
    pub fn new(total_records: u64, batch_size: usize) -> Result<Self, DomainError> {
        let batch_size = NonZeroUsize::new(batch_size).ok_or_else(|| {
            DomainError::Validation("batch size must be at least 1".to_owned())
        })?;
        Ok(Self {
            total_records,
            batch_size,
        })
    }

    /// Records the load will write.
    #[must_use]
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Maximum records per bulk write.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size.get()
    }
}

impl Default for LoadPlan {
    fn default() -> Self {
        Self {
            total_records: DEFAULT_TOTAL_RECORDS,
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Running totals of one load.
struct LoadState<'a> {
    plan: &'a LoadPlan,
    writer: &'a dyn SalesWriter,
    clock: &'a dyn Clock,
    progress: &'a dyn ProgressObserver,
    started_at: chrono::DateTime<chrono::Utc>,
    inserted: u64,
    batches: u64,
}

impl LoadState<'_> {
    fn elapsed(&self) -> Duration {
        (self.clock.now() - self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Writes `batch` as one unordered bulk write and empties it, whatever
    /// the outcome.
    async fn submit(&mut self, batch: &mut Vec<SaleRecord>) -> Result<(), DomainError> {
        let batch_number = self.batches + 1;
        let batch_len = batch.len();
        let result = self
            .writer
            .insert_many(batch, InsertOptions::UNORDERED)
            .await;
        batch.clear();

        match result {
            Ok(outcome) => {
                self.batches = batch_number;
                self.inserted += outcome.inserted_count;
                debug!(batch_number, batch_len, inserted = self.inserted, "batch written");
                self.progress.on_batch(&BatchProgress {
                    batch_number,
                    batch_len,
                    inserted: self.inserted,
                    total: self.plan.total_records(),
                    elapsed: self.elapsed(),
                });
                Ok(())
            }
            Err(source) => {
                error!(
                    batch_number,
                    batch_len,
                    records_durable = self.inserted,
                    error = %source,
                    "Error inserting batch"
                );
                Err(DomainError::BatchWriteFailure {
                    batch_number,
                    records_durable: self.inserted,
                    source,
                })
            }
        }
    }
}

/// Generates `plan.total_records()` records and writes them in batches of
/// `plan.batch_size()`, the last batch possibly shorter.
///
/// # Errors
///
/// Returns `DomainError::BatchWriteFailure` for the first batch the writer
/// rejects. Earlier batches stay written and no further batch is attempted.
#[instrument(
    skip_all,
    fields(total_records = plan.total_records(), batch_size = plan.batch_size())
)]
pub async fn run_load(
    plan: &LoadPlan,
    generator: &mut SaleGenerator,
    writer: &dyn SalesWriter,
    clock: &dyn Clock,
    progress: &dyn ProgressObserver,
) -> Result<LoadSummary, DomainError> {
    let mut state = LoadState {
        plan,
        writer,
        clock,
        progress,
        started_at: clock.now(),
        inserted: 0,
        batches: 0,
    };
    progress.on_start(plan.total_records());

    let capacity = usize::try_from(plan.total_records())
        .map_or(plan.batch_size(), |total| total.min(plan.batch_size()));
    let mut batch: Vec<SaleRecord> = Vec::with_capacity(capacity);
    let mut generated: u64 = 0;

    while generated < plan.total_records() {
        batch.push(generator.next_record());
        generated += 1;

        if batch.len() == plan.batch_size() {
            state.submit(&mut batch).await?;
        }
    }

    if !batch.is_empty() {
        state.submit(&mut batch).await?;
    }

    let summary = LoadSummary {
        inserted: state.inserted,
        batches: state.batches,
        elapsed: state.elapsed(),
    };
    progress.on_complete(&summary);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use salesgen_core::error::StoreError;
    use salesgen_core::progress::NoopProgress;
    use salesgen_core::rng::SeededRng;
    use salesgen_test_support::{
        FailingOnBatchWriter, FailingSalesWriter, FixedClock, RecordingProgress,
        RecordingSalesWriter, SteppingClock,
    };

    use super::*;
    use crate::domain::catalog::Catalog;
    use crate::domain::date_range::SaleDateRange;

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn generator() -> SaleGenerator {
        SaleGenerator::new(
            Catalog::default(),
            SaleDateRange::default(),
            Arc::new(fixed_clock()),
            Box::new(SeededRng::from_seed(99)),
        )
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let result = LoadPlan::new(10, 0);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_default_plan() {
        let plan = LoadPlan::default();
        assert_eq!(plan.total_records(), 1_000_000);
        assert_eq!(plan.batch_size(), 1_000);
    }

    #[tokio::test]
    async fn test_run_load_splits_into_full_batches_and_remainder() {
        let plan = LoadPlan::new(2_500, 1_000).unwrap();
        let writer = RecordingSalesWriter::new();
        let clock = fixed_clock();

        let summary = run_load(&plan, &mut generator(), &writer, &clock, &NoopProgress)
            .await
            .unwrap();

        assert_eq!(writer.batch_sizes(), vec![1_000, 1_000, 500]);
        assert_eq!(summary.inserted, 2_500);
        assert_eq!(summary.batches, 3);
    }

    #[tokio::test]
    async fn test_run_load_uses_unordered_writes() {
        let plan = LoadPlan::new(30, 7).unwrap();
        let writer = RecordingSalesWriter::new();

        run_load(&plan, &mut generator(), &writer, &fixed_clock(), &NoopProgress)
            .await
            .unwrap();

        let calls = writer.calls();
        assert_eq!(calls.len(), 5);
        assert!(calls.iter().all(|(_, options)| !options.ordered));
    }

    #[tokio::test]
    async fn test_run_load_with_zero_records_writes_nothing() {
        let plan = LoadPlan::new(0, 1_000).unwrap();
        let writer = RecordingSalesWriter::new();
        let progress = RecordingProgress::new();

        let summary = run_load(&plan, &mut generator(), &writer, &fixed_clock(), &progress)
            .await
            .unwrap();

        assert!(writer.calls().is_empty());
        assert!(progress.batches().is_empty());
        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.batches, 0);
        assert_eq!(progress.completed().len(), 1);
    }

    #[tokio::test]
    async fn test_run_load_exact_multiple_has_no_short_batch() {
        let plan = LoadPlan::new(3_000, 1_000).unwrap();
        let writer = RecordingSalesWriter::new();

        run_load(&plan, &mut generator(), &writer, &fixed_clock(), &NoopProgress)
            .await
            .unwrap();

        assert_eq!(writer.batch_sizes(), vec![1_000, 1_000, 1_000]);
    }

    #[tokio::test]
    async fn test_run_load_batch_larger_than_total() {
        let plan = LoadPlan::new(42, 1_000).unwrap();
        let writer = RecordingSalesWriter::new();

        run_load(&plan, &mut generator(), &writer, &fixed_clock(), &NoopProgress)
            .await
            .unwrap();

        assert_eq!(writer.batch_sizes(), vec![42]);
    }

    #[tokio::test]
    async fn test_failure_on_second_batch_stops_the_load() {
        let plan = LoadPlan::new(2_500, 1_000).unwrap();
        let writer = FailingOnBatchWriter::new(2);
        let progress = RecordingProgress::new();

        let result = run_load(&plan, &mut generator(), &writer, &fixed_clock(), &progress).await;

        match result {
            Err(DomainError::BatchWriteFailure {
                batch_number,
                records_durable,
                source: StoreError::Infrastructure(_),
            }) => {
                assert_eq!(batch_number, 2);
                assert_eq!(records_durable, 1_000);
            }
            other => panic!("expected BatchWriteFailure, got {other:?}"),
        }

        assert_eq!(writer.attempts(), 2);
        let durable = writer.durable_batches();
        assert_eq!(durable.len(), 1);
        assert_eq!(durable[0].len(), 1_000);
        assert_eq!(progress.batches().len(), 1);
        assert!(progress.completed().is_empty());
    }

    #[tokio::test]
    async fn test_partial_bulk_write_failure_propagates() {
        let plan = LoadPlan::new(10, 5).unwrap();

        let result = run_load(
            &plan,
            &mut generator(),
            &FailingSalesWriter,
            &fixed_clock(),
            &NoopProgress,
        )
        .await;

        match result {
            Err(DomainError::BatchWriteFailure {
                batch_number,
                records_durable,
                source: StoreError::BulkWrite { inserted_count, write_errors },
            }) => {
                assert_eq!(batch_number, 1);
                assert_eq!(records_durable, 0);
                assert_eq!(inserted_count, 4);
                assert_eq!(write_errors.len(), 1);
            }
            other => panic!("expected BatchWriteFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_progress_reported_after_every_batch() {
        let plan = LoadPlan::new(2_500, 1_000).unwrap();
        let writer = RecordingSalesWriter::new();
        let progress = RecordingProgress::new();
        // start, then one reading per batch, then the summary
        let clock = SteppingClock::new(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            chrono::Duration::milliseconds(500),
        );

        let summary = run_load(&plan, &mut generator(), &writer, &clock, &progress)
            .await
            .unwrap();

        assert_eq!(progress.started(), vec![2_500]);

        let batches = progress.batches();
        let inserted: Vec<u64> = batches.iter().map(|b| b.inserted).collect();
        assert_eq!(inserted, vec![1_000, 2_000, 2_500]);
        let numbers: Vec<u64> = batches.iter().map(|b| b.batch_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(batches[2].batch_len, 500);
        assert!((batches[2].percent() - 100.0).abs() < f64::EPSILON);

        assert_eq!(batches[0].elapsed, Duration::from_millis(500));
        assert_eq!(batches[0].records_per_second(), Some(2_000.0));
        assert_eq!(batches[2].elapsed, Duration::from_millis(1_500));

        assert_eq!(summary.elapsed, Duration::from_millis(2_000));
        assert_eq!(summary.records_per_second(), Some(1_250.0));
        assert_eq!(progress.completed(), vec![summary]);
    }

    #[tokio::test]
    async fn test_records_written_in_generation_order() {
        let plan = LoadPlan::new(20, 8).unwrap();
        let writer = RecordingSalesWriter::new();
        let expected: Vec<_> = generator().take(20).map(|r| (r.product, r.unit_price)).collect();

        run_load(&plan, &mut generator(), &writer, &fixed_clock(), &NoopProgress)
            .await
            .unwrap();

        let written: Vec<_> = writer
            .calls()
            .into_iter()
            .flat_map(|(records, _)| records)
            .map(|r| (r.product, r.unit_price))
            .collect();
        assert_eq!(written, expected);
    }
}
