//! Load progress observation.
//!
//! The batch loader reports through this trait instead of writing output
//! itself, so generation logic stays testable without capturing text.

use std::time::Duration;

/// Snapshot taken after a batch has been written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchProgress {
    /// 1-based number of the batch just written.
    pub batch_number: u64,
    /// Records in that batch.
    pub batch_len: usize,
    /// Records written so far, this batch included.
    pub inserted: u64,
    /// Records the load is going to write in total.
    pub total: u64,
    /// Time since the load started.
    pub elapsed: Duration,
}

impl BatchProgress {
    /// Fraction complete as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.inserted as f64 / self.total as f64 * 100.0
    }

    /// Throughput so far, or `None` if no time has elapsed.
    #[must_use]
    pub fn records_per_second(&self) -> Option<f64> {
        rate(self.inserted, self.elapsed)
    }
}

/// Final figures of a completed load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadSummary {
    /// Records written.
    pub inserted: u64,
    /// Write calls issued.
    pub batches: u64,
    /// Wall time of the whole load.
    pub elapsed: Duration,
}

impl LoadSummary {
    /// Average throughput, or `None` if no time has elapsed.
    #[must_use]
    pub fn records_per_second(&self) -> Option<f64> {
        rate(self.inserted, self.elapsed)
    }
}

#[allow(clippy::cast_precision_loss)]
fn rate(records: u64, elapsed: Duration) -> Option<f64> {
    let secs = elapsed.as_secs_f64();
    (secs > 0.0).then(|| records as f64 / secs)
}

/// Receives load progress. All methods default to doing nothing.
pub trait ProgressObserver: Send + Sync {
    /// Called once before the first record is generated.
    fn on_start(&self, _total: u64) {}

    /// Called after every successful batch write.
    fn on_batch(&self, _progress: &BatchProgress) {}

    /// Called once after the last batch was written.
    fn on_complete(&self, _summary: &LoadSummary) {}
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {}
