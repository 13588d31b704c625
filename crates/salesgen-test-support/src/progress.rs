//! Recording progress observer.

use std::sync::Mutex;

use salesgen_core::progress::{BatchProgress, LoadSummary, ProgressObserver};

/// Captures every callback so tests can assert on what the loader reported.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    started: Mutex<Vec<u64>>,
    batches: Mutex<Vec<BatchProgress>>,
    completed: Mutex<Vec<LoadSummary>>,
}

impl RecordingProgress {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals passed to `on_start`, one entry per call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn started(&self) -> Vec<u64> {
        self.started.lock().unwrap().clone()
    }

    /// Every `BatchProgress` observed, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn batches(&self) -> Vec<BatchProgress> {
        self.batches.lock().unwrap().clone()
    }

    /// Summaries passed to `on_complete`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn completed(&self) -> Vec<LoadSummary> {
        self.completed.lock().unwrap().clone()
    }
}

impl ProgressObserver for RecordingProgress {
    fn on_start(&self, total: u64) {
        self.started.lock().unwrap().push(total);
    }

    fn on_batch(&self, progress: &BatchProgress) {
        self.batches.lock().unwrap().push(*progress);
    }

    fn on_complete(&self, summary: &LoadSummary) {
        self.completed.lock().unwrap().push(*summary);
    }
}
