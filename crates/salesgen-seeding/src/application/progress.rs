//! Human-readable progress output through `tracing`.

use salesgen_core::progress::{BatchProgress, LoadSummary, ProgressObserver};
use tracing::info;

/// Logs load progress as plain sentences at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingProgress;

impl ProgressObserver for LoggingProgress {
    fn on_start(&self, total: u64) {
        info!("Starting insertion of {} records...", group_thousands(total));
    }

    fn on_batch(&self, progress: &BatchProgress) {
        info!(
            "Progress: {:.2}% ({} records)",
            progress.percent(),
            group_thousands(progress.inserted)
        );
        match progress.records_per_second() {
            Some(rate) => info!("Rate: {rate:.1} records/second"),
            None => info!("Rate: n/a"),
        }
    }

    fn on_complete(&self, summary: &LoadSummary) {
        info!(
            "Completed: {} records inserted in {:.1} seconds",
            group_thousands(summary.inserted),
            summary.elapsed.as_secs_f64()
        );
    }
}

/// Formats `n` with comma thousands separators.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
