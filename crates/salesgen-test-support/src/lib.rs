//! Shared test mocks and utilities for the sales seeder.

mod clock;
mod progress;
mod repository;
mod rng;

pub use clock::{FixedClock, SteppingClock};
pub use progress::RecordingProgress;
pub use repository::{FailingOnBatchWriter, FailingSalesWriter, RecordingSalesWriter};
pub use rng::{MockRng, SequenceRng};
