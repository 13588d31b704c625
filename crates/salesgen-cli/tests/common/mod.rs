//! Shared test helpers for seeding integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use salesgen_core::clock::Clock;
use salesgen_core::rng::SeededRng;
use salesgen_seeding::domain::catalog::Catalog;
use salesgen_seeding::domain::date_range::SaleDateRange;
use salesgen_seeding::domain::generator::SaleGenerator;
use salesgen_test_support::FixedClock;

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> FixedClock {
    FixedClock(chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap())
}

/// A generator over the default catalog with a reproducible RNG.
pub fn seeded_generator(seed: u64) -> SaleGenerator {
    let clock: Arc<dyn Clock> = Arc::new(fixed_clock());
    SaleGenerator::new(
        Catalog::default(),
        SaleDateRange::default(),
        clock,
        Box::new(SeededRng::from_seed(seed)),
    )
}
