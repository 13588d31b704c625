//! Synthetic sale record generator.

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use salesgen_core::clock::Clock;
use salesgen_core::record::SaleRecord;
use salesgen_core::rng::DeterministicRng;
use uuid::Uuid;

use super::catalog::Catalog;
use super::date_range::SaleDateRange;

/// Smallest quantity of a generated sale.
pub const MIN_QUANTITY: u32 = 1;
/// Largest quantity of a generated sale.
pub const MAX_QUANTITY: u32 = 10;

/// Produces `SaleRecord`s from a catalog, a date range, a clock and an RNG.
///
/// Each record draws, in order: product, location, quantity, unit price
/// (in cents) and a sale date fraction.
pub struct SaleGenerator {
    catalog: Catalog,
    date_range: SaleDateRange,
    clock: Arc<dyn Clock>,
    rng: Box<dyn DeterministicRng>,
}

impl SaleGenerator {
    /// Creates a new generator.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        date_range: SaleDateRange,
        clock: Arc<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        Self {
            catalog,
            date_range,
            clock,
            rng,
        }
    }

    /// The catalog records are drawn from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Generates one record.
    pub fn next_record(&mut self) -> SaleRecord {
        let product_index = self.pick(self.catalog.products().len());
        let location_index = self.pick(self.catalog.locations().len());
        let product = &self.catalog.products()[product_index];
        let location = &self.catalog.locations()[location_index];

        let quantity = self
            .rng
            .next_u32_range(MIN_QUANTITY, MAX_QUANTITY)
            .clamp(MIN_QUANTITY, MAX_QUANTITY);

        // Validated catalogs always have a band; fall back to the base price.
        let unit_price = match product.price_band() {
            Some(band) => {
                let cents = self
                    .rng
                    .next_u32_range(band.min_cents, band.max_cents)
                    .clamp(band.min_cents, band.max_cents);
                Decimal::new(i64::from(cents), 2)
            }
            None => product.base_price,
        };
        let total_amount = (unit_price * Decimal::from(quantity))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        SaleRecord {
            id: Uuid::new_v4(),
            product: product.name.clone(),
            category: product.category.clone(),
            quantity: i32::try_from(quantity).unwrap_or(i32::MAX),
            unit_price,
            total_amount,
            location: location.clone(),
            sale_date: self.date_range.sample(self.rng.next_f64()),
            created_at: self.clock.now(),
        }
    }

    /// Draws an index into a non-empty list of `len` items.
    fn pick(&mut self, len: usize) -> usize {
        let max = u32::try_from(len.saturating_sub(1)).unwrap_or(u32::MAX);
        self.rng.next_u32_range(0, max) as usize % len
    }
}

impl Iterator for SaleGenerator {
    type Item = SaleRecord;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_record())
    }
}
