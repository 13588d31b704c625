//! Inclusive range that sale dates are drawn from.

use chrono::{DateTime, Duration, TimeZone, Utc};
use salesgen_core::error::DomainError;

/// Inclusive `[start, end]` window for generated `sale_date` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleDateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SaleDateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::Validation(format!(
                "sale date range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First instant of the range.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Last instant of the range.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Maps `fraction` in `[0, 1)` onto the range at millisecond resolution.
    /// Out-of-range fractions are clamped, so the result is always inside.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn sample(&self, fraction: f64) -> DateTime<Utc> {
        let span_ms = (self.end - self.start).num_milliseconds();
        let offset_ms = (fraction.clamp(0.0, 1.0) * span_ms as f64).floor() as i64;
        self.start + Duration::milliseconds(offset_ms.clamp(0, span_ms))
    }
}

impl Default for SaleDateRange {
    /// 2023-01-01T00:00:00Z through 2023-12-31T00:00:00Z.
    fn default() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single().unwrap_or_default(),
            end: Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).single().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> SaleDateRange {
        SaleDateRange::default()
    }

    #[test]
    fn test_default_covers_2023() {
        let range = range();
        assert_eq!(range.start(), Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end(), Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_sample_endpoints() {
        let range = range();
        assert_eq!(range.sample(0.0), range.start());
        assert_eq!(range.sample(1.0), range.end());
        assert!(range.sample(0.999_999_999) <= range.end());
    }

    #[test]
    fn test_sample_midpoint() {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2023, 1, 3, 0, 0, 0).unwrap();
        let range = SaleDateRange::new(start, end).unwrap();

        assert_eq!(range.sample(0.5), Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_out_of_range_fraction_is_clamped() {
        let range = range();
        assert_eq!(range.sample(-3.0), range.start());
        assert_eq!(range.sample(7.5), range.end());
    }

    #[test]
    fn test_single_instant_range() {
        let at = Utc.with_ymd_and_hms(2023, 7, 4, 12, 0, 0).unwrap();
        let range = SaleDateRange::new(at, at).unwrap();
        assert_eq!(range.sample(0.42), at);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = SaleDateRange::new(range().end(), range().start());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
