//! The synthetic sale record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One generated sale. Immutable once created.
///
/// Serializes with camelCase keys, matching the document shape the
/// collection exposes to analysis tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// Client-assigned identifier; correlates per-record bulk-write results.
    pub id: Uuid,
    /// Product name from the catalog.
    pub product: String,
    /// Category inherited from the catalog entry.
    pub category: String,
    /// Units sold, in `[1, 10]`.
    pub quantity: i32,
    /// Price per unit, two decimal places.
    pub unit_price: Decimal,
    /// `quantity * unit_price`, rounded to two decimal places.
    pub total_amount: Decimal,
    /// Store location name.
    pub location: String,
    /// When the sale happened.
    pub sale_date: DateTime<Utc>,
    /// When the record was generated.
    pub created_at: DateTime<Utc>,
}
