//! Result rows of the analysis queries.
//!
//! The queries themselves are evaluated by the store; these are the shapes
//! their output is decoded into.

use rust_decimal::Decimal;
use serde::Serialize;

/// Totals for one product category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    /// The category name.
    pub category: String,
    /// Sum of `total_amount`.
    pub total_sales: Decimal,
    /// Mean `quantity`.
    pub average_quantity: Decimal,
    /// Number of records.
    pub count: i64,
}

/// Totals for one calendar month of `sale_date`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: i32,
    /// Sum of `total_amount`.
    pub total_sales: Decimal,
    /// Number of records.
    pub count: i64,
}

/// Totals for one product in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMonthSummary {
    /// Product name.
    pub item: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: i32,
    /// Sum of `quantity`.
    pub total_quantity: i64,
    /// Sum of `total_amount`.
    pub total_amount: Decimal,
}
