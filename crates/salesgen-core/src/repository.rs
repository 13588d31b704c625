//! Sales collection abstractions.

use std::fmt;

use async_trait::async_trait;

use crate::analytics::{CategorySales, MonthlySales, ProductMonthSummary};
use crate::error::StoreError;
use crate::record::SaleRecord;

/// Options for a bulk write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOptions {
    /// When `false`, the store keeps applying the remaining records after a
    /// failure and reports all failures together. When `true`, it stops at
    /// the first failure.
    pub ordered: bool,
}

impl InsertOptions {
    /// Unordered write: partial failures do not abort the batch.
    pub const UNORDERED: Self = Self { ordered: false };

    /// Ordered write: the first failure stops the batch.
    pub const ORDERED: Self = Self { ordered: true };
}

/// Outcome of a fully successful bulk write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertManyResult {
    /// Number of records persisted.
    pub inserted_count: u64,
}

/// Fields the collection can be indexed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexedField {
    /// `saleDate`
    SaleDate,
    /// `product`
    Product,
    /// `category`
    Category,
    /// `location`
    Location,
}

impl IndexedField {
    /// Every indexable field, in the order a seeding run creates them.
    pub const ALL: [Self; 4] = [Self::SaleDate, Self::Product, Self::Category, Self::Location];

    /// The document field name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SaleDate => "saleDate",
            Self::Product => "product",
            Self::Category => "category",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for IndexedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bulk-write side of the sales collection. This is all the batch loader
/// needs.
#[async_trait]
pub trait SalesWriter: Send + Sync {
    /// Persist `records` in one bulk-write call.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::BulkWrite` if any record was rejected and
    /// `StoreError::Infrastructure` if the call itself failed.
    async fn insert_many(
        &self,
        records: &[SaleRecord],
        options: InsertOptions,
    ) -> Result<InsertManyResult, StoreError>;
}

/// Full sales collection: setup, verification, and analysis on top of
/// bulk writes.
#[async_trait]
pub trait SalesCollection: SalesWriter {
    /// Create an ascending index on `field` if it does not already exist.
    async fn create_index(&self, field: IndexedField) -> Result<(), StoreError>;

    /// Number of records in the collection.
    async fn count_documents(&self) -> Result<u64, StoreError>;

    /// Any one record, if the collection is non-empty.
    async fn find_one(&self) -> Result<Option<SaleRecord>, StoreError>;

    /// Remove every record; returns how many were removed.
    async fn delete_many(&self) -> Result<u64, StoreError>;

    /// Sales grouped by category, highest `total_sales` first.
    async fn sales_by_category(&self) -> Result<Vec<CategorySales>, StoreError>;

    /// Sales grouped by calendar month of `sale_date`, chronological.
    async fn monthly_sales(&self) -> Result<Vec<MonthlySales>, StoreError>;

    /// Quantity and amount per product per month, sorted by year, month,
    /// then product.
    async fn product_monthly_summary(&self) -> Result<Vec<ProductMonthSummary>, StoreError>;
}
