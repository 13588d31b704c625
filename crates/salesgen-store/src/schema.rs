//! Index DDL for the sales table.
//!
//! The table itself is created by the migration in `migrations/`.

use salesgen_core::repository::IndexedField;

/// Name of the index on `field`.
#[must_use]
pub fn index_name(field: IndexedField) -> &'static str {
    match field {
        IndexedField::SaleDate => "idx_sales_sale_date",
        IndexedField::Product => "idx_sales_product",
        IndexedField::Category => "idx_sales_category",
        IndexedField::Location => "idx_sales_location",
    }
}

/// Idempotent DDL creating the ascending index on `field`.
#[must_use]
pub fn create_index_sql(field: IndexedField) -> &'static str {
    match field {
        IndexedField::SaleDate => {
            "CREATE INDEX IF NOT EXISTS idx_sales_sale_date ON sales (sale_date)"
        }
        IndexedField::Product => "CREATE INDEX IF NOT EXISTS idx_sales_product ON sales (product)",
        IndexedField::Category => {
            "CREATE INDEX IF NOT EXISTS idx_sales_category ON sales (category)"
        }
        IndexedField::Location => {
            "CREATE INDEX IF NOT EXISTS idx_sales_location ON sales (location)"
        }
    }
}
