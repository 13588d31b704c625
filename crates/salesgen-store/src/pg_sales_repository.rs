//! `PostgreSQL` implementation of the sales collection traits.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgExecutor, PgPool};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use salesgen_core::analytics::{CategorySales, MonthlySales, ProductMonthSummary};
use salesgen_core::error::{StoreError, WriteError};
use salesgen_core::record::SaleRecord;
use salesgen_core::repository::{
    IndexedField, InsertManyResult, InsertOptions, SalesCollection, SalesWriter,
};

use crate::{queries, schema};

/// PostgreSQL-backed sales collection.
#[derive(Debug, Clone)]
pub struct PgSalesRepository {
    pool: PgPool,
}

impl PgSalesRepository {
    /// Creates a new `PgSalesRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn infrastructure(err: sqlx::Error) -> StoreError {
    StoreError::Infrastructure(err.to_string())
}

/// Column-wise view of a batch, bound as the `UNNEST` arrays.
#[derive(Default)]
struct SaleColumns {
    ids: Vec<Uuid>,
    products: Vec<String>,
    categories: Vec<String>,
    quantities: Vec<i32>,
    unit_prices: Vec<Decimal>,
    total_amounts: Vec<Decimal>,
    locations: Vec<String>,
    sale_dates: Vec<DateTime<Utc>>,
    created_ats: Vec<DateTime<Utc>>,
}

impl SaleColumns {
    fn from_records(records: &[SaleRecord]) -> Self {
        let mut columns = Self::default();
        for record in records {
            columns.ids.push(record.id);
            columns.products.push(record.product.clone());
            columns.categories.push(record.category.clone());
            columns.quantities.push(record.quantity);
            columns.unit_prices.push(record.unit_price);
            columns.total_amounts.push(record.total_amount);
            columns.locations.push(record.location.clone());
            columns.sale_dates.push(record.sale_date);
            columns.created_ats.push(record.created_at);
        }
        columns
    }
}

/// Inserts `records` in one statement, skipping ids that already exist.
/// Returns the ids that were inserted.
async fn insert_batch<'e>(
    executor: impl PgExecutor<'e>,
    records: &[SaleRecord],
) -> Result<Vec<Uuid>, sqlx::Error> {
    let columns = SaleColumns::from_records(records);
    sqlx::query_scalar::<_, Uuid>(queries::INSERT_SALES)
        .bind(columns.ids)
        .bind(columns.products)
        .bind(columns.categories)
        .bind(columns.quantities)
        .bind(columns.unit_prices)
        .bind(columns.total_amounts)
        .bind(columns.locations)
        .bind(columns.sale_dates)
        .bind(columns.created_ats)
        .fetch_all(executor)
        .await
}

/// Positions of the records whose id was not inserted. A repeated id within
/// the batch is only credited once.
fn rejected(records: &[SaleRecord], inserted: &[Uuid]) -> Vec<WriteError> {
    let mut remaining: HashSet<Uuid> = inserted.iter().copied().collect();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| !remaining.remove(&record.id))
        .map(|(index, record)| WriteError {
            index,
            message: format!("duplicate key: a sale with id {} already exists", record.id),
        })
        .collect()
}

impl PgSalesRepository {
    async fn insert_unordered(
        &self,
        records: &[SaleRecord],
    ) -> Result<InsertManyResult, StoreError> {
        let inserted = insert_batch(&self.pool, records)
            .await
            .map_err(infrastructure)?;
        let write_errors = rejected(records, &inserted);

        if write_errors.is_empty() {
            Ok(InsertManyResult {
                inserted_count: inserted.len() as u64,
            })
        } else {
            warn!(
                inserted = inserted.len(),
                rejected = write_errors.len(),
                "unordered bulk write partially failed"
            );
            Err(StoreError::BulkWrite {
                inserted_count: inserted.len() as u64,
                write_errors,
            })
        }
    }

    /// Everything before the first rejected record is inserted; nothing
    /// after it is.
    async fn insert_ordered(&self, records: &[SaleRecord]) -> Result<InsertManyResult, StoreError> {
        let mut tx = self.pool.begin().await.map_err(infrastructure)?;
        let inserted = insert_batch(&mut *tx, records)
            .await
            .map_err(infrastructure)?;
        let mut write_errors = rejected(records, &inserted);

        let Some(first) = write_errors.first().cloned() else {
            tx.commit().await.map_err(infrastructure)?;
            return Ok(InsertManyResult {
                inserted_count: inserted.len() as u64,
            });
        };
        tx.rollback().await.map_err(infrastructure)?;

        let prefix = &records[..first.index];
        let inserted = if prefix.is_empty() {
            Vec::new()
        } else {
            insert_batch(&self.pool, prefix)
                .await
                .map_err(infrastructure)?
        };
        write_errors = rejected(prefix, &inserted);
        write_errors.push(first);

        warn!(
            inserted = inserted.len(),
            stopped_at = write_errors.last().map_or(0, |e| e.index),
            "ordered bulk write stopped at first failure"
        );
        Err(StoreError::BulkWrite {
            inserted_count: inserted.len() as u64,
            write_errors,
        })
    }
}

#[async_trait]
impl SalesWriter for PgSalesRepository {
    #[instrument(skip(self, records), fields(batch_len = records.len(), ordered = options.ordered))]
    async fn insert_many(
        &self,
        records: &[SaleRecord],
        options: InsertOptions,
    ) -> Result<InsertManyResult, StoreError> {
        if records.is_empty() {
            return Ok(InsertManyResult { inserted_count: 0 });
        }
        if options.ordered {
            self.insert_ordered(records).await
        } else {
            self.insert_unordered(records).await
        }
    }
}

#[derive(Debug, FromRow)]
struct SaleRow {
    id: Uuid,
    product: String,
    category: String,
    quantity: i32,
    unit_price: Decimal,
    total_amount: Decimal,
    location: String,
    sale_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<SaleRow> for SaleRecord {
    fn from(row: SaleRow) -> Self {
        Self {
            id: row.id,
            product: row.product,
            category: row.category,
            quantity: row.quantity,
            unit_price: row.unit_price,
            total_amount: row.total_amount,
            location: row.location,
            sale_date: row.sale_date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct CategorySalesRow {
    category: String,
    total_sales: Decimal,
    average_quantity: Decimal,
    count: i64,
}

#[derive(Debug, FromRow)]
struct MonthlySalesRow {
    year: i32,
    month: i32,
    total_sales: Decimal,
    count: i64,
}

#[derive(Debug, FromRow)]
struct ProductMonthRow {
    item: String,
    year: i32,
    month: i32,
    total_quantity: i64,
    total_amount: Decimal,
}

#[async_trait]
impl SalesCollection for PgSalesRepository {
    #[instrument(skip(self))]
    async fn create_index(&self, field: IndexedField) -> Result<(), StoreError> {
        sqlx::query(schema::create_index_sql(field))
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        info!(%field, index = schema::index_name(field), "index ready");
        Ok(())
    }

    async fn count_documents(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar(queries::COUNT_SALES)
            .fetch_one(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn find_one(&self) -> Result<Option<SaleRecord>, StoreError> {
        let row: Option<SaleRow> = sqlx::query_as(queries::FIND_ONE_SALE)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(row.map(SaleRecord::from))
    }

    #[instrument(skip(self))]
    async fn delete_many(&self) -> Result<u64, StoreError> {
        let result = sqlx::query(queries::DELETE_ALL_SALES)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(result.rows_affected())
    }

    async fn sales_by_category(&self) -> Result<Vec<CategorySales>, StoreError> {
        let rows: Vec<CategorySalesRow> = sqlx::query_as(queries::SALES_BY_CATEGORY)
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(rows
            .into_iter()
            .map(|row| CategorySales {
                category: row.category,
                total_sales: row.total_sales,
                average_quantity: row.average_quantity,
                count: row.count,
            })
            .collect())
    }

    async fn monthly_sales(&self) -> Result<Vec<MonthlySales>, StoreError> {
        let rows: Vec<MonthlySalesRow> = sqlx::query_as(queries::MONTHLY_SALES)
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(rows
            .into_iter()
            .map(|row| MonthlySales {
                year: row.year,
                month: row.month,
                total_sales: row.total_sales,
                count: row.count,
            })
            .collect())
    }

    async fn product_monthly_summary(&self) -> Result<Vec<ProductMonthSummary>, StoreError> {
        let rows: Vec<ProductMonthRow> = sqlx::query_as(queries::PRODUCT_MONTHLY_SUMMARY)
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(rows
            .into_iter()
            .map(|row| ProductMonthSummary {
                item: row.item,
                year: row.year,
                month: row.month,
                total_quantity: row.total_quantity,
                total_amount: row.total_amount,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record(id: Uuid) -> SaleRecord {
        let at = Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap();
        SaleRecord {
            id,
            product: "Sneakers".to_owned(),
            category: "Footwear".to_owned(),
            quantity: 1,
            unit_price: Decimal::new(8_900, 2),
            total_amount: Decimal::new(8_900, 2),
            location: "Phoenix".to_owned(),
            sale_date: at,
            created_at: at,
        }
    }

    #[test]
    fn test_rejected_lists_missing_ids_by_position() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let records = vec![record(a), record(b), record(c)];

        let errors = rejected(&records, &[c, a]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].index, 1);
        assert!(errors[0].message.contains(&b.to_string()));
    }

    #[test]
    fn test_rejected_credits_repeated_id_once() {
        let a = Uuid::new_v4();
        let records = vec![record(a), record(a)];

        let errors = rejected(&records, &[a]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].index, 1);
    }

    #[test]
    fn test_columns_preserve_record_order() {
        let ids = [Uuid::new_v4(), Uuid::new_v4()];
        let records: Vec<_> = ids.iter().copied().map(record).collect();

        let columns = SaleColumns::from_records(&records);

        assert_eq!(columns.ids, ids);
        assert_eq!(columns.quantities, vec![1, 1]);
        assert_eq!(columns.locations.len(), 2);
    }
}
