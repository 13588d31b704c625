//! PostgreSQL-backed sales collection.
//!
//! Implements `SalesWriter` and `SalesCollection` over a `sales` table.
//! Bulk writes are a single `UNNEST` insert per batch; the analysis
//! queries are static SQL evaluated by the server.

pub mod pg_sales_repository;
pub mod queries;
pub mod schema;

pub use pg_sales_repository::PgSalesRepository;
