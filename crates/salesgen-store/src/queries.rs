//! Static SQL for bulk writes, lookups, and the analysis queries.

/// Bulk insert of one batch. Rows whose `id` already exists are skipped;
/// the ids of rows actually inserted are returned.
pub const INSERT_SALES: &str = r"
INSERT INTO sales (
    id, product, category, quantity, unit_price, total_amount, location, sale_date, created_at
)
SELECT * FROM UNNEST(
    $1::uuid[], $2::text[], $3::text[], $4::int4[], $5::numeric[], $6::numeric[],
    $7::text[], $8::timestamptz[], $9::timestamptz[]
)
ON CONFLICT (id) DO NOTHING
RETURNING id
";

/// Number of stored sales.
pub const COUNT_SALES: &str = "SELECT COUNT(*) FROM sales";

/// Any single stored sale.
pub const FIND_ONE_SALE: &str = r"
SELECT id, product, category, quantity, unit_price, total_amount, location, sale_date, created_at
FROM sales
LIMIT 1
";

/// Remove every stored sale.
pub const DELETE_ALL_SALES: &str = "DELETE FROM sales";

/// Revenue, mean quantity and count per category, highest revenue first.
pub const SALES_BY_CATEGORY: &str = r"
SELECT
    category,
    SUM(total_amount) AS total_sales,
    AVG(quantity)     AS average_quantity,
    COUNT(*)          AS count
FROM sales
GROUP BY category
ORDER BY total_sales DESC, category
";

/// Revenue and count per calendar month (UTC), chronological.
pub const MONTHLY_SALES: &str = r"
SELECT
    EXTRACT(YEAR FROM sale_date AT TIME ZONE 'UTC')::int4  AS year,
    EXTRACT(MONTH FROM sale_date AT TIME ZONE 'UTC')::int4 AS month,
    SUM(total_amount) AS total_sales,
    COUNT(*)          AS count
FROM sales
GROUP BY 1, 2
ORDER BY 1, 2
";

/// Quantity and revenue per product per calendar month (UTC), sorted by
/// year, month, product.
pub const PRODUCT_MONTHLY_SUMMARY: &str = r"
SELECT
    product AS item,
    EXTRACT(YEAR FROM sale_date AT TIME ZONE 'UTC')::int4  AS year,
    EXTRACT(MONTH FROM sale_date AT TIME ZONE 'UTC')::int4 AS month,
    SUM(quantity)::int8 AS total_quantity,
    SUM(total_amount)   AS total_amount
FROM sales
GROUP BY 1, 2, 3
ORDER BY 2, 3, 1
";
