//! The seeding run: reset, indexes, load, verification and analysis.

use salesgen_core::analytics::{CategorySales, MonthlySales, ProductMonthSummary};
use salesgen_core::clock::Clock;
use salesgen_core::error::DomainError;
use salesgen_core::progress::{LoadSummary, ProgressObserver};
use salesgen_core::record::SaleRecord;
use salesgen_core::repository::{IndexedField, SalesCollection};
use salesgen_seeding::application::loader::{LoadPlan, run_load};
use salesgen_seeding::application::progress::group_thousands;
use salesgen_seeding::domain::generator::SaleGenerator;
use tracing::{info, instrument, warn};

/// Steps of a run besides the load itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedOptions {
    /// Delete existing records first.
    pub reset: bool,
    /// Skip the analysis queries.
    pub skip_analysis: bool,
}

/// Output of the analysis queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Sales by category, highest revenue first.
    pub by_category: Vec<CategorySales>,
    /// Monthly sales trend.
    pub monthly: Vec<MonthlySales>,
    /// Per product, per month totals.
    pub product_monthly: Vec<ProductMonthSummary>,
}

/// What a completed run observed.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    /// Records removed by the reset step.
    pub removed: u64,
    /// Figures from the load.
    pub load: LoadSummary,
    /// Records in the collection after loading.
    pub count: u64,
    /// One stored record, if any.
    pub sample: Option<SaleRecord>,
    /// Analysis results, unless skipped.
    pub analysis: Option<Analysis>,
}

/// Creates every index a seeded collection is queried by.
///
/// # Errors
///
/// Returns `DomainError::Store` if any index cannot be created.
pub async fn setup_indexes(collection: &dyn SalesCollection) -> Result<(), DomainError> {
    info!("Creating indexes...");
    for field in IndexedField::ALL {
        collection.create_index(field).await?;
    }
    info!("Indexes created");
    Ok(())
}

/// Logs and returns the record count and one sample record.
///
/// # Errors
///
/// Returns `DomainError::Store` if either lookup fails.
pub async fn verify(
    collection: &dyn SalesCollection,
) -> Result<(u64, Option<SaleRecord>), DomainError> {
    let count = collection.count_documents().await?;
    info!("Total documents in collection: {}", group_thousands(count));

    let sample = collection.find_one().await?;
    match &sample {
        Some(record) => match serde_json::to_string(record) {
            Ok(json) => info!("Sample document: {json}"),
            Err(e) => warn!(error = %e, "could not render sample document"),
        },
        None => info!("Sample document: none"),
    }

    Ok((count, sample))
}

/// Runs and logs the three analysis queries.
///
/// # Errors
///
/// Returns `DomainError::Store` if a query fails.
pub async fn analyze(collection: &dyn SalesCollection) -> Result<Analysis, DomainError> {
    let by_category = collection.sales_by_category().await?;
    info!("Sales by Category:");
    for row in &by_category {
        info!(
            "  {}: totalSales={} averageQuantity={:.2} count={}",
            row.category, row.total_sales, row.average_quantity, row.count
        );
    }

    let monthly = collection.monthly_sales().await?;
    info!("Monthly Sales Trend:");
    for row in &monthly {
        info!(
            "  {}-{:02}: totalSales={} count={}",
            row.year, row.month, row.total_sales, row.count
        );
    }

    let product_monthly = collection.product_monthly_summary().await?;
    info!("Product Monthly Summary:");
    for row in &product_monthly {
        info!(
            "  {}-{:02} {}: totalQuantity={} totalAmount={}",
            row.year, row.month, row.item, row.total_quantity, row.total_amount
        );
    }

    Ok(Analysis {
        by_category,
        monthly,
        product_monthly,
    })
}

/// Performs a full seeding run against `collection`.
///
/// # Errors
///
/// Returns `DomainError::BatchWriteFailure` if the load fails and
/// `DomainError::Store` if setup, verification or analysis fails.
#[instrument(skip_all, fields(total_records = plan.total_records()))]
pub async fn run_seed<C: SalesCollection>(
    plan: &LoadPlan,
    options: SeedOptions,
    collection: &C,
    generator: &mut SaleGenerator,
    clock: &dyn Clock,
    progress: &dyn ProgressObserver,
) -> Result<SeedReport, DomainError> {
    let removed = if options.reset {
        let removed = collection.delete_many().await?;
        info!("Removed {} existing documents", group_thousands(removed));
        removed
    } else {
        0
    };

    setup_indexes(collection).await?;

    let load = run_load(plan, generator, collection, clock, progress).await?;

    let (count, sample) = verify(collection).await?;

    let analysis = if options.skip_analysis {
        None
    } else {
        Some(analyze(collection).await?)
    };

    Ok(SeedReport {
        removed,
        load,
        count,
        sample,
        analysis,
    })
}
