//! Sales seeder entry point.

use std::sync::Arc;

use salesgen_cli::config::{LogFormat, SeedConfig};
use salesgen_cli::error::AppError;
use salesgen_cli::seed::{SeedOptions, run_seed};
use salesgen_cli::telemetry;
use salesgen_core::clock::{Clock, SystemClock};
use salesgen_core::rng::{DeterministicRng, SeededRng};
use salesgen_seeding::application::progress::LoggingProgress;
use salesgen_seeding::domain::catalog::Catalog;
use salesgen_seeding::domain::date_range::SaleDateRange;
use salesgen_seeding::domain::generator::SaleGenerator;
use salesgen_store::PgSalesRepository;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = SeedConfig::from_env();
    telemetry::init(config.as_ref().map_or(LogFormat::default(), |c| c.log_format));

    if let Err(err) = run(config).await {
        tracing::error!(error = %err, "Error");
        return Err(err);
    }
    Ok(())
}

async fn run(config: Result<SeedConfig, AppError>) -> Result<(), AppError> {
    let config = config?;
    let plan = config.load_plan()?;

    tracing::info!(
        total_records = plan.total_records(),
        batch_size = plan.batch_size(),
        "Starting sales seeder"
    );

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let collection = PgSalesRepository::new(pool);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rng: Box<dyn DeterministicRng> = match config.seed {
        Some(seed) => Box::new(SeededRng::from_seed(seed)),
        None => Box::new(SeededRng::from_entropy()),
    };
    let mut generator = SaleGenerator::new(
        Catalog::default(),
        SaleDateRange::default(),
        Arc::clone(&clock),
        rng,
    );

    let options = SeedOptions {
        reset: config.reset,
        skip_analysis: config.skip_analysis,
    };
    run_seed(
        &plan,
        options,
        &collection,
        &mut generator,
        clock.as_ref(),
        &LoggingProgress,
    )
    .await?;

    Ok(())
}
