//! Sales Seeder — application error types.

use salesgen_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the seeder binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Seeding, verification or analysis failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
