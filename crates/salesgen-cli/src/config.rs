//! Seeder configuration, read from environment variables.

use std::str::FromStr;

use salesgen_core::error::DomainError;
use salesgen_seeding::application::loader::{DEFAULT_BATCH_SIZE, DEFAULT_TOTAL_RECORDS, LoadPlan};

use crate::error::AppError;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(AppError::Config(format!(
                "SALESGEN_LOG_FORMAT must be `text` or `json`, got `{other}`"
            ))),
        }
    }
}

/// Everything the binary needs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Records to generate.
    pub total_records: u64,
    /// Records per bulk write.
    pub batch_size: usize,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Connection pool size.
    pub max_connections: u32,
    /// Delete existing records before seeding.
    pub reset: bool,
    /// Skip the analysis queries after loading.
    pub skip_analysis: bool,
    /// Log output format.
    pub log_format: LogFormat,
}

impl SeedConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is unset or a variable
    /// fails to parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is unset or a variable
    /// fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("DATABASE_URL environment variable must be set".to_owned())
            })?;

        let batch_size = parse_or(&lookup, "SALESGEN_BATCH_SIZE", DEFAULT_BATCH_SIZE)?;
        if batch_size == 0 {
            return Err(AppError::Config(
                "SALESGEN_BATCH_SIZE must be at least 1".to_owned(),
            ));
        }

        Ok(Self {
            database_url,
            total_records: parse_or(&lookup, "SALESGEN_TOTAL_RECORDS", DEFAULT_TOTAL_RECORDS)?,
            batch_size,
            seed: lookup("SALESGEN_SEED")
                .map(|raw| parse_value::<u64>("SALESGEN_SEED", &raw))
                .transpose()?,
            max_connections: parse_or(&lookup, "SALESGEN_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            reset: parse_flag(&lookup, "SALESGEN_RESET")?,
            skip_analysis: parse_flag(&lookup, "SALESGEN_SKIP_ANALYSIS")?,
            log_format: lookup("SALESGEN_LOG_FORMAT")
                .map(|raw| raw.parse::<LogFormat>())
                .transpose()?
                .unwrap_or_default(),
        })
    }

    /// The load plan this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the batch size is zero.
    pub fn load_plan(&self) -> Result<LoadPlan, DomainError> {
        LoadPlan::new(self.total_records, self.batch_size)
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .replace('_', "")
        .parse()
        .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}")))
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool, AppError> {
    let Some(raw) = lookup(key) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "{key} must be a boolean, got `{other}`"
        ))),
    }
}
