//! Domain and store error types.

use thiserror::Error;

/// A single record that the store refused during a bulk write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteError {
    /// Position of the failed record within the submitted batch.
    pub index: usize,
    /// Store-provided reason.
    pub message: String,
}

/// Errors raised at the store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Some records of a bulk write were rejected. The rest were applied
    /// (unordered) or everything before the first failure was (ordered).
    #[error("bulk write failed: {inserted_count} inserted, {} rejected", write_errors.len())]
    BulkWrite {
        /// Number of records the store did persist.
        inserted_count: u64,
        /// Per-record failures.
        write_errors: Vec<WriteError>,
    },

    /// Connection, query, or decoding failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid configuration or input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A batch submission failed during a load. Batches before
    /// `batch_number` are durable; nothing after it was attempted.
    #[error("batch {batch_number} failed after {records_durable} records were written: {source}")]
    BatchWriteFailure {
        /// 1-based number of the failed batch.
        batch_number: u64,
        /// Records durably written by earlier batches.
        records_durable: u64,
        /// The underlying store error.
        #[source]
        source: StoreError,
    },

    /// A setup, verification, or analysis call against the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
