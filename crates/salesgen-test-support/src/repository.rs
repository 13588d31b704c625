//! Test writers — mock `SalesWriter` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use salesgen_core::error::{StoreError, WriteError};
use salesgen_core::record::SaleRecord;
use salesgen_core::repository::{InsertManyResult, InsertOptions, SalesWriter};

/// A writer that records every `insert_many` call and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingSalesWriter {
    calls: Mutex<Vec<(Vec<SaleRecord>, InsertOptions)>>,
}

impl RecordingSalesWriter {
    /// Create a writer with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every batch written, with its options.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<(Vec<SaleRecord>, InsertOptions)> {
        self.calls.lock().unwrap().clone()
    }

    /// Sizes of the batches written, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(records, _)| records.len())
            .collect()
    }
}

#[async_trait]
impl SalesWriter for RecordingSalesWriter {
    async fn insert_many(
        &self,
        records: &[SaleRecord],
        options: InsertOptions,
    ) -> Result<InsertManyResult, StoreError> {
        self.calls.lock().unwrap().push((records.to_vec(), options));
        Ok(InsertManyResult {
            inserted_count: records.len() as u64,
        })
    }
}

/// A writer that succeeds until the `fail_on`-th call (1-based), which
/// returns an infrastructure error. Later calls succeed again. Only the
/// successful calls count as durably written.
#[derive(Debug)]
pub struct FailingOnBatchWriter {
    fail_on: usize,
    attempts: Mutex<usize>,
    durable: Mutex<Vec<Vec<SaleRecord>>>,
}

impl FailingOnBatchWriter {
    /// Create a writer that fails its `fail_on`-th call.
    #[must_use]
    pub fn new(fail_on: usize) -> Self {
        Self {
            fail_on,
            attempts: Mutex::new(0),
            durable: Mutex::new(Vec::new()),
        }
    }

    /// Number of `insert_many` calls received, failed one included.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    /// Batches that were accepted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn durable_batches(&self) -> Vec<Vec<SaleRecord>> {
        self.durable.lock().unwrap().clone()
    }
}

#[async_trait]
impl SalesWriter for FailingOnBatchWriter {
    async fn insert_many(
        &self,
        records: &[SaleRecord],
        _options: InsertOptions,
    ) -> Result<InsertManyResult, StoreError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };

        if attempt == self.fail_on {
            return Err(StoreError::Infrastructure("connection reset by peer".into()));
        }

        self.durable.lock().unwrap().push(records.to_vec());
        Ok(InsertManyResult {
            inserted_count: records.len() as u64,
        })
    }
}

/// A writer whose every call is a partial bulk-write failure: all records
/// but the first are reported as inserted. Useful for testing that partial
/// failures are surfaced rather than swallowed.
#[derive(Debug)]
pub struct FailingSalesWriter;

#[async_trait]
impl SalesWriter for FailingSalesWriter {
    async fn insert_many(
        &self,
        records: &[SaleRecord],
        _options: InsertOptions,
    ) -> Result<InsertManyResult, StoreError> {
        Err(StoreError::BulkWrite {
            inserted_count: records.len().saturating_sub(1) as u64,
            write_errors: vec![WriteError {
                index: 0,
                message: "duplicate key value violates unique constraint".into(),
            }],
        })
    }
}
