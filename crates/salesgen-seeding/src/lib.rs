//! Sales Seeder — record generation and batched loading.
//!
//! Generates synthetic sale records from a product catalog and writes them
//! to a sales collection in fixed-size unordered batches, reporting
//! progress after every batch.

pub mod application;
pub mod domain;
