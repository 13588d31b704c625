//! Sales Seeder — configuration, telemetry, and the seeding run.
//!
//! The `salesgen` binary wires these together: read configuration, set up
//! logging, connect to PostgreSQL, then create indexes, load synthetic
//! sales, verify the result and run the analysis queries.

pub mod config;
pub mod error;
pub mod seed;
pub mod telemetry;
