//! Sales Seeder Core — shared domain abstractions.
//!
//! This crate defines the record type, the store traits, and the clock and
//! RNG abstractions that the seeding and storage crates depend on. It
//! contains no infrastructure code.

pub mod analytics;
pub mod clock;
pub mod error;
pub mod progress;
pub mod record;
pub mod repository;
pub mod rng;
