//! Domain model: catalog, sale date range, and the record generator.

pub mod catalog;
pub mod date_range;
pub mod generator;
