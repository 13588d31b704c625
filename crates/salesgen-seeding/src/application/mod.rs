//! Application layer: the batch loader and its logging observer.

pub mod loader;
pub mod progress;
