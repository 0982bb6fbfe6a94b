//! Shared helpers for backend tests: logging initialization and unique
//! test-data generation.

pub mod logging;
pub mod unique_helpers;
