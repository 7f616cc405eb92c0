//! Shared test utilities used across the pcst crates.

pub mod ci;
pub mod tracing;
