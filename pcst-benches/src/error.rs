//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark instances
//! so setup functions can propagate failures with `?` instead of using
//! `.expect()`.

use crate::graph::SyntheticError;
use pcst_core::PcstError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic instance generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The solver rejected its configuration or input.
    #[error("solver setup failed: {0}")]
    Solver(#[from] PcstError),
}
