//! Benchmark support crate for pcst.
//!
//! Provides seeded synthetic graph instances and parameter types used by the
//! Criterion benchmarks of the solver.

pub mod error;
pub mod graph;
pub mod params;
