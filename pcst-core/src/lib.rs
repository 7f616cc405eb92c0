//! Prize-collecting Steiner tree solver.
//!
//! Given an undirected graph with a non-negative cost on every relationship
//! and a non-negative prize on every node, [`PcstFast`] selects a single tree
//! whose collected prizes outweigh the cost of connecting them. The solver
//! grows moats around clusters until edges become tight, then strongly
//! prunes the resulting candidate tree.
//!
//! ```
//! use pcst_core::{EdgeListGraph, PcstBuilder};
//!
//! let graph = EdgeListGraph::try_new(3, [(0, 1, 1.0), (1, 2, 50.0)])?;
//! let solver = PcstBuilder::new().build()?;
//! let result = solver.compute_simple(&graph, &[4.0, 4.0, 1.0])?;
//!
//! assert_eq!(result.effective_node_count(), 2);
//! assert_eq!(result.net_value(), 7.0);
//! # Ok::<(), pcst_core::PcstError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod graph;
mod memory;
mod pcst;
mod progress;
mod result;
mod termination;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::PcstBuilder,
    error::{PcstError, PcstErrorCode, Result},
    graph::{EdgeListGraph, WeightedGraph, prizes_from_slice},
    memory::{estimate_peak_bytes, format_bytes},
    pcst::{DEFAULT_TIGHTNESS_EPSILON, GrowthStats, MAX_NODE_COUNT, PcstFast},
    progress::{NoopProgressTracker, ProgressTracker, TracingProgressTracker},
    result::{PriceSteinerTreeResult, TreeParent},
    termination::{AtomicTerminationFlag, RunningForever, TerminationFlag},
};
