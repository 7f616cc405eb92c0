//! Benchmark parameter types.

use std::fmt;

/// Parameters for a solver benchmark run.
#[derive(Clone, Debug)]
pub struct SolveBenchParams {
    /// Number of nodes in the instance.
    pub node_count: usize,
    /// Random edges added per node on top of the spanning tree.
    pub extra_edges_per_node: usize,
}

impl fmt::Display for SolveBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},extra={}",
            self.node_count, self.extra_edges_per_node
        )
    }
}
