//! Explicit adjacency over the edges chosen during growth.

use tracing::debug;

use super::{edge_events::EdgeParts, inclusion::InclusionSet};
use crate::progress::ProgressTracker;

/// Undirected forest restricted to candidate nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Tree {
    adjacency: Vec<Vec<(usize, f64)>>,
    degrees: Vec<usize>,
}

impl Tree {
    pub(crate) const fn node_count(&self) -> usize {
        self.degrees.len()
    }

    pub(crate) fn neighbours(&self, node: usize) -> &[(usize, f64)] {
        &self.adjacency[node]
    }

    pub(crate) fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.degrees.iter().sum::<usize>() >> 1
    }
}

/// Builds the candidate forest from the tight edges recorded by growth.
///
/// An edge is kept only when both of its endpoints are candidates, so the
/// forest never references an excluded node.
pub(crate) fn create_tree(
    tree_edges: &[usize],
    edge_parts: &EdgeParts,
    inclusion: &InclusionSet,
    node_count: usize,
    progress: &mut dyn ProgressTracker,
) -> Tree {
    progress.begin_subtask("tree", tree_edges.len() as u64);
    let mut adjacency = vec![Vec::new(); node_count];
    let mut degrees = vec![0_usize; node_count];

    for &edge in tree_edges {
        let (source, target) = edge_parts.endpoints(edge);
        if inclusion.is_included(source) && inclusion.is_included(target) {
            let cost = edge_parts.cost(edge);
            adjacency[source].push((target, cost));
            adjacency[target].push((source, cost));
            degrees[source] += 1;
            degrees[target] += 1;
        }
        progress.log_progress(1);
    }

    let tree = Tree { adjacency, degrees };
    debug!(
        nodes = inclusion.count(),
        edges = tree.edge_count(),
        "candidate tree built"
    );
    progress.end_subtask("tree");
    tree
}
