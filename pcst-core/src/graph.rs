//! Graph abstraction consumed by the solver.
//!
//! The solver never owns the host graph. It reads node counts, degrees and
//! relationships through [`WeightedGraph`], which keeps the algorithm
//! independent of how the graph was loaded or projected.

use crate::error::{PcstError, Result};

/// Undirected graph with a scalar weight (the connection cost) on every
/// relationship.
///
/// Nodes are dense ids `0..node_count()`. Every relationship must be
/// reported from both of its endpoints; the solver reads each one from its
/// lower endpoint only.
///
/// # Examples
/// ```
/// use pcst_core::WeightedGraph;
///
/// struct Pair;
///
/// impl WeightedGraph for Pair {
///     fn node_count(&self) -> usize { 2 }
///     fn degree(&self, _node: usize) -> usize { 1 }
///     fn for_each_relationship(
///         &self,
///         node: usize,
///         consumer: &mut dyn FnMut(usize, usize, f64) -> bool,
///     ) {
///         consumer(node, 1 - node, 3.0);
///     }
/// }
///
/// assert_eq!(Pair.relationship_count(), 2);
/// assert_eq!(Pair.to_original_node_id(1), 1);
/// ```
pub trait WeightedGraph {
    /// Returns the number of nodes.
    fn node_count(&self) -> usize;

    /// Returns the number of relationships reported for `node`.
    fn degree(&self, node: usize) -> usize;

    /// Streams the relationships of `node` as `(source, target, weight)`
    /// until `consumer` returns `false`.
    fn for_each_relationship(
        &self,
        node: usize,
        consumer: &mut dyn FnMut(usize, usize, f64) -> bool,
    );

    /// Maps an internal node id back to the id used by the caller.
    fn to_original_node_id(&self, node: usize) -> u64 {
        node as u64
    }

    /// Total number of relationships reported across all nodes.
    fn relationship_count(&self) -> usize {
        (0..self.node_count()).map(|node| self.degree(node)).sum()
    }
}

/// Owned undirected graph stored as compressed adjacency lists.
///
/// # Examples
/// ```
/// use pcst_core::{EdgeListGraph, WeightedGraph};
///
/// let graph = EdgeListGraph::try_new(3, [(0, 1, 2.0), (1, 2, 4.5)])?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.degree(1), 2);
/// assert_eq!(graph.relationship_count(), 4);
/// # Ok::<(), pcst_core::PcstError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeListGraph {
    offsets: Vec<usize>,
    targets: Vec<usize>,
    weights: Vec<f64>,
    original_ids: Option<Vec<u64>>,
}

impl EdgeListGraph {
    /// Builds a graph over `node_count` nodes from undirected
    /// `(source, target, cost)` triples.
    ///
    /// # Errors
    /// Returns [`PcstError::InvalidNodeId`] when an endpoint is outside
    /// `0..node_count`, [`PcstError::NegativeCost`] for a negative cost and
    /// [`PcstError::NonFiniteCost`] for NaN or infinite costs.
    pub fn try_new<I>(node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let edges: Vec<(usize, usize, f64)> = edges.into_iter().collect();
        let mut offsets = vec![0_usize; node_count + 1];
        for &(source, target, cost) in &edges {
            for node in [source, target] {
                if node >= node_count {
                    return Err(PcstError::InvalidNodeId { node, node_count });
                }
            }
            validate_cost(source, target, cost)?;
            offsets[source + 1] += 1;
            offsets[target + 1] += 1;
        }
        for node in 0..node_count {
            offsets[node + 1] += offsets[node];
        }

        let total = offsets[node_count];
        let mut cursor = offsets.clone();
        let mut targets = vec![0_usize; total];
        let mut weights = vec![0.0_f64; total];
        for (source, target, cost) in edges {
            for (from, to) in [(source, target), (target, source)] {
                let slot = cursor[from];
                targets[slot] = to;
                weights[slot] = cost;
                cursor[from] += 1;
            }
        }

        Ok(Self {
            offsets,
            targets,
            weights,
            original_ids: None,
        })
    }

    /// Attaches caller-facing ids, one per node.
    ///
    /// # Errors
    /// Returns [`PcstError::OriginalIdCountMismatch`] when `ids` does not
    /// hold exactly one entry per node.
    pub fn with_original_ids(mut self, ids: Vec<u64>) -> Result<Self> {
        let node_count = self.node_count();
        if ids.len() != node_count {
            return Err(PcstError::OriginalIdCountMismatch {
                ids: ids.len(),
                node_count,
            });
        }
        self.original_ids = Some(ids);
        Ok(self)
    }

    fn neighbours(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.offsets[node]..self.offsets[node + 1];
        self.targets[range.clone()]
            .iter()
            .copied()
            .zip(self.weights[range].iter().copied())
    }
}

impl WeightedGraph for EdgeListGraph {
    fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    fn degree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    fn for_each_relationship(
        &self,
        node: usize,
        consumer: &mut dyn FnMut(usize, usize, f64) -> bool,
    ) {
        for (target, weight) in self.neighbours(node) {
            if !consumer(node, target, weight) {
                break;
            }
        }
    }

    fn to_original_node_id(&self, node: usize) -> u64 {
        self.original_ids
            .as_ref()
            .and_then(|ids| ids.get(node).copied())
            .unwrap_or(node as u64)
    }

    fn relationship_count(&self) -> usize {
        self.targets.len()
    }
}

/// Adapts a prize slice to the prize function accepted by
/// [`crate::PcstFast::compute`].
///
/// Nodes beyond the end of the slice receive no prize.
///
/// # Examples
/// ```
/// let prizes = [1.5, 0.0, 4.0];
/// let prize = pcst_core::prizes_from_slice(&prizes);
/// assert_eq!(prize(2), 4.0);
/// assert_eq!(prize(7), 0.0);
/// ```
pub fn prizes_from_slice(prizes: &[f64]) -> impl Fn(usize) -> f64 + '_ {
    |node| prizes.get(node).copied().unwrap_or(0.0)
}

pub(crate) fn validate_cost(node: usize, neighbor: usize, cost: f64) -> Result<()> {
    if !cost.is_finite() {
        return Err(PcstError::NonFiniteCost { node, neighbor });
    }
    if cost < 0.0 {
        return Err(PcstError::NegativeCost {
            node,
            neighbor,
            cost,
        });
    }
    Ok(())
}

pub(crate) fn validate_prize(node: usize, prize: f64) -> Result<()> {
    if !prize.is_finite() {
        return Err(PcstError::NonFinitePrize { node });
    }
    if prize < 0.0 {
        return Err(PcstError::NegativePrize { node, prize });
    }
    Ok(())
}
