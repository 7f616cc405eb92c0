//! Prize-collecting Steiner tree solver.
//!
//! [`PcstFast`] validates its inputs, grows clusters until at most one is
//! still growing, turns the tight edges into a candidate tree and prunes the
//! subtrees that cost more than they collect.

mod cluster_activity;
mod cluster_events;
mod cluster_structure;
mod edge_events;
mod growth;
mod inclusion;
mod pairing_heap;
mod pruning;
mod tree;

use tracing::{info, instrument};

pub use self::growth::GrowthStats;
use self::{edge_events::EdgeParts, growth::GrowthPhase, pruning::StrongPruning};
use crate::{
    error::{PcstError, Result},
    graph::{WeightedGraph, prizes_from_slice, validate_cost, validate_prize},
    progress::{NoopProgressTracker, ProgressTracker},
    result::PriceSteinerTreeResult,
    termination::{RunningForever, TerminationFlag},
};

/// Largest graph the solver accepts. Growth allocates up to `2n - 1`
/// cluster ids, which must stay within a 32-bit id domain.
pub const MAX_NODE_COUNT: usize = 1 << 31;

/// Default relative tolerance for deciding that an edge is fully paid.
pub const DEFAULT_TIGHTNESS_EPSILON: f64 = 1e-6;

/// Configured solver. Build one with [`crate::PcstBuilder`] or use
/// [`PcstFast::default`].
///
/// # Examples
/// ```
/// use pcst_core::{EdgeListGraph, PcstFast, TreeParent};
///
/// let graph = EdgeListGraph::try_new(
///     4,
///     [(0, 1, 100.0), (1, 2, 10.0), (2, 3, 100.0)],
/// )?;
/// let result = PcstFast::default().compute_simple(&graph, &[20.0; 4])?;
///
/// assert_eq!(result.parent(0), TreeParent::Pruned);
/// assert_eq!(result.parent(3), TreeParent::Pruned);
/// assert_eq!(result.effective_node_count(), 2);
/// assert_eq!(result.total_cost(), 10.0);
/// # Ok::<(), pcst_core::PcstError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PcstFast {
    tightness_epsilon: f64,
}

impl Default for PcstFast {
    fn default() -> Self {
        Self {
            tightness_epsilon: DEFAULT_TIGHTNESS_EPSILON,
        }
    }
}

impl PcstFast {
    pub(crate) const fn new(tightness_epsilon: f64) -> Self {
        Self { tightness_epsilon }
    }

    /// Relative tolerance under which an edge counts as fully paid.
    #[must_use]
    pub const fn tightness_epsilon(&self) -> f64 {
        self.tightness_epsilon
    }

    /// Computes a tree over `graph` that trades collected prize against
    /// connection cost.
    ///
    /// `prizes` is queried once per node. `progress` is notified at phase
    /// boundaries and `termination` is polled between growth events; once it
    /// stops running, the partial state is pruned and returned with
    /// [`PriceSteinerTreeResult::was_cancelled`] set.
    ///
    /// # Errors
    /// Returns [`PcstError::CapacityExceeded`] for graphs larger than
    /// [`MAX_NODE_COUNT`], [`PcstError::NegativePrize`] or
    /// [`PcstError::NonFinitePrize`] for invalid prizes, and
    /// [`PcstError::InvalidNodeId`], [`PcstError::NegativeCost`] or
    /// [`PcstError::NonFiniteCost`] for invalid relationships. All checks run
    /// before growth starts.
    #[instrument(
        name = "pcst.compute",
        err,
        skip(self, graph, prizes, progress, termination),
        fields(
            nodes = graph.node_count(),
            epsilon = self.tightness_epsilon
        ),
    )]
    pub fn compute<G, F>(
        &self,
        graph: &G,
        prizes: F,
        progress: &mut dyn ProgressTracker,
        termination: &dyn TerminationFlag,
    ) -> Result<PriceSteinerTreeResult>
    where
        G: WeightedGraph + ?Sized,
        F: Fn(usize) -> f64,
    {
        let node_count = graph.node_count();
        if node_count > MAX_NODE_COUNT {
            return Err(PcstError::CapacityExceeded {
                node_count,
                max: MAX_NODE_COUNT as u64,
            });
        }
        let prizes = collect_prizes(node_count, prizes)?;
        let edge_parts = collect_edges(graph)?;

        let growth = GrowthPhase::new(
            edge_parts,
            &prizes,
            self.tightness_epsilon,
            progress,
            termination,
        )
        .grow();
        let candidates = tree::create_tree(
            &growth.tree_edges,
            &growth.edge_parts,
            &growth.inclusion,
            node_count,
            progress,
        );

        let mut pruning = StrongPruning::new(&candidates, &prizes, growth.inclusion);
        pruning.perform_pruning(progress);
        let pruned = pruning.result_tree();
        let result = PriceSteinerTreeResult::new(
            pruned.parents,
            pruned.costs,
            &prizes,
            growth.cancelled,
            growth.stats,
        );

        info!(
            nodes = node_count,
            kept = result.effective_node_count(),
            total_cost = result.total_cost(),
            net_value = result.net_value(),
            cancelled = result.was_cancelled(),
            "prize-collecting Steiner tree computed"
        );
        Ok(result)
    }

    /// Runs [`Self::compute`] with one prize per node, no progress reporting
    /// and no cancellation.
    ///
    /// # Errors
    /// Returns [`PcstError::PrizeCountMismatch`] when `prizes` does not hold
    /// exactly one entry per node, and any error of [`Self::compute`].
    pub fn compute_simple<G>(&self, graph: &G, prizes: &[f64]) -> Result<PriceSteinerTreeResult>
    where
        G: WeightedGraph + ?Sized,
    {
        let node_count = graph.node_count();
        if prizes.len() != node_count {
            return Err(PcstError::PrizeCountMismatch {
                prizes: prizes.len(),
                node_count,
            });
        }
        self.compute(
            graph,
            prizes_from_slice(prizes),
            &mut NoopProgressTracker,
            &RunningForever,
        )
    }
}

fn collect_prizes<F>(node_count: usize, prizes: F) -> Result<Vec<f64>>
where
    F: Fn(usize) -> f64,
{
    (0..node_count)
        .map(|node| {
            let prize = prizes(node);
            validate_prize(node, prize).map(|()| prize)
        })
        .collect()
}

/// Reads every undirected relationship once, from its lower endpoint.
/// Self-loops can never join two clusters and are dropped.
fn collect_edges<G>(graph: &G) -> Result<EdgeParts>
where
    G: WeightedGraph + ?Sized,
{
    let node_count = graph.node_count();
    let mut parts = EdgeParts::with_capacity(graph.relationship_count() >> 1);
    let mut failure = None;
    for node in 0..node_count {
        graph.for_each_relationship(node, &mut |source, target, cost| {
            let checked = check_relationship(node_count, source, target, cost);
            match checked {
                Ok(()) => {
                    if source < target {
                        parts.push(source, target, cost);
                    }
                    true
                }
                Err(error) => {
                    failure = Some(error);
                    false
                }
            }
        });
        if let Some(error) = failure.take() {
            return Err(error);
        }
    }
    Ok(parts)
}

fn check_relationship(node_count: usize, source: usize, target: usize, cost: f64) -> Result<()> {
    for node in [source, target] {
        if node >= node_count {
            return Err(PcstError::InvalidNodeId { node, node_count });
        }
    }
    validate_cost(source, target, cost)
}

#[cfg(test)]
mod tests;
