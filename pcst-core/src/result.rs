//! Result types for prize-collecting Steiner tree computations.
//!
//! A result records, per node, whether the node was pruned, is the tree
//! root, or hangs below another kept node, together with the cost of the
//! relationship to that parent.

use crate::pcst::GrowthStats;

/// Position of a node in the computed tree.
///
/// # Examples
/// ```
/// use pcst_core::TreeParent;
///
/// assert_eq!(TreeParent::Pruned.to_raw(), -1);
/// assert_eq!(TreeParent::Root.to_raw(), -2);
/// assert_eq!(TreeParent::Node(7).to_raw(), 7);
/// assert!(TreeParent::Root.is_kept());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeParent {
    /// The node is not part of the tree.
    Pruned,
    /// The node is the root of the tree.
    Root,
    /// The node is attached to the given parent.
    Node(usize),
}

impl TreeParent {
    /// Encoded value of [`TreeParent::Pruned`] in [`PriceSteinerTreeResult::parent_array`].
    pub const PRUNED: i64 = -1;
    /// Encoded value of [`TreeParent::Root`] in [`PriceSteinerTreeResult::parent_array`].
    pub const ROOT: i64 = -2;

    /// Encodes the parent as a signed id using the sentinel values.
    #[must_use]
    pub fn to_raw(self) -> i64 {
        match self {
            Self::Pruned => Self::PRUNED,
            Self::Root => Self::ROOT,
            Self::Node(parent) => i64::try_from(parent).unwrap_or(Self::PRUNED),
        }
    }

    /// Returns whether the node belongs to the tree.
    #[must_use]
    pub const fn is_kept(self) -> bool {
        !matches!(self, Self::Pruned)
    }
}

/// Output of [`crate::PcstFast::compute`].
///
/// # Examples
/// ```
/// use pcst_core::{EdgeListGraph, PcstFast, TreeParent};
///
/// let graph = EdgeListGraph::try_new(2, [(0, 1, 1.0)])?;
/// let result = PcstFast::default().compute_simple(&graph, &[5.0, 5.0])?;
/// assert_eq!(result.effective_node_count(), 2);
/// assert_eq!(result.total_cost(), 1.0);
/// assert_eq!(result.net_value(), 9.0);
/// assert!(matches!(result.parent(0), TreeParent::Node(1) | TreeParent::Root));
/// # Ok::<(), pcst_core::PcstError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSteinerTreeResult {
    parents: Vec<TreeParent>,
    costs: Vec<f64>,
    root: Option<usize>,
    effective_node_count: usize,
    total_cost: f64,
    sum_of_prizes: f64,
    cancelled: bool,
    growth_stats: GrowthStats,
}

impl PriceSteinerTreeResult {
    pub(crate) fn new(
        parents: Vec<TreeParent>,
        costs: Vec<f64>,
        prizes: &[f64],
        cancelled: bool,
        growth_stats: GrowthStats,
    ) -> Self {
        let mut root = None;
        let mut effective_node_count = 0;
        let mut total_cost = 0.0;
        let mut sum_of_prizes = 0.0;
        for (node, parent) in parents.iter().enumerate() {
            match parent {
                TreeParent::Pruned => continue,
                TreeParent::Root => root = Some(node),
                TreeParent::Node(_) => total_cost += costs[node],
            }
            effective_node_count += 1;
            sum_of_prizes += prizes[node];
        }
        Self {
            parents,
            costs,
            root,
            effective_node_count,
            total_cost,
            sum_of_prizes,
            cancelled,
            growth_stats,
        }
    }

    /// Number of nodes the result covers, kept or not.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.parents.len()
    }

    /// Returns the parent of `node`. Nodes outside the graph report
    /// [`TreeParent::Pruned`].
    #[must_use]
    pub fn parent(&self, node: usize) -> TreeParent {
        self.parents.get(node).copied().unwrap_or(TreeParent::Pruned)
    }

    /// Cost of the relationship from `node` to its parent, or zero for the
    /// root and pruned nodes.
    #[must_use]
    pub fn relationship_to_parent_cost(&self, node: usize) -> f64 {
        self.costs.get(node).copied().unwrap_or(0.0)
    }

    /// Parents of every node in id order.
    #[must_use]
    pub fn parents(&self) -> &[TreeParent] {
        &self.parents
    }

    /// Parent ids encoded with [`TreeParent::PRUNED`] and
    /// [`TreeParent::ROOT`] sentinels.
    #[must_use]
    pub fn parent_array(&self) -> Vec<i64> {
        self.parents.iter().map(|parent| parent.to_raw()).collect()
    }

    /// Relationship costs to the parent, parallel to [`Self::parent_array`].
    #[must_use]
    pub fn relationship_to_parent_cost_array(&self) -> &[f64] {
        &self.costs
    }

    /// Root of the tree, if any node was kept.
    #[must_use]
    pub const fn root(&self) -> Option<usize> {
        self.root
    }

    /// Number of kept nodes.
    #[must_use]
    pub const fn effective_node_count(&self) -> usize {
        self.effective_node_count
    }

    /// Sum of the costs of the relationships in the tree.
    #[must_use]
    pub const fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sum of the prizes of the kept nodes.
    #[must_use]
    pub const fn sum_of_prizes(&self) -> f64 {
        self.sum_of_prizes
    }

    /// Collected prize minus connection cost.
    #[must_use]
    pub const fn net_value(&self) -> f64 {
        self.sum_of_prizes - self.total_cost
    }

    /// Whether termination was requested before growth finished.
    #[must_use]
    pub const fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Event counters of the growth phase.
    #[must_use]
    pub const fn growth_stats(&self) -> GrowthStats {
        self.growth_stats
    }
}
