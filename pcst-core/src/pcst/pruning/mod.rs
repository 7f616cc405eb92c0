//! Strong pruning of the candidate forest.
//!
//! Subtrees are evaluated bottom-up by repeatedly peeling leaves. A subtree
//! whose collected prize does not cover the edge linking it to its parent is
//! cut off. The traversal keeps its own queue, so deep trees never recurse.
//!
//! Each component ends at the node peeled last, which becomes its root. A
//! root that is itself a leaf hands over to its neighbour when that pays
//! better. When several components survive, only the one with the largest
//! net value is kept.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use tracing::debug;

use super::{inclusion::InclusionSet, tree::Tree};
use crate::{progress::ProgressTracker, result::TreeParent};

/// Parent links and costs of the pruned tree.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PrunedTree {
    pub(crate) parents: Vec<TreeParent>,
    pub(crate) costs: Vec<f64>,
    pub(crate) root: Option<usize>,
}

pub(crate) struct StrongPruning<'a> {
    tree: &'a Tree,
    prizes: &'a [f64],
    inclusion: InclusionSet,
    parent: Vec<Option<usize>>,
    parent_cost: Vec<f64>,
    value: Vec<f64>,
    root: Option<usize>,
    scratch: Vec<(usize, usize)>,
}

impl<'a> StrongPruning<'a> {
    pub(crate) fn new(tree: &'a Tree, prizes: &'a [f64], inclusion: InclusionSet) -> Self {
        let node_count = tree.node_count();
        Self {
            tree,
            prizes,
            inclusion,
            parent: vec![None; node_count],
            parent_cost: vec![0.0; node_count],
            value: vec![0.0; node_count],
            root: None,
            scratch: Vec::new(),
        }
    }

    /// Evaluates every component and cuts the subtrees that do not pay for
    /// themselves.
    pub(crate) fn perform_pruning(&mut self, progress: &mut dyn ProgressTracker) {
        let node_count = self.tree.node_count();
        let candidates = self.inclusion.count();
        progress.begin_subtask("pruning", candidates as u64);

        let mut degree = self.tree.degrees().to_vec();
        let mut processed = FixedBitSet::with_capacity(node_count);
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(candidates);
        for node in self.inclusion.iter() {
            self.value[node] = self.prizes[node];
            if degree[node] <= 1 {
                queue.push_back(node);
            }
        }

        let mut roots = Vec::new();
        while let Some(node) = queue.pop_front() {
            processed.insert(node);
            progress.log_progress(1);

            let upward = self
                .tree
                .neighbours(node)
                .iter()
                .copied()
                .find(|&(neighbour, _)| !processed.contains(neighbour));
            let Some((parent, cost)) = upward else {
                roots.push(node);
                continue;
            };

            self.parent[node] = Some(parent);
            self.parent_cost[node] = cost;
            let contribution = self.value[node] - cost;
            if contribution < 0.0 {
                self.set_nodes_as_invalid(node, Some(parent));
            } else {
                self.value[parent] += contribution;
            }

            degree[parent] -= 1;
            if degree[parent] == 1 {
                queue.push_back(parent);
            }
        }

        let mut best: Option<(usize, f64)> = None;
        for root in &mut roots {
            *root = self.settle_root(*root);
            let value = self.value[*root];
            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some((*root, value));
            }
        }

        self.root = best.map(|(root, _)| root);
        for other in roots {
            if Some(other) != self.root {
                self.set_nodes_as_invalid(other, None);
            }
        }

        let pruned = candidates - self.inclusion.count();
        record_pruned(pruned);
        debug!(
            candidates,
            kept = self.inclusion.count(),
            pruned,
            root = ?self.root,
            net_value = self.root.map_or(0.0, |root| self.value[root]),
            "strong pruning finished"
        );
        progress.end_subtask("pruning");
    }

    /// Reconsiders a root that is a leaf of the candidate tree.
    ///
    /// Peeling never tests the root against the edge to its only neighbour,
    /// so the component is also evaluated from that neighbour's side. The
    /// neighbour takes over when it yields a strictly higher net value.
    fn settle_root(&mut self, root: usize) -> usize {
        let &[(child, cost)] = self.tree.neighbours(root) else {
            return root;
        };
        let own = self.prizes[root] - cost;
        let alternative = self.value[child] + own.max(0.0);
        if alternative <= self.value[root] {
            return root;
        }

        if !self.inclusion.is_included(child) {
            self.restore_subtree(child);
        }
        self.parent[child] = None;
        if own < 0.0 {
            self.inclusion.exclude(root);
        } else {
            self.parent[root] = Some(child);
            self.parent_cost[root] = cost;
        }
        self.value[child] = alternative;
        child
    }

    /// Includes `from` again together with every descendant whose subtree
    /// paid for its link during peeling.
    fn restore_subtree(&mut self, from: usize) {
        self.scratch.clear();
        self.scratch.push((from, from));
        while let Some((node, _)) = self.scratch.pop() {
            self.inclusion.include(node);
            for &(neighbour, cost) in self.tree.neighbours(node) {
                if self.parent[neighbour] == Some(node) && self.value[neighbour] - cost >= 0.0 {
                    self.scratch.push((neighbour, node));
                }
            }
        }
    }

    /// Excludes `from` and everything reachable from it without passing
    /// through `excluded_neighbour`.
    pub(crate) fn set_nodes_as_invalid(&mut self, from: usize, excluded_neighbour: Option<usize>) {
        self.scratch.clear();
        self.scratch.push((from, excluded_neighbour.unwrap_or(from)));
        while let Some((node, came_from)) = self.scratch.pop() {
            self.inclusion.exclude(node);
            for &(neighbour, _) in self.tree.neighbours(node) {
                if neighbour != came_from && self.inclusion.is_included(neighbour) {
                    self.scratch.push((neighbour, node));
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) const fn inclusion(&self) -> &InclusionSet {
        &self.inclusion
    }

    /// Parent links of the surviving tree.
    pub(crate) fn result_tree(&self) -> PrunedTree {
        let node_count = self.tree.node_count();
        let mut parents = vec![TreeParent::Pruned; node_count];
        let mut costs = vec![0.0; node_count];
        for node in self.inclusion.iter() {
            if Some(node) == self.root {
                parents[node] = TreeParent::Root;
                continue;
            }
            if let Some(parent) = self.parent[node] {
                parents[node] = TreeParent::Node(parent);
                costs[node] = self.parent_cost[node];
            }
        }
        PrunedTree {
            parents,
            costs,
            root: self.root,
        }
    }
}

#[cfg(feature = "metrics")]
fn record_pruned(count: usize) {
    metrics::counter!("pcst_pruned_nodes").increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
const fn record_pruned(_count: usize) {}

#[cfg(test)]
mod tests;
