//! Cluster hierarchy with time-indexed moat accounting.
//!
//! Original nodes are the leaves `0..node_count` and are born at time zero.
//! Every merge creates a new cluster id (`node_count..`) whose children are
//! the two merged clusters. A cluster grows at unit rate from its birth until
//! it is deactivated, either because its prize budget ran out or because it
//! was merged into a parent. The growth attributed to one cluster layer is
//! its *moat*.
//!
//! The moat of a cluster with a parent is final, so walks up the hierarchy
//! cache `(ancestor, moat sum)` shortcuts in the manner of union-find path
//! compression.

use fixedbitset::FixedBitSet;

#[derive(Clone, Debug)]
pub(crate) struct ClusterStructure {
    node_count: usize,
    parent: Vec<Option<usize>>,
    children: Vec<Option<(usize, usize)>>,
    birth_time: Vec<f64>,
    deactivation_time: Vec<Option<f64>>,
    prize: Vec<f64>,
    budget_spent_at_birth: Vec<f64>,
    skip_up: Vec<Option<(usize, f64)>>,
    path: Vec<(usize, f64)>,
}

impl ClusterStructure {
    /// Creates `node_count` leaf clusters with zero prize.
    pub(crate) fn new(node_count: usize) -> Self {
        let capacity = cluster_capacity(node_count);
        let mut structure = Self {
            node_count,
            parent: Vec::with_capacity(capacity),
            children: Vec::with_capacity(capacity),
            birth_time: Vec::with_capacity(capacity),
            deactivation_time: Vec::with_capacity(capacity),
            prize: Vec::with_capacity(capacity),
            budget_spent_at_birth: Vec::with_capacity(capacity),
            skip_up: Vec::with_capacity(capacity),
            path: Vec::new(),
        };
        for _ in 0..node_count {
            structure.push_cluster(None, 0.0, 0.0, 0.0);
        }
        structure
    }

    pub(crate) const fn node_count(&self) -> usize {
        self.node_count
    }

    pub(crate) const fn cluster_count(&self) -> usize {
        self.parent.len()
    }

    pub(crate) fn set_cluster_prize(&mut self, cluster: usize, prize: f64) {
        debug_assert!(
            cluster < self.node_count && self.parent[cluster].is_none(),
            "prizes can only be assigned to unmerged leaves"
        );
        self.prize[cluster] = prize;
    }

    #[cfg(test)]
    pub(crate) fn cluster_prize(&self, cluster: usize) -> f64 {
        self.prize[cluster]
    }

    #[cfg(test)]
    pub(crate) fn birth_time(&self, cluster: usize) -> f64 {
        self.birth_time[cluster]
    }

    #[cfg(test)]
    pub(crate) fn budget_spent_at_birth(&self, cluster: usize) -> f64 {
        self.budget_spent_at_birth[cluster]
    }

    #[cfg(test)]
    pub(crate) fn parent(&self, cluster: usize) -> Option<usize> {
        self.parent[cluster]
    }

    /// Time at which `cluster` stopped growing, or `None` while it grows.
    pub(crate) fn inactive_since(&self, cluster: usize) -> Option<f64> {
        self.deactivation_time[cluster]
    }

    /// Growth of this cluster layer alone, clipped to `time`.
    pub(crate) fn moat_at(&self, cluster: usize, time: f64) -> f64 {
        let end = self.deactivation_time[cluster].map_or(time, |end| end.min(time));
        (end - self.birth_time[cluster]).max(0.0)
    }

    /// Marks `cluster` as no longer growing from `time` onwards.
    pub(crate) fn deactivate(&mut self, cluster: usize, time: f64) {
        if self.deactivation_time[cluster].is_none() {
            self.deactivation_time[cluster] = Some(time);
        }
    }

    /// Merges two top-level clusters at `time` and returns the new id.
    pub(crate) fn merge(&mut self, first: usize, second: usize, time: f64) -> usize {
        debug_assert_ne!(first, second, "a cluster cannot merge with itself");
        debug_assert!(
            self.parent[first].is_none() && self.parent[second].is_none(),
            "only top-level clusters can merge"
        );
        let spent = self.budget_spent_at_birth[first]
            + self.moat_at(first, time)
            + self.budget_spent_at_birth[second]
            + self.moat_at(second, time);
        let prize = self.prize[first] + self.prize[second];

        self.deactivate(first, time);
        self.deactivate(second, time);

        let merged = self.push_cluster(Some((first, second)), time, prize, spent);
        self.parent[first] = Some(merged);
        self.parent[second] = Some(merged);
        merged
    }

    /// Walks from `leaf` to its top-level cluster and sums the moats of
    /// every layer on the way, clipped to `time`.
    ///
    /// Returns the top-level cluster together with the total.
    pub(crate) fn sum_on_edge_part(&mut self, leaf: usize, time: f64) -> (usize, f64) {
        let mut current = leaf;
        let mut sum = 0.0;
        self.path.clear();
        while let Some(parent) = self.parent[current] {
            self.path.push((current, sum));
            let (next, step) = self.skip_up[current]
                .unwrap_or_else(|| (parent, self.moat_at(current, time)));
            sum += step;
            current = next;
        }
        for &(visited, partial) in &self.path {
            self.skip_up[visited] = Some((current, sum - partial));
        }
        (current, sum + self.moat_at(current, time))
    }

    /// Absolute time at which `cluster` exhausts its prize budget when it
    /// keeps growing at unit rate from its birth.
    pub(crate) fn tightness_time(&self, cluster: usize) -> f64 {
        let slack = self.prize[cluster] - self.budget_spent_at_birth[cluster];
        self.birth_time[cluster] + slack.max(0.0)
    }

    /// Returns the leaves below `cluster`.
    pub(crate) fn active_original_nodes_of_cluster(&self, cluster: usize) -> FixedBitSet {
        let mut leaves = FixedBitSet::with_capacity(self.node_count);
        let mut stack = vec![cluster];
        while let Some(current) = stack.pop() {
            match self.children[current] {
                Some((first, second)) => {
                    stack.push(first);
                    stack.push(second);
                }
                None => leaves.insert(current),
            }
        }
        leaves
    }

    fn push_cluster(
        &mut self,
        children: Option<(usize, usize)>,
        birth: f64,
        prize: f64,
        spent: f64,
    ) -> usize {
        let id = self.parent.len();
        self.parent.push(None);
        self.children.push(children);
        self.birth_time.push(birth);
        self.deactivation_time.push(None);
        self.prize.push(prize);
        self.budget_spent_at_birth.push(spent);
        self.skip_up.push(None);
        id
    }
}

/// Number of cluster ids a growth over `node_count` leaves can allocate.
pub(crate) const fn cluster_capacity(node_count: usize) -> usize {
    node_count.saturating_mul(2).saturating_sub(1)
}
