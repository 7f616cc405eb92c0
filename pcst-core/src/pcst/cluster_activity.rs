//! Activity bookkeeping for growth-phase clusters.
//!
//! Leaves (`0..node_count`) start active at time zero. Merged clusters are
//! activated when they are born. Every transition records the time it
//! happened so the growth loop can recover when a cluster stopped growing.

use fixedbitset::FixedBitSet;

#[derive(Clone, Debug)]
pub(crate) struct ClusterActivity {
    active: FixedBitSet,
    relevant_time: Vec<f64>,
    active_count: usize,
}

impl ClusterActivity {
    /// Creates activity state for `node_count` leaves with room for
    /// `capacity` cluster ids in total.
    pub(crate) fn new(node_count: usize, capacity: usize) -> Self {
        let slots = capacity.max(node_count);
        let mut active = FixedBitSet::with_capacity(slots);
        active.insert_range(..node_count);
        Self {
            active,
            relevant_time: vec![0.0; slots],
            active_count: node_count,
        }
    }

    pub(crate) fn active(&self, cluster: usize) -> bool {
        self.active.contains(cluster)
    }

    pub(crate) const fn number_of_active_clusters(&self) -> usize {
        self.active_count
    }

    /// Time of the last activation or deactivation of `cluster`.
    pub(crate) fn relevant_time(&self, cluster: usize) -> f64 {
        self.relevant_time[cluster]
    }

    pub(crate) fn activate_cluster(&mut self, cluster: usize, time: f64) {
        debug_assert!(!self.active(cluster), "cluster {cluster} is already active");
        self.active.insert(cluster);
        self.relevant_time[cluster] = time;
        self.active_count += 1;
    }

    pub(crate) fn deactivate_cluster(&mut self, cluster: usize, time: f64) {
        debug_assert!(self.active(cluster), "cluster {cluster} is not active");
        self.active.set(cluster, false);
        self.relevant_time[cluster] = time;
        self.active_count -= 1;
    }

    /// Returns the smallest active cluster id.
    pub(crate) fn first_active_cluster(&self) -> Option<usize> {
        self.active.ones().next()
    }
}
