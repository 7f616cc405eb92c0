//! Primal-dual moat growing.
//!
//! All clusters grow at unit rate on a shared clock. Two kinds of events
//! stop the clock: an edge becomes tight (the moats on both of its sides
//! cover its cost), or a cluster spends its whole prize. A tight edge
//! joins its two clusters and enters the candidate forest. A spent cluster
//! stops growing but can still be absorbed by a growing neighbour.
//!
//! Growth ends once at most one cluster is still growing. Its leaves are the
//! candidates handed to tree construction.

use tracing::{debug, trace};

use super::{
    cluster_activity::ClusterActivity,
    cluster_events::ClusterEventsPriorityQueue,
    cluster_structure::{ClusterStructure, cluster_capacity},
    edge_events::{EdgeEventsQueue, EdgeParts, edge_of_part, other_part},
    inclusion::InclusionSet,
};
use crate::{progress::ProgressTracker, termination::TerminationFlag};

/// Event counters collected while growing clusters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthStats {
    /// Edge events taken from the queue, tight or not.
    pub edge_events: u64,
    /// Edge events that joined two clusters.
    pub merge_events: u64,
    /// Clusters that stopped growing because their prize was spent.
    pub deactivation_events: u64,
    /// Outdated queue entries discarded without processing.
    pub stale_events: u64,
}

/// Outcome of [`GrowthPhase::grow`].
#[derive(Debug)]
pub(crate) struct GrowthResult {
    pub(crate) edge_parts: EdgeParts,
    /// Ids of the edges that became tight, in merge order.
    pub(crate) tree_edges: Vec<usize>,
    pub(crate) inclusion: InclusionSet,
    pub(crate) stats: GrowthStats,
    pub(crate) cancelled: bool,
}

pub(crate) struct GrowthPhase<'a> {
    edge_parts: EdgeParts,
    epsilon: f64,
    clusters: ClusterStructure,
    activity: ClusterActivity,
    cluster_events: ClusterEventsPriorityQueue,
    edge_events: EdgeEventsQueue,
    tree_edges: Vec<usize>,
    stats: GrowthStats,
    progress: &'a mut dyn ProgressTracker,
    termination: &'a dyn TerminationFlag,
}

impl<'a> GrowthPhase<'a> {
    /// Prepares growth over `prizes.len()` leaves and the edges in
    /// `edge_parts`. Inputs are expected to be validated already.
    pub(crate) fn new(
        edge_parts: EdgeParts,
        prizes: &[f64],
        epsilon: f64,
        progress: &'a mut dyn ProgressTracker,
        termination: &'a dyn TerminationFlag,
    ) -> Self {
        let node_count = prizes.len();
        let capacity = cluster_capacity(node_count);

        let mut clusters = ClusterStructure::new(node_count);
        let mut cluster_events = ClusterEventsPriorityQueue::with_capacity(capacity);
        for (leaf, &prize) in prizes.iter().enumerate() {
            clusters.set_cluster_prize(leaf, prize);
            cluster_events.add(leaf, clusters.tightness_time(leaf));
        }

        let mut edge_events = EdgeEventsQueue::new(capacity, edge_parts.edge_count());
        for edge in 0..edge_parts.edge_count() {
            let (source, target) = edge_parts.endpoints(edge);
            edge_events.add_both_ways(edge, source, target, edge_parts.cost(edge));
        }
        edge_events.perform_initial_assignment(node_count);

        Self {
            edge_parts,
            epsilon,
            clusters,
            activity: ClusterActivity::new(node_count, capacity),
            cluster_events,
            edge_events,
            tree_edges: Vec::with_capacity(node_count.saturating_sub(1)),
            stats: GrowthStats::default(),
            progress,
            termination,
        }
    }

    /// Runs the event loop to completion or until termination is requested.
    pub(crate) fn grow(mut self) -> GrowthResult {
        let node_count = self.clusters.node_count();
        self.progress.begin_subtask("growth", node_count as u64);

        let mut cancelled = false;
        let mut time = 0.0;
        while self.activity.number_of_active_clusters() > 1 {
            if !self.termination.running() {
                cancelled = true;
                break;
            }

            let activity = &self.activity;
            let cluster_time = self
                .cluster_events
                .closest_event_time(|cluster| activity.active(cluster));
            let edge_time = self.edge_events.next_event_time();
            if cluster_time.is_infinite() && edge_time.is_infinite() {
                break;
            }

            // Deactivation wins ties: a cluster that runs out of budget at
            // the moment an edge saturates does not pay for that edge.
            if cluster_time <= edge_time {
                time = cluster_time;
                self.process_deactivation();
            } else {
                time = edge_time;
                self.process_edge_event();
            }
        }
        self.stats.stale_events = self.edge_events.stale_skipped();

        let inclusion = self.activity.first_active_cluster().map_or_else(
            || InclusionSet::new(node_count),
            |cluster| InclusionSet::from(self.clusters.active_original_nodes_of_cluster(cluster)),
        );

        debug!(
            nodes = node_count,
            edges = self.edge_parts.edge_count(),
            clusters = self.clusters.cluster_count(),
            tree_edges = self.tree_edges.len(),
            candidates = inclusion.count(),
            edge_events = self.stats.edge_events,
            merge_events = self.stats.merge_events,
            deactivation_events = self.stats.deactivation_events,
            stale_events = self.stats.stale_events,
            final_time = time,
            cancelled,
            "growth finished"
        );
        self.progress.end_subtask("growth");

        GrowthResult {
            edge_parts: self.edge_parts,
            tree_edges: self.tree_edges,
            inclusion,
            stats: self.stats,
            cancelled,
        }
    }

    fn process_deactivation(&mut self) {
        let Some(event) = self.cluster_events.pop() else {
            return;
        };
        let cluster = event.cluster;
        trace!(cluster, time = event.time, "cluster deactivated");

        self.activity.deactivate_cluster(cluster, event.time);
        self.clusters.deactivate(cluster, event.time);
        self.edge_events.deactivate_cluster(cluster);
        self.stats.deactivation_events += 1;
        record_deactivation();
    }

    fn process_edge_event(&mut self) {
        let Some((part, time)) = self.edge_events.pop() else {
            return;
        };
        self.stats.edge_events += 1;
        record_edge_event();

        let other = other_part(part);
        let edge = edge_of_part(part);
        let cost = self.edge_parts.cost(edge);
        let (cluster, sum) = self
            .clusters
            .sum_on_edge_part(self.edge_parts.endpoint(part), time);
        let (other_cluster, other_sum) = self
            .clusters
            .sum_on_edge_part(self.edge_parts.endpoint(other), time);
        debug_assert!(
            self.activity.active(cluster),
            "edge events are only published for growing clusters"
        );

        if cluster == other_cluster {
            self.edge_events.invalidate(other);
            return;
        }

        let remainder = cost - sum - other_sum;
        let far_side_growing = self.activity.active(other_cluster);
        let Some(meet) = meeting_time(
            time,
            remainder,
            self.epsilon * cost,
            far_side_growing,
        ) else {
            self.edge_events.invalidate(other);
            self.merge(edge, cluster, other_cluster, time);
            return;
        };

        self.edge_events.add_with_check(cluster, part, meet);
        if far_side_growing {
            self.edge_events.add_with_check(other_cluster, other, meet);
        } else {
            // The far side is frozen: this side pays the rest alone. The far
            // part is parked at the moment its cluster froze so it fires as
            // soon as that cluster resumes growing.
            let frozen_at = self.clusters.inactive_since(other_cluster).unwrap_or(time);
            self.edge_events
                .add_without_check(other_cluster, other, frozen_at);
        }
    }

    fn merge(&mut self, edge: usize, first: usize, second: usize, time: f64) {
        let first_delay = self.inactive_delay(first, time);
        let second_delay = self.inactive_delay(second, time);

        let merged = self.clusters.merge(first, second, time);
        self.edge_events
            .merge_and_update(merged, first, first_delay, second, second_delay);
        for cluster in [first, second] {
            if self.activity.active(cluster) {
                self.activity.deactivate_cluster(cluster, time);
            }
        }
        self.activity.activate_cluster(merged, time);
        self.cluster_events
            .add(merged, self.clusters.tightness_time(merged));

        trace!(edge, first, second, merged, time, "clusters merged");
        self.tree_edges.push(edge);
        self.stats.merge_events += 1;
        self.progress.log_progress(1);
        record_merge();
    }

    /// Time `cluster` has spent frozen, or zero while it grows.
    fn inactive_delay(&self, cluster: usize, time: f64) -> f64 {
        if self.activity.active(cluster) {
            return 0.0;
        }
        time - self.activity.relevant_time(cluster)
    }
}

/// Time at which an edge with `remainder` left to cover becomes tight, or
/// `None` when it is tight already.
///
/// Both sides close the gap when the far side grows, otherwise the near side
/// pays it alone. A remainder within `tolerance`, or one too small to move the
/// clock past `time`, counts as tight.
fn meeting_time(
    time: f64,
    remainder: f64,
    tolerance: f64,
    far_side_growing: bool,
) -> Option<f64> {
    if remainder <= tolerance {
        return None;
    }
    let meet = if far_side_growing {
        time + remainder / 2.0
    } else {
        time + remainder
    };
    (meet > time).then_some(meet)
}

#[cfg(feature = "metrics")]
fn record_edge_event() {
    metrics::counter!("pcst_edge_events").increment(1);
}

#[cfg(not(feature = "metrics"))]
const fn record_edge_event() {}

#[cfg(feature = "metrics")]
fn record_merge() {
    metrics::counter!("pcst_merge_events").increment(1);
}

#[cfg(not(feature = "metrics"))]
const fn record_merge() {}

#[cfg(feature = "metrics")]
fn record_deactivation() {
    metrics::counter!("pcst_deactivation_events").increment(1);
}

#[cfg(not(feature = "metrics"))]
const fn record_deactivation() {}
