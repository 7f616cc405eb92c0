//! Global queue of cluster deactivation deadlines.
//!
//! Every cluster schedules exactly one deadline when it is born and the
//! deadline never moves, so entries are never updated in place. Clusters that
//! stopped growing for another reason (a merge) leave stale entries behind;
//! those are discarded lazily by filtering on the caller's activity
//! predicate.

use std::{cmp::Ordering, collections::BinaryHeap};

/// A `(time, cluster)` pair ordered by time, then by cluster id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct EventKey {
    pub(crate) time: f64,
    pub(crate) cluster: usize,
}

impl Eq for EventKey {}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.cluster.cmp(&other.cluster))
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Earliest(EventKey);

impl Ord for Earliest {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

impl PartialOrd for Earliest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ClusterEventsPriorityQueue {
    heap: BinaryHeap<Earliest>,
}

impl ClusterEventsPriorityQueue {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub(crate) fn add(&mut self, cluster: usize, time: f64) {
        self.heap.push(Earliest(EventKey { time, cluster }));
    }

    /// Returns the earliest deadline among clusters accepted by `active`,
    /// discarding entries of clusters that are no longer active.
    pub(crate) fn closest_event(&mut self, active: impl Fn(usize) -> bool) -> Option<EventKey> {
        while let Some(&Earliest(key)) = self.heap.peek() {
            if active(key.cluster) {
                return Some(key);
            }
            self.heap.pop();
        }
        None
    }

    /// Time of [`Self::closest_event`], or infinity when nothing is pending.
    pub(crate) fn closest_event_time(&mut self, active: impl Fn(usize) -> bool) -> f64 {
        self.closest_event(active)
            .map_or(f64::INFINITY, |key| key.time)
    }

    /// Removes the entry at the front of the queue.
    pub(crate) fn pop(&mut self) -> Option<EventKey> {
        self.heap.pop().map(|Earliest(key)| key)
    }
}
