//! Per-cluster queues of pending edge saturation events.
//!
//! Every undirected edge `i` is split into two *edge parts*, `2i` seen from
//! its source and `2i + 1` seen from its target. Each part lives in the heap
//! of the top-level cluster that currently owns its endpoint. Only clusters
//! that are still growing publish the minimum of their heap into a global
//! ordered set, so the next edge event is found without scanning clusters.
//!
//! Rescheduling never edits an entry in place. Instead each part carries a
//! ticket; re-adding or invalidating a part bumps the ticket and the old
//! entry is discarded when it surfaces.

use std::{collections::BTreeSet, mem};

use fixedbitset::FixedBitSet;

use super::{cluster_events::EventKey, pairing_heap::PairingHeap};

/// Returns the part on the other side of the same edge.
pub(crate) const fn other_part(part: usize) -> usize {
    part ^ 1
}

/// Returns the edge a part belongs to.
pub(crate) const fn edge_of_part(part: usize) -> usize {
    part >> 1
}

/// Endpoints and costs of the edges taking part in growth.
#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeParts {
    endpoints: Vec<usize>,
    costs: Vec<f64>,
}

impl EdgeParts {
    pub(crate) fn with_capacity(edges: usize) -> Self {
        Self {
            endpoints: Vec::with_capacity(edges.saturating_mul(2)),
            costs: Vec::with_capacity(edges),
        }
    }

    /// Appends an edge and returns its id.
    pub(crate) fn push(&mut self, source: usize, target: usize, cost: f64) -> usize {
        let edge = self.costs.len();
        self.endpoints.push(source);
        self.endpoints.push(target);
        self.costs.push(cost);
        edge
    }

    pub(crate) const fn edge_count(&self) -> usize {
        self.costs.len()
    }

    /// Original node owning `part`.
    pub(crate) fn endpoint(&self, part: usize) -> usize {
        self.endpoints[part]
    }

    pub(crate) fn cost(&self, edge: usize) -> f64 {
        self.costs[edge]
    }

    /// Both endpoints of `edge`, source first.
    pub(crate) fn endpoints(&self, edge: usize) -> (usize, usize) {
        (self.endpoints[2 * edge], self.endpoints[2 * edge + 1])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Ticketed {
    part: usize,
    ticket: u32,
}

#[derive(Debug)]
pub(crate) struct EdgeEventsQueue {
    heaps: Vec<PairingHeap<Ticketed>>,
    tickets: Vec<u32>,
    tops: BTreeSet<EventKey>,
    published: Vec<Option<EventKey>>,
    growing: FixedBitSet,
    retired: FixedBitSet,
    stale_skipped: u64,
}

impl EdgeEventsQueue {
    /// Creates an empty queue for `cluster_capacity` cluster ids and
    /// `edge_count` edges.
    pub(crate) fn new(cluster_capacity: usize, edge_count: usize) -> Self {
        let mut heaps = Vec::with_capacity(cluster_capacity);
        heaps.resize_with(cluster_capacity, PairingHeap::new);
        Self {
            heaps,
            tickets: vec![0; edge_count.saturating_mul(2)],
            tops: BTreeSet::new(),
            published: vec![None; cluster_capacity],
            growing: FixedBitSet::with_capacity(cluster_capacity),
            retired: FixedBitSet::with_capacity(cluster_capacity),
            stale_skipped: 0,
        }
    }

    /// Registers `edge` in the heaps of both endpoints. Leaves start with
    /// no moat, so both sides expect to meet halfway at `cost / 2`.
    pub(crate) fn add_both_ways(&mut self, edge: usize, source: usize, target: usize, cost: f64) {
        let time = cost / 2.0;
        self.push_entry(source, 2 * edge, time);
        self.push_entry(target, 2 * edge + 1, time);
    }

    /// Publishes the heap minima of the `node_count` leaves once every edge
    /// has been added.
    pub(crate) fn perform_initial_assignment(&mut self, node_count: usize) {
        for leaf in 0..node_count {
            self.growing.insert(leaf);
            self.republish(leaf);
        }
    }

    /// Returns the globally earliest valid event as `(part, time)`.
    pub(crate) fn top(&mut self) -> Option<(usize, f64)> {
        loop {
            let key = *self.tops.first()?;
            let candidate = self.heaps[key.cluster]
                .min_element()
                .map(|entry| (entry.part, self.tickets[entry.part] == entry.ticket));
            match candidate {
                Some((part, true)) => return Some((part, key.time)),
                _ => self.republish(key.cluster),
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn top_edge_part(&mut self) -> Option<usize> {
        self.top().map(|(part, _)| part)
    }

    /// Time of the next edge event, or infinity when none is pending.
    pub(crate) fn next_event_time(&mut self) -> f64 {
        self.top().map_or(f64::INFINITY, |(_, time)| time)
    }

    /// Removes and returns the globally earliest valid event.
    pub(crate) fn pop(&mut self) -> Option<(usize, f64)> {
        let (part, time) = self.top()?;
        let cluster = self.tops.first()?.cluster;
        self.heaps[cluster].pop();
        self.republish(cluster);
        Some((part, time))
    }

    /// Melds the heaps of `first` and `second` into `merged`.
    ///
    /// A cluster that had stopped growing resumes with the merge, so its
    /// pending events are pushed back by the time it spent inactive.
    pub(crate) fn merge_and_update(
        &mut self,
        merged: usize,
        first: usize,
        first_delay: f64,
        second: usize,
        second_delay: f64,
    ) {
        let mut heap = self.retire(first, first_delay);
        let other = self.retire(second, second_delay);
        heap.join(other);
        self.heaps[merged] = heap;
        self.growing.insert(merged);
        self.republish(merged);
    }

    /// Withdraws `cluster` from the global selection. Its heap is kept so a
    /// later merge can resume its events.
    pub(crate) fn deactivate_cluster(&mut self, cluster: usize) {
        self.growing.set(cluster, false);
        self.unpublish(cluster);
    }

    /// Schedules `part` in the heap of a growing `cluster`, updating the
    /// global selection when the new event comes first.
    pub(crate) fn add_with_check(&mut self, cluster: usize, part: usize, time: f64) {
        self.push_entry(cluster, part, time);
        let improves = self.published[cluster].is_none_or(|key| time < key.time);
        if self.growing.contains(cluster) && improves {
            self.republish(cluster);
        }
    }

    /// Schedules `part` in the heap of `cluster` without touching the
    /// global selection. Used for clusters that are not growing.
    pub(crate) fn add_without_check(&mut self, cluster: usize, part: usize, time: f64) {
        self.push_entry(cluster, part, time);
    }

    /// Discards every pending entry of `part`.
    pub(crate) fn invalidate(&mut self, part: usize) {
        self.tickets[part] = self.tickets[part].wrapping_add(1);
    }

    #[cfg(test)]
    /// Minimum pending time of `cluster`, or infinity once it is retired or
    /// has nothing left.
    pub(crate) fn min_of(&self, cluster: usize) -> f64 {
        if self.retired.contains(cluster) {
            return f64::INFINITY;
        }
        self.heaps[cluster].min_value().unwrap_or(f64::INFINITY)
    }

    /// Number of outdated entries discarded so far.
    pub(crate) const fn stale_skipped(&self) -> u64 {
        self.stale_skipped
    }

    fn push_entry(&mut self, cluster: usize, part: usize, time: f64) {
        let ticket = self.tickets[part].wrapping_add(1);
        self.tickets[part] = ticket;
        self.heaps[cluster].add(Ticketed { part, ticket }, time);
    }

    fn retire(&mut self, cluster: usize, delay: f64) -> PairingHeap<Ticketed> {
        self.deactivate_cluster(cluster);
        self.retired.insert(cluster);
        let mut heap = mem::take(&mut self.heaps[cluster]);
        if delay > 0.0 {
            heap.increase_values(delay);
        }
        heap
    }

    fn unpublish(&mut self, cluster: usize) {
        if let Some(key) = self.published[cluster].take() {
            self.tops.remove(&key);
        }
    }

    /// Drops outdated entries from the top of the heap and republishes the
    /// cluster's minimum.
    fn republish(&mut self, cluster: usize) {
        self.unpublish(cluster);
        let heap = &mut self.heaps[cluster];
        while let Some(&entry) = heap.min_element() {
            if self.tickets[entry.part] == entry.ticket {
                break;
            }
            heap.pop();
            self.stale_skipped += 1;
        }
        if !self.growing.contains(cluster) {
            return;
        }
        if let Some(time) = heap.min_value() {
            let key = EventKey { time, cluster };
            self.tops.insert(key);
            self.published[cluster] = Some(key);
        }
    }
}
