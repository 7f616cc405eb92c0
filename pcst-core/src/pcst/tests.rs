use proptest::prelude::*;
use rstest::rstest;

use super::{MAX_NODE_COUNT, PcstFast};
use crate::{
    error::PcstError,
    graph::{EdgeListGraph, WeightedGraph, prizes_from_slice},
    progress::ProgressTracker,
    result::{PriceSteinerTreeResult, TreeParent},
    termination::AtomicTerminationFlag,
    test_utils::suite_proptest_config,
};

/// Graph that reports a fixed relationship list without validating it.
struct RawGraph {
    node_count: usize,
    relationships: Vec<(usize, usize, f64)>,
}

impl WeightedGraph for RawGraph {
    fn node_count(&self) -> usize {
        self.node_count
    }

    fn degree(&self, node: usize) -> usize {
        self.relationships.iter().filter(|(s, _, _)| *s == node).count()
    }

    fn for_each_relationship(
        &self,
        node: usize,
        consumer: &mut dyn FnMut(usize, usize, f64) -> bool,
    ) {
        for &(source, target, cost) in &self.relationships {
            if source == node && !consumer(source, target, cost) {
                break;
            }
        }
    }
}

/// Claims an oversized node count without storing anything.
struct HugeGraph;

impl WeightedGraph for HugeGraph {
    fn node_count(&self) -> usize {
        MAX_NODE_COUNT + 1
    }

    fn degree(&self, _node: usize) -> usize {
        0
    }

    fn for_each_relationship(
        &self,
        _node: usize,
        _consumer: &mut dyn FnMut(usize, usize, f64) -> bool,
    ) {
    }
}

#[derive(Default)]
struct RecordingTracker {
    started: Vec<String>,
    finished: Vec<String>,
    units: u64,
}

impl ProgressTracker for RecordingTracker {
    fn begin_subtask(&mut self, name: &str, _volume: u64) {
        self.started.push(name.to_owned());
    }

    fn log_progress(&mut self, done: u64) {
        self.units += done;
    }

    fn end_subtask(&mut self, name: &str) {
        self.finished.push(name.to_owned());
    }
}

fn solve(node_count: usize, edges: &[(usize, usize, f64)], prizes: &[f64]) -> PriceSteinerTreeResult {
    let graph = EdgeListGraph::try_new(node_count, edges.iter().copied()).expect("valid graph");
    PcstFast::default()
        .compute_simple(&graph, prizes)
        .expect("valid input")
}

#[test]
fn path_keeps_only_the_cheap_middle_edge() {
    let result = solve(
        4,
        &[(0, 1, 100.0), (1, 2, 10.0), (2, 3, 100.0)],
        &[20.0; 4],
    );

    assert_eq!(result.parent_array(), vec![-1, 2, -2, -1]);
    assert_eq!(result.relationship_to_parent_cost_array(), &[0.0, 10.0, 0.0, 0.0]);
    assert_eq!(result.total_cost(), 10.0);
    assert_eq!(result.net_value(), 30.0);
}

#[rstest]
#[case::empty(0, &[], &[], 0)]
#[case::single_node(1, &[], &[3.0], 1)]
#[case::isolated_nodes(3, &[], &[1.0, 5.0, 2.0], 1)]
#[case::zero_prizes(2, &[(0, 1, 1.0)], &[0.0, 0.0], 1)]
fn degenerate_graphs(
    #[case] node_count: usize,
    #[case] edges: &[(usize, usize, f64)],
    #[case] prizes: &[f64],
    #[case] kept: usize,
) {
    let result = solve(node_count, edges, prizes);
    assert_eq!(result.effective_node_count(), kept);
    assert_eq!(result.root().is_some(), kept > 0);
}

#[test]
fn isolated_nodes_keep_the_richest_survivor() {
    let result = solve(3, &[], &[1.0, 5.0, 2.0]);
    assert_eq!(result.parents(), &[TreeParent::Pruned, TreeParent::Root, TreeParent::Pruned]);
}

#[test]
fn self_loops_are_ignored() {
    let graph = RawGraph {
        node_count: 2,
        relationships: vec![(0, 0, 1.0), (0, 1, 2.0), (1, 0, 2.0)],
    };
    let result = PcstFast::default()
        .compute_simple(&graph, &[5.0, 5.0])
        .expect("valid input");
    assert_eq!(result.effective_node_count(), 2);
    assert_eq!(result.total_cost(), 2.0);
}

#[rstest]
#[case::negative_prize(&[1.0, -2.0], "PCST_NEGATIVE_PRIZE")]
#[case::nan_prize(&[f64::NAN, 1.0], "PCST_NON_FINITE_PRIZE")]
#[case::short_prizes(&[1.0], "PCST_PRIZE_COUNT_MISMATCH")]
fn invalid_prizes_are_rejected(#[case] prizes: &[f64], #[case] code: &str) {
    let graph = EdgeListGraph::try_new(2, [(0, 1, 1.0)]).expect("valid graph");
    let err = PcstFast::default()
        .compute_simple(&graph, prizes)
        .expect_err("prizes must be rejected");
    assert_eq!(err.code().as_str(), code);
}

#[rstest]
#[case::out_of_range(vec![(0, 5, 1.0)], PcstError::InvalidNodeId { node: 5, node_count: 2 })]
#[case::negative(vec![(0, 1, -1.0)], PcstError::NegativeCost { node: 0, neighbor: 1, cost: -1.0 })]
#[case::infinite(vec![(1, 0, f64::INFINITY)], PcstError::NonFiniteCost { node: 1, neighbor: 0 })]
fn invalid_relationships_are_rejected(
    #[case] relationships: Vec<(usize, usize, f64)>,
    #[case] expected: PcstError,
) {
    let graph = RawGraph {
        node_count: 2,
        relationships,
    };
    let err = PcstFast::default()
        .compute_simple(&graph, &[1.0, 1.0])
        .expect_err("relationship must be rejected");
    assert_eq!(err, expected);
}

#[test]
fn oversized_graphs_are_rejected_before_allocation() {
    let err = PcstFast::default()
        .compute(
            &HugeGraph,
            |_| 0.0,
            &mut RecordingTracker::default(),
            &AtomicTerminationFlag::new(),
        )
        .expect_err("graph is too large");
    assert!(matches!(err, PcstError::CapacityExceeded { .. }));
}

#[test]
fn phases_are_reported_in_order() {
    let graph = EdgeListGraph::try_new(3, [(0, 1, 1.0), (1, 2, 1.0)]).expect("valid graph");
    let prizes = [5.0; 3];
    let mut tracker = RecordingTracker::default();
    PcstFast::default()
        .compute(
            &graph,
            prizes_from_slice(&prizes),
            &mut tracker,
            &AtomicTerminationFlag::new(),
        )
        .expect("valid input");

    assert_eq!(tracker.started, vec!["growth", "tree", "pruning"]);
    assert_eq!(tracker.finished, tracker.started);
    assert!(tracker.units > 0);
}

#[test]
fn stopped_flag_returns_a_partial_tree() {
    let graph = EdgeListGraph::try_new(3, [(0, 1, 1.0), (1, 2, 1.0)]).expect("valid graph");
    let prizes = [5.0; 3];
    let flag = AtomicTerminationFlag::new();
    flag.stop();

    let result = PcstFast::default()
        .compute(
            &graph,
            prizes_from_slice(&prizes),
            &mut RecordingTracker::default(),
            &flag,
        )
        .expect("cancellation is not an error");

    assert!(result.was_cancelled());
    assert_eq!(result.effective_node_count(), 1);
    assert_eq!(result.growth_stats().merge_events, 0);
}

fn random_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, f64)>, Vec<f64>)> {
    (1_usize..30).prop_flat_map(|nodes| {
        let edges = prop::collection::vec(
            (0..nodes, 0..nodes, 0.0..20.0_f64),
            0..(nodes * 3),
        );
        let prizes = prop::collection::vec(0.0..15.0_f64, nodes);
        (Just(nodes), edges, prizes)
    })
}

proptest! {
    #![proptest_config(suite_proptest_config(96))]

    #[test]
    fn solutions_form_a_single_profitable_tree((nodes, edges, prizes) in random_graph()) {
        let result = solve(nodes, &edges, &prizes);

        prop_assert!(!result.was_cancelled());
        prop_assert_eq!(result.node_count(), nodes);
        let root = result.root();
        prop_assert!(root.is_some());

        let mut attached = 0;
        for (node, parent) in result.parents().iter().enumerate() {
            let TreeParent::Node(up) = *parent else {
                continue;
            };
            attached += 1;
            prop_assert!(result.parent(up).is_kept());
            let cost = result.relationship_to_parent_cost(node);
            let edge_matches = edges.iter().any(|&(s, t, c)| {
                ((s, t) == (node, up) || (s, t) == (up, node)) && c == cost
            });
            prop_assert!(edge_matches);

            // Every kept node reaches the root without revisiting a node.
            let mut current = node;
            let mut steps = 0;
            while let TreeParent::Node(next) = result.parent(current) {
                current = next;
                steps += 1;
                prop_assert!(steps <= nodes);
            }
            prop_assert_eq!(Some(current), root);
        }
        prop_assert_eq!(attached + 1, result.effective_node_count());
        prop_assert!(result.net_value() >= -1e-9);
    }
}
