use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::{PrunedTree, StrongPruning};
use crate::{
    pcst::{
        edge_events::EdgeParts,
        inclusion::InclusionSet,
        tree::{Tree, create_tree},
    },
    progress::NoopProgressTracker,
    result::TreeParent,
    test_utils::suite_proptest_config,
};

fn tree_over(node_count: usize, edges: &[(usize, usize, f64)]) -> (Tree, InclusionSet) {
    let mut parts = EdgeParts::with_capacity(edges.len());
    for &(source, target, cost) in edges {
        parts.push(source, target, cost);
    }
    let mut inclusion = InclusionSet::new(node_count);
    for node in 0..node_count {
        inclusion.include(node);
    }
    let ids: Vec<usize> = (0..edges.len()).collect();
    let tree = create_tree(&ids, &parts, &inclusion, node_count, &mut NoopProgressTracker);
    (tree, inclusion)
}

fn prune(tree: &Tree, prizes: &[f64], inclusion: InclusionSet) -> PrunedTree {
    let mut pruning = StrongPruning::new(tree, prizes, inclusion);
    pruning.perform_pruning(&mut NoopProgressTracker);
    pruning.result_tree()
}

/// Nine nodes `a1..a9` (ids `0..8`) with prize `k` on node `ak`.
#[fixture]
fn nine_node_tree() -> (Tree, InclusionSet, Vec<f64>) {
    let edges = [
        (0, 1, 0.0),
        (0, 8, 10.0),
        (1, 3, 8.0),
        (3, 5, 3.0),
        (3, 6, 4.0),
        (3, 4, 6.0),
        (1, 2, 5.0),
        (2, 7, 9.0),
    ];
    let (tree, inclusion) = tree_over(9, &edges);
    let prizes = (1..=9_u8).map(f64::from).collect();
    (tree, inclusion, prizes)
}

#[rstest]
fn nine_node_tree_keeps_the_profitable_core(nine_node_tree: (Tree, InclusionSet, Vec<f64>)) {
    let (tree, inclusion, prizes) = nine_node_tree;
    let result = prune(&tree, &prizes, inclusion);

    let expected = [
        TreeParent::Node(1),
        TreeParent::Root,
        TreeParent::Pruned,
        TreeParent::Node(1),
        TreeParent::Pruned,
        TreeParent::Node(3),
        TreeParent::Node(3),
        TreeParent::Pruned,
        TreeParent::Pruned,
    ];
    assert_eq!(result.parents, expected);
    assert_eq!(result.root, Some(1));
    assert_eq!(result.costs[0], 0.0);
    assert_eq!(result.costs[3], 8.0);
    assert_eq!(result.costs[5], 3.0);
    assert_eq!(result.costs[6], 4.0);
}

#[test]
fn expensive_edges_are_cut_from_a_path() {
    let (tree, mut inclusion) = tree_over(4, &[(1, 2, 10.0)]);
    inclusion.exclude(0);
    inclusion.exclude(3);
    let result = prune(&tree, &[20.0; 4], inclusion);

    assert_eq!(result.parents[0], TreeParent::Pruned);
    assert_eq!(result.parents[3], TreeParent::Pruned);
    assert_eq!(result.parents[1], TreeParent::Node(2));
    assert_eq!(result.parents[2], TreeParent::Root);
    assert_eq!(result.costs[1], 10.0);
}

#[rstest]
#[case::break_even([5.0, 5.0], 5.0, [TreeParent::Node(1), TreeParent::Root])]
#[case::profit([5.0, 1.0], 1.0, [TreeParent::Node(1), TreeParent::Root])]
#[case::poor_root_breaks_even([5.0, 1.0], 5.0, [TreeParent::Root, TreeParent::Pruned])]
#[case::loss([5.0, 1.0], 5.5, [TreeParent::Root, TreeParent::Pruned])]
fn ties_keep_the_subtree(
    #[case] prizes: [f64; 2],
    #[case] cost: f64,
    #[case] expected: [TreeParent; 2],
) {
    let (tree, inclusion) = tree_over(2, &[(0, 1, cost)]);
    let result = prune(&tree, &prizes, inclusion);
    assert_eq!(result.parents, expected);
}

#[test]
fn leaf_root_that_does_not_pay_for_its_edge_is_dropped() {
    // Peeling ends at node 1, but its prize does not cover the edge to 0.
    let (tree, inclusion) = tree_over(3, &[(0, 1, 10.0)]);
    let prizes = [1000.0, 1.0, 500.0];
    let result = prune(&tree, &prizes, inclusion);

    assert_eq!(
        result.parents,
        vec![TreeParent::Root, TreeParent::Pruned, TreeParent::Pruned]
    );
    assert_eq!(result.root, Some(0));
    assert_eq!(result.costs[0], 0.0);
}

#[test]
fn best_component_wins() {
    // Component {0, 1} nets 3, component {2, 3} nets 4, node 4 alone nets 2.
    let (tree, inclusion) = tree_over(5, &[(0, 1, 1.0), (2, 3, 2.0)]);
    let result = prune(&tree, &[2.0, 2.0, 3.0, 3.0, 2.0], inclusion);

    assert_eq!(result.parents[0], TreeParent::Pruned);
    assert_eq!(result.parents[1], TreeParent::Pruned);
    assert_eq!(result.parents[4], TreeParent::Pruned);
    assert_eq!(result.root, Some(3));
    assert_eq!(result.parents[2], TreeParent::Node(3));
}

#[test]
fn first_component_wins_ties() {
    let (tree, inclusion) = tree_over(2, &[]);
    let result = prune(&tree, &[4.0, 4.0], inclusion);
    assert_eq!(result.parents, vec![TreeParent::Root, TreeParent::Pruned]);
}

#[test]
fn empty_inclusion_prunes_everything() {
    let (tree, _) = tree_over(3, &[(0, 1, 1.0)]);
    let result = prune(&tree, &[1.0; 3], InclusionSet::new(3));
    assert_eq!(result.root, None);
    assert!(result.parents.iter().all(|parent| *parent == TreeParent::Pruned));
}

#[test]
fn long_paths_do_not_recurse() {
    let nodes = 200_000;
    let edges: Vec<_> = (1..nodes).map(|node| (node - 1, node, 1.0)).collect();
    let (tree, inclusion) = tree_over(nodes, &edges);
    let prizes = vec![1.0; nodes];

    let result = prune(&tree, &prizes, inclusion.clone());
    assert!(result.parents.iter().all(|parent| *parent != TreeParent::Pruned));

    let mut severed = StrongPruning::new(&tree, &prizes, inclusion);
    severed.set_nodes_as_invalid(0, None);
    assert_eq!(severed.inclusion().count(), 0);
}

#[test]
fn invalidation_stops_at_the_excluded_neighbour() {
    let (tree, inclusion) = tree_over(5, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)]);
    let mut pruning = StrongPruning::new(&tree, &[0.0; 5], inclusion);
    pruning.set_nodes_as_invalid(2, Some(1));
    let kept: Vec<usize> = pruning.inclusion().iter().collect();
    assert_eq!(kept, vec![0, 1]);
}

fn random_tree() -> impl Strategy<Value = (Vec<(usize, usize, f64)>, Vec<f64>)> {
    (2_usize..40).prop_flat_map(|nodes| {
        let parents = prop::collection::vec((any::<prop::sample::Index>(), 0.0..10.0_f64), nodes - 1);
        let prizes = prop::collection::vec(0.0..10.0_f64, nodes);
        (parents, prizes).prop_map(|(links, prizes)| {
            let edges = links
                .into_iter()
                .enumerate()
                .map(|(offset, (index, cost))| {
                    let child = offset + 1;
                    (index.index(child), child, cost)
                })
                .collect();
            (edges, prizes)
        })
    })
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn pruning_yields_one_rooted_tree((edges, prizes) in random_tree()) {
        let (tree, inclusion) = tree_over(prizes.len(), &edges);
        let before = inclusion.count();
        let mut pruning = StrongPruning::new(&tree, &prizes, inclusion);
        pruning.perform_pruning(&mut NoopProgressTracker);
        let result = pruning.result_tree();

        let kept = result.parents.iter().filter(|p| **p != TreeParent::Pruned).count();
        prop_assert!(kept <= before);
        prop_assert_eq!(kept, pruning.inclusion().count());
        let roots = result.parents.iter().filter(|p| **p == TreeParent::Root).count();
        prop_assert_eq!(roots, 1);

        let mut net = 0.0;
        for (node, parent) in result.parents.iter().enumerate() {
            match parent {
                TreeParent::Node(up) => {
                    prop_assert_ne!(result.parents[*up], TreeParent::Pruned);
                    net += prizes[node] - result.costs[node];
                }
                TreeParent::Root => net += prizes[node],
                TreeParent::Pruned => {}
            }
        }
        prop_assert!(net >= -1e-9);
    }
}
