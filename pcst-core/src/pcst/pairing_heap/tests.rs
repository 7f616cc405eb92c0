//! Unit and property tests for the lazy-offset pairing heap.

use proptest::prelude::*;
use rstest::rstest;

use crate::test_utils::suite_proptest_config;

use super::PairingHeap;

fn drain(heap: &mut PairingHeap<usize>) -> Vec<(usize, f64)> {
    let mut out = Vec::with_capacity(heap.len());
    while let Some(pair) = heap.pop() {
        out.push(pair);
    }
    out
}

fn sorted_oracle(mut pairs: Vec<(usize, f64)>) -> Vec<f64> {
    pairs.sort_by(|left, right| left.1.total_cmp(&right.1));
    pairs.into_iter().map(|(_, value)| value).collect()
}

fn assert_values_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (left, right) in actual.iter().zip(expected) {
        assert!(
            (left - right).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }
}

#[test]
fn empty_heap_reports_no_minimum() {
    let mut heap = PairingHeap::<usize>::new();
    assert!(heap.is_empty());
    assert_eq!(heap.min_element(), None);
    assert_eq!(heap.min_value(), None);
    assert_eq!(heap.pop(), None);
}

#[rstest]
#[case::ascending(vec![1.0, 2.0, 3.0, 4.0])]
#[case::descending(vec![4.0, 3.0, 2.0, 1.0])]
#[case::mixed(vec![3.5, 0.5, 2.25, 9.0, 0.75])]
#[case::duplicates(vec![2.0, 2.0, 1.0, 1.0])]
fn pop_yields_ascending_values(#[case] values: Vec<f64>) {
    let mut heap = PairingHeap::new();
    for (element, value) in values.iter().copied().enumerate() {
        heap.add(element, value);
    }
    assert_eq!(heap.len(), values.len());

    let popped: Vec<f64> = drain(&mut heap).into_iter().map(|(_, v)| v).collect();
    let expected = sorted_oracle(values.into_iter().enumerate().collect());
    assert_values_close(&popped, &expected);
}

#[test]
fn min_element_tracks_smallest_value() {
    let mut heap = PairingHeap::new();
    heap.add(10, 5.0);
    heap.add(11, 1.0);
    heap.add(12, 3.0);
    assert_eq!(heap.min_element(), Some(&11));
    assert_eq!(heap.min_value(), Some(1.0));
    heap.pop();
    assert_eq!(heap.min_element(), Some(&12));
}

#[test]
fn join_interleaves_disjoint_id_ranges() {
    let mut evens = PairingHeap::new();
    let mut odds = PairingHeap::new();
    for id in 0..50_usize {
        let value = id as f64;
        if id & 1 == 0 {
            evens.add(id, value);
        } else {
            odds.add(id, value);
        }
    }

    evens.join(odds);
    assert_eq!(evens.len(), 50);

    let order: Vec<usize> = drain(&mut evens).into_iter().map(|(id, _)| id).collect();
    assert_eq!(order, (0..50).collect::<Vec<_>>());
}

#[test]
fn increase_values_shifts_every_element() {
    let mut heap = PairingHeap::new();
    heap.add(0, 1.0);
    heap.add(1, 4.0);
    heap.add(2, 2.0);
    heap.increase_values(10.0);

    let popped: Vec<(usize, f64)> = drain(&mut heap);
    assert_eq!(
        popped.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
        vec![0, 2, 1]
    );
    assert_values_close(
        &popped.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
        &[11.0, 12.0, 14.0],
    );
}

#[test]
fn increase_survives_nested_joins_with_independent_offsets() {
    let mut first = PairingHeap::new();
    first.add(0, 1.0);
    first.add(1, 5.0);
    first.increase_values(2.0); // 3, 7

    let mut second = PairingHeap::new();
    second.add(2, 4.0);
    second.add(3, 0.5);
    second.increase_values(1.0); // 5, 1.5

    let mut third = PairingHeap::new();
    third.add(4, 6.0);
    third.increase_values(-1.0); // 5

    second.join(third);
    second.increase_values(0.5); // 5.5, 2.0, 5.5
    first.join(second);
    first.increase_values(1.0); // 4, 8, 6.5, 3, 6.5

    let popped = drain(&mut first);
    assert_values_close(
        &popped.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
        &[3.0, 4.0, 6.5, 6.5, 8.0],
    );
    assert_eq!(popped.first().map(|(id, _)| *id), Some(3));
    assert_eq!(popped.last().map(|(id, _)| *id), Some(1));
}

#[test]
fn increase_applies_to_elements_buried_before_pops() {
    let mut heap = PairingHeap::new();
    for id in 0..8_usize {
        heap.add(id, (8 - id) as f64);
    }
    heap.increase_values(3.0);
    let first = heap.pop();
    heap.increase_values(1.0);
    heap.add(100, 9.5);

    assert_eq!(first, Some((7, 4.0)));
    let rest: Vec<f64> = drain(&mut heap).into_iter().map(|(_, v)| v).collect();
    assert_values_close(&rest, &[6.0, 7.0, 8.0, 9.0, 9.5, 10.0, 11.0, 12.0]);
}

#[test]
fn dropping_a_long_chain_does_not_overflow_the_stack() {
    let mut heap = PairingHeap::new();
    for id in 0..200_000_usize {
        heap.add(id, -(id as f64));
    }
    assert_eq!(heap.min_element(), Some(&199_999));
    drop(heap);
}

#[derive(Clone, Debug)]
enum HeapOp {
    Add(f64),
    Pop,
    Increase(f64),
    JoinFresh(Vec<f64>, f64),
}

fn heap_op_strategy() -> impl Strategy<Value = HeapOp> {
    prop_oneof![
        4 => (0.0..100.0_f64).prop_map(HeapOp::Add),
        2 => Just(HeapOp::Pop),
        2 => (0.0..10.0_f64).prop_map(HeapOp::Increase),
        1 => (prop::collection::vec(0.0..100.0_f64, 0..8), 0.0..10.0_f64)
            .prop_map(|(values, offset)| HeapOp::JoinFresh(values, offset)),
    ]
}

fn pop_oracle(oracle: &mut Vec<(usize, f64)>) -> Option<f64> {
    let (index, _) = oracle
        .iter()
        .enumerate()
        .min_by(|left, right| left.1.1.total_cmp(&right.1.1))?;
    Some(oracle.swap_remove(index).1)
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn heap_matches_eager_oracle(ops in prop::collection::vec(heap_op_strategy(), 1..64)) {
        let mut heap = PairingHeap::new();
        let mut oracle: Vec<(usize, f64)> = Vec::new();
        let mut next_id = 0_usize;

        for op in ops {
            match op {
                HeapOp::Add(value) => {
                    heap.add(next_id, value);
                    oracle.push((next_id, value));
                    next_id += 1;
                }
                HeapOp::Pop => {
                    let expected = pop_oracle(&mut oracle);
                    let actual = heap.pop().map(|(_, value)| value);
                    match (expected, actual) {
                        (Some(e), Some(a)) => prop_assert!((e - a).abs() < 1e-6),
                        (None, None) => {}
                        other => prop_assert!(false, "heap and oracle diverged: {other:?}"),
                    }
                }
                HeapOp::Increase(delta) => {
                    heap.increase_values(delta);
                    for entry in &mut oracle {
                        entry.1 += delta;
                    }
                }
                HeapOp::JoinFresh(values, offset) => {
                    let mut fresh = PairingHeap::new();
                    for value in values {
                        fresh.add(next_id, value);
                        oracle.push((next_id, value + offset));
                        next_id += 1;
                    }
                    fresh.increase_values(offset);
                    heap.join(fresh);
                }
            }
            prop_assert_eq!(heap.len(), oracle.len());
        }

        let mut remaining = Vec::new();
        while let Some((_, value)) = heap.pop() {
            remaining.push(value);
        }
        let expected = sorted_oracle(oracle);
        prop_assert_eq!(remaining.len(), expected.len());
        for (actual, wanted) in remaining.iter().zip(&expected) {
            prop_assert!((actual - wanted).abs() < 1e-6);
        }
    }
}
