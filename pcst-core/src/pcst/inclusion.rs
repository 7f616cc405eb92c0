//! Set of original nodes still considered for the final tree.
//!
//! Growth produces it, tree construction reads it and pruning shrinks it.

use fixedbitset::FixedBitSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct InclusionSet {
    nodes: FixedBitSet,
}

impl InclusionSet {
    /// Creates an empty set over `node_count` nodes.
    pub(crate) fn new(node_count: usize) -> Self {
        Self {
            nodes: FixedBitSet::with_capacity(node_count),
        }
    }

    pub(crate) fn include(&mut self, node: usize) {
        self.nodes.insert(node);
    }

    pub(crate) fn exclude(&mut self, node: usize) {
        self.nodes.set(node, false);
    }

    pub(crate) fn is_included(&self, node: usize) -> bool {
        self.nodes.contains(node)
    }

    pub(crate) fn count(&self) -> usize {
        self.nodes.count_ones(..)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.ones()
    }
}

impl From<FixedBitSet> for InclusionSet {
    fn from(nodes: FixedBitSet) -> Self {
        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_and_exclude_round_out_membership() {
        let mut set = InclusionSet::new(6);
        set.include(1);
        set.include(4);
        set.include(4);
        assert_eq!(set.count(), 2);
        set.exclude(1);
        set.exclude(3);
        assert!(!set.is_included(1));
        assert!(set.is_included(4));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn from_bitset_keeps_members() {
        let mut bits = FixedBitSet::with_capacity(4);
        bits.insert(0);
        bits.insert(2);
        let set = InclusionSet::from(bits);
        assert_eq!(set.count(), 2);
        assert!(set.is_included(2));
    }
}
