//! Mergeable min-heap with lazy batch key increases.
//!
//! Each cluster of the growth phase owns one heap of pending edge events.
//! Clusters absorb each other wholesale and shift every pending event by the
//! same delta when an inactive cluster resumes growing, so the heap supports
//! constant-time `join` and `increase_values`.
//!
//! The increase is recorded on the root as an offset owed to all of its
//! descendants. The offset is pushed into a child only when that child is
//! disturbed: when its parent is popped, or when it is linked below another
//! root (which cancels the offset it would otherwise inherit).

use std::{fmt, mem};

struct Node<T> {
    element: T,
    value: f64,
    /// Offset owed to every descendant, not to the node itself.
    pending: f64,
    children: Vec<Box<Node<T>>>,
}

/// Pairing heap of `(element, value)` pairs ordered by ascending value.
pub(crate) struct PairingHeap<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> Default for PairingHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PairingHeap<T> {
    pub(crate) const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    #[cfg(test)]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn add(&mut self, element: T, value: f64) {
        let node = Box::new(Node {
            element,
            value,
            pending: 0.0,
            children: Vec::new(),
        });
        self.root = Some(match self.root.take() {
            Some(root) => link(root, node),
            None => node,
        });
        self.len += 1;
    }

    /// Returns the element with the smallest value, if any.
    pub(crate) fn min_element(&self) -> Option<&T> {
        self.root.as_ref().map(|root| &root.element)
    }

    /// Returns the smallest value, if any.
    pub(crate) fn min_value(&self) -> Option<f64> {
        self.root.as_ref().map(|root| root.value)
    }

    /// Removes and returns the minimum pair.
    pub(crate) fn pop(&mut self) -> Option<(T, f64)> {
        let root = self.root.take()?;
        let Node {
            element,
            value,
            pending,
            children,
        } = *root;
        self.len -= 1;
        self.root = merge_pairs(children, pending);
        Some((element, value))
    }

    /// Melds `other` into `self`. `other` is consumed.
    pub(crate) fn join(&mut self, mut other: Self) {
        self.len += mem::take(&mut other.len);
        self.root = match (self.root.take(), other.root.take()) {
            (Some(left), Some(right)) => Some(link(left, right)),
            (left, right) => left.or(right),
        };
    }

    /// Adds `delta` to the value of every element in constant time.
    pub(crate) fn increase_values(&mut self, delta: f64) {
        if let Some(root) = self.root.as_mut() {
            root.value += delta;
            root.pending += delta;
        }
    }
}

impl<T> Drop for PairingHeap<T> {
    fn drop(&mut self) {
        // Pairing heaps can degenerate into long chains; tear them down
        // iteratively so dropping never recurses.
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PairingHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairingHeap")
            .field("len", &self.len)
            .field("min_element", &self.min_element())
            .field("min_value", &self.min_value())
            .finish()
    }
}

fn link<T>(mut first: Box<Node<T>>, mut second: Box<Node<T>>) -> Box<Node<T>> {
    if second.value < first.value {
        mem::swap(&mut first, &mut second);
    }
    second.value -= first.pending;
    second.pending -= first.pending;
    first.children.push(second);
    first
}

fn merge_pairs<T>(children: Vec<Box<Node<T>>>, pending: f64) -> Option<Box<Node<T>>> {
    let mut paired = Vec::with_capacity(children.len().div_ceil(2));
    let mut settled = children.into_iter().map(|mut child| {
        child.value += pending;
        child.pending += pending;
        child
    });
    while let Some(first) = settled.next() {
        match settled.next() {
            Some(second) => paired.push(link(first, second)),
            None => paired.push(first),
        }
    }

    let mut merged = paired.pop()?;
    while let Some(next) = paired.pop() {
        merged = link(next, merged);
    }
    Some(merged)
}

#[cfg(test)]
mod tests;
