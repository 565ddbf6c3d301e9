//! Arena-backed tree over a flattened row-major array.
//!
//! A node at depth `d` spans dimensions `d..rank` of the source array. Leaves
//! sit at depth `rank` and refer to one source element by its flat index.
//! Child and mirror relations are stored as [`NodeId`] lists into the same
//! arena, so nothing in the tree borrows the source data.

use crate::error::{Error, Result};

/// Stable index of a node inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the padding tree.
///
/// A leaf has `value` set and no children. An interior node has children and
/// the mirror lists computed by [`crate::padding`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub(crate) value: Option<usize>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) left_mirror: Vec<NodeId>,
    pub(crate) right_mirror: Vec<NodeId>,
}

impl Node {
    /// Flat index of the source element this leaf refers to.
    #[inline]
    pub fn value(&self) -> Option<usize> {
        self.value
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn left_mirror(&self) -> &[NodeId] {
        &self.left_mirror
    }

    #[inline]
    pub fn right_mirror(&self) -> &[NodeId] {
        &self.right_mirror
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.value.is_some()
    }
}

/// Pre-sized node storage for one padding call.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arena with room for the whole tree of `shape`.
    pub fn with_shape(shape: &[usize]) -> Self {
        Self {
            nodes: Vec::with_capacity(Self::node_count(shape)),
        }
    }

    /// Number of nodes needed for `shape`: the root, every interior level and
    /// the leaves.
    ///
    /// For `[2, 3]` this is `1 + 2 + 6`.
    pub fn node_count(shape: &[usize]) -> usize {
        shape
            .iter()
            .scan(1usize, |level, &size| {
                *level *= size;
                Some(*level)
            })
            .sum::<usize>()
            + 1
    }

    /// Drops every node but keeps the allocation, growing it if `shape` needs
    /// more room than the previous call.
    pub fn reset(&mut self, shape: &[usize]) {
        self.nodes.clear();
        let needed = Self::node_count(shape);
        if self.nodes.capacity() < needed {
            tracing::trace!(
                capacity = self.nodes.capacity(),
                needed,
                "growing padding arena"
            );
            self.nodes.reserve_exact(needed);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn alloc(&mut self) -> NodeId {
        self.nodes.push(Node::default());
        NodeId(self.nodes.len() - 1)
    }

    /// Builds the tree of a `shape` array whose flat source holds
    /// `source_len` elements and returns the root.
    ///
    /// Levels are built breadth first, so the last level holds the leaves in
    /// row-major order and leaf `i` refers to flat element `i`.
    pub fn build(&mut self, shape: &[usize], source_len: usize) -> Result<NodeId> {
        self.reset(shape);

        let root = self.alloc();
        let mut current = vec![root];
        let mut next = Vec::new();

        for &size in shape {
            next.clear();
            next.reserve(current.len() * size);
            for &parent in &current {
                let children = (0..size).map(|_| self.alloc()).collect::<Vec<_>>();
                next.extend_from_slice(&children);
                self.node_mut(parent).children = children;
            }
            std::mem::swap(&mut current, &mut next);
        }

        let expected = current.len();
        let mut source = 0..source_len;
        for &leaf in &current {
            let flat_index = source.next().ok_or(Error::ShapeMismatch {
                expected,
                actual: source_len,
            })?;
            self.node_mut(leaf).value = Some(flat_index);
        }
        if source.next().is_some() {
            return Err(Error::ShapeMismatch {
                expected,
                actual: source_len,
            });
        }

        debug_assert_eq!(self.nodes.len(), Self::node_count(shape));

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_count_matches_levels() {
        assert_eq!(Arena::node_count(&[4]), 1 + 4);
        assert_eq!(Arena::node_count(&[2, 3]), 1 + 2 + 6);
        assert_eq!(Arena::node_count(&[2, 3, 4]), 1 + 2 + 6 + 24);
        assert_eq!(Arena::node_count(&[2, 0, 4]), 1 + 2);
    }

    #[test]
    fn build_links_levels_in_order() {
        let mut arena = Arena::with_shape(&[2, 3]);
        let root = arena.build(&[2, 3], 6).unwrap();

        assert_eq!(arena.len(), Arena::node_count(&[2, 3]));

        let rows = arena.node(root).children().to_vec();
        assert_eq!(rows.len(), 2);

        let leaves = rows
            .iter()
            .flat_map(|&row| {
                assert_eq!(arena.node(row).children().len(), 3);
                arena.node(row).children().to_vec()
            })
            .map(|leaf| {
                let node = arena.node(leaf);
                assert!(node.is_leaf());
                assert!(node.children().is_empty());
                node.value().unwrap()
            })
            .collect::<Vec<_>>();

        assert_eq!(leaves, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn interior_nodes_are_never_leaves() {
        let mut arena = Arena::new();
        arena.build(&[3, 2, 2], 12).unwrap();

        let leaves = (0..arena.len())
            .map(|i| arena.node(NodeId(i)))
            .filter(|node| {
                assert!(node.is_leaf() != !node.children().is_empty());
                node.is_leaf()
            })
            .count();
        assert_eq!(leaves, 12);
    }

    #[test]
    fn short_source_is_rejected() {
        let mut arena = Arena::new();
        assert_eq!(
            arena.build(&[2, 3], 5),
            Err(Error::ShapeMismatch {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn long_source_is_rejected() {
        let mut arena = Arena::new();
        assert_eq!(
            arena.build(&[4], 7),
            Err(Error::ShapeMismatch {
                expected: 4,
                actual: 7
            })
        );
    }

    #[test]
    fn reset_keeps_allocation() {
        let mut arena = Arena::with_shape(&[3, 3]);
        arena.build(&[3, 3], 9).unwrap();
        let capacity = arena.capacity();

        arena.build(&[3, 3], 9).unwrap();
        assert_eq!(arena.capacity(), capacity);
        assert_eq!(arena.len(), Arena::node_count(&[3, 3]));
    }
}
