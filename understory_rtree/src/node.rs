// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes.
//!
//! A [`Node`] owns its children outright: a leaf holds [`Entry`] values (an
//! item with its cached box), an internal node holds child nodes. There are no
//! parent links; operations that walk upward carry the path themselves.
//!
//! Nodes are also the snapshot format: [`RTree::to_snapshot`](crate::RTree::to_snapshot)
//! hands out the root, [`RTree::from_snapshot`](crate::RTree::from_snapshot)
//! adopts one.

use alloc::vec;
use alloc::vec::Vec;

use crate::types::{Aabb, Scalar};

/// An item stored in a leaf, together with the box computed for it on insertion.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<I, T, const D: usize> {
    /// Cached bounding box of `item`.
    pub bbox: Aabb<T, D>,
    /// The stored item.
    pub item: I,
}

/// Children of a node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Children<I, T, const D: usize> {
    /// Items of a leaf node.
    Leaf(Vec<Entry<I, T, D>>),
    /// Child nodes of an internal node; all share the same height.
    Internal(Vec<Node<I, T, D>>),
}

/// A node of the tree.
///
/// `bbox` covers every child; `height` is 1 for leaves and grows by one per level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<I, T, const D: usize> {
    /// Union of the children's boxes.
    pub bbox: Aabb<T, D>,
    /// Distance to the leaf level; leaves have height 1.
    pub height: usize,
    /// Items or child nodes.
    pub children: Children<I, T, D>,
}

/// Anything held in a node's child list.
pub(crate) trait Child<T, const D: usize> {
    fn bbox(&self) -> &Aabb<T, D>;
}

impl<I, T, const D: usize> Child<T, D> for Entry<I, T, D> {
    #[inline]
    fn bbox(&self) -> &Aabb<T, D> {
        &self.bbox
    }
}

impl<I, T, const D: usize> Child<T, D> for Node<I, T, D> {
    #[inline]
    fn bbox(&self) -> &Aabb<T, D> {
        &self.bbox
    }
}

/// Union of the boxes of `children`; the empty box when there are none.
pub(crate) fn children_bbox<C, T, const D: usize>(children: &[C]) -> Aabb<T, D>
where
    C: Child<T, D>,
    T: Scalar,
{
    children.iter().fold(Aabb::empty(), |mut acc, c| {
        acc.extend(c.bbox());
        acc
    })
}

impl<I, T: Scalar, const D: usize> Node<I, T, D> {
    /// An empty leaf of height 1.
    pub fn new() -> Self {
        Self::leaf(Vec::new())
    }

    /// A leaf holding `entries`, with its box computed from them.
    pub fn leaf(entries: Vec<Entry<I, T, D>>) -> Self {
        Self {
            bbox: children_bbox(&entries),
            height: 1,
            children: Children::Leaf(entries),
        }
    }

    /// An internal node of the given height holding `nodes`.
    pub fn internal(nodes: Vec<Self>, height: usize) -> Self {
        Self {
            bbox: children_bbox(&nodes),
            height,
            children: Children::Internal(nodes),
        }
    }

    /// Whether this node stores items rather than nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self.children, Children::Leaf(_))
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        match &self.children {
            Children::Leaf(entries) => entries.len(),
            Children::Internal(nodes) => nodes.len(),
        }
    }

    /// Whether this node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Leaf entries; empty for internal nodes.
    pub fn entries(&self) -> &[Entry<I, T, D>] {
        match &self.children {
            Children::Leaf(entries) => entries,
            Children::Internal(_) => &[],
        }
    }

    /// Child nodes; empty for leaves.
    pub fn nodes(&self) -> &[Self] {
        match &self.children {
            Children::Leaf(_) => &[],
            Children::Internal(nodes) => nodes,
        }
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Self] {
        match &mut self.children {
            Children::Leaf(_) => &mut [],
            Children::Internal(nodes) => nodes,
        }
    }

    /// Every item below this node, in traversal order.
    pub fn items(&self) -> Vec<&I> {
        let mut out = Vec::new();
        self.collect_items(&mut out);
        out
    }

    /// Number of items below this node.
    pub fn count_items(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match &node.children {
                Children::Leaf(entries) => count += entries.len(),
                Children::Internal(nodes) => stack.extend(nodes.iter()),
            }
        }
        count
    }

    pub(crate) fn collect_items<'a>(&'a self, out: &mut Vec<&'a I>) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match &node.children {
                Children::Leaf(entries) => out.extend(entries.iter().map(|e| &e.item)),
                Children::Internal(nodes) => stack.extend(nodes.iter()),
            }
        }
    }

    /// Recompute `bbox` from the children.
    pub fn recalc_bbox(&mut self) {
        self.bbox = match &self.children {
            Children::Leaf(entries) => children_bbox(entries),
            Children::Internal(nodes) => children_bbox(nodes),
        };
    }

    pub(crate) fn push_entry(&mut self, entry: Entry<I, T, D>) {
        match &mut self.children {
            Children::Leaf(entries) => entries.push(entry),
            Children::Internal(_) => unreachable!("items are only stored in leaves"),
        }
    }

    pub(crate) fn push_node(&mut self, node: Self) {
        match &mut self.children {
            Children::Internal(nodes) => nodes.push(node),
            Children::Leaf(_) => unreachable!("nodes are only stored in internal nodes"),
        }
    }

    pub(crate) fn take_entry(&mut self, index: usize) -> Option<Entry<I, T, D>> {
        match &mut self.children {
            Children::Leaf(entries) if index < entries.len() => Some(entries.remove(index)),
            _ => None,
        }
    }

    pub(crate) fn remove_node(&mut self, index: usize) -> Option<Self> {
        match &mut self.children {
            Children::Internal(nodes) if index < nodes.len() => Some(nodes.remove(index)),
            _ => None,
        }
    }

    /// Split an overflowing node in two.
    ///
    /// Children are reordered along the chosen split axis; `self` keeps the first
    /// group and the returned sibling, of the same height and kind, takes the rest.
    pub(crate) fn split(&mut self, min_entries: usize) -> Self {
        let height = self.height;
        let sibling = match &mut self.children {
            Children::Leaf(entries) => {
                let at = crate::split::choose_split(entries, min_entries);
                Self::leaf(entries.split_off(at))
            }
            Children::Internal(nodes) => {
                let at = crate::split::choose_split(nodes, min_entries);
                Self::internal(nodes.split_off(at), height)
            }
        };
        self.recalc_bbox();
        sibling
    }
}

impl<I, T: Scalar, const D: usize> Default for Node<I, T, D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(min: [i64; 2], max: [i64; 2], id: u32) -> Entry<u32, i64, 2> {
        Entry {
            bbox: Aabb::new(min, max),
            item: id,
        }
    }

    #[test]
    fn new_node_is_an_empty_leaf() {
        let n: Node<u32, f64, 3> = Node::new();
        assert!(n.is_leaf());
        assert!(n.is_empty());
        assert_eq!(n.height, 1);
        assert_eq!(n.bbox, Aabb::empty());
    }

    #[test]
    fn leaf_box_covers_entries() {
        let n = Node::leaf(vec![entry([0, 0], [1, 1], 1), entry([5, -2], [6, 3], 2)]);
        assert_eq!(n.bbox, Aabb::new([0, -2], [6, 3]));
        assert_eq!(n.len(), 2);
    }

    #[test]
    fn internal_box_covers_children() {
        let a = Node::leaf(vec![entry([0, 0], [1, 1], 1)]);
        let b = Node::leaf(vec![entry([10, 10], [11, 11], 2)]);
        let n = Node::internal(vec![a, b], 2);
        assert!(!n.is_leaf());
        assert_eq!(n.bbox, Aabb::new([0, 0], [11, 11]));
        assert_eq!(n.count_items(), 2);
        let mut items = n.items();
        items.sort();
        assert_eq!(items, [&1, &2]);
    }

    #[test]
    fn take_entry_out_of_range_is_none() {
        let mut n = Node::leaf(vec![entry([0, 0], [1, 1], 1)]);
        assert!(n.take_entry(3).is_none());
        assert!(n.remove_node(0).is_none());
        assert_eq!(n.take_entry(0).map(|e| e.item), Some(1));
        n.recalc_bbox();
        assert_eq!(n.bbox, Aabb::empty());
    }

    #[test]
    fn split_keeps_height_and_kind() {
        // Nine entries in two clusters along x.
        let mut entries = Vec::new();
        for i in 0..5_u32 {
            let x = i64::from(i);
            entries.push(entry([x, 0], [x, 1], i));
        }
        for i in 0..4_u32 {
            let x = 100 + i64::from(i);
            entries.push(entry([x, 0], [x, 1], 10 + i));
        }
        let mut n = Node::leaf(entries);
        let sibling = n.split(4);
        assert!(sibling.is_leaf());
        assert_eq!(sibling.height, 1);
        assert_eq!(n.len() + sibling.len(), 9);
        assert!(n.len() >= 4 && sibling.len() >= 4);
        assert!(!n.bbox.intersects(&sibling.bbox));
        assert_eq!(n.bbox.union(&sibling.bbox), Aabb::new([0, 0], [103, 1]));
    }
}
