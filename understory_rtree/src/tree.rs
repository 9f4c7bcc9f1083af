// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The R-tree engine.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::mem;

use tracing::{debug, trace};

use crate::bulk;
use crate::error::ConfigError;
use crate::format::{AccessorFn, Bounded, Fields, Format, ToAabb};
use crate::node::{Children, Entry, Node};
use crate::params::Params;
use crate::types::{Aabb, Scalar};

/// A height-balanced R-tree over `D`-dimensional boxes.
///
/// - `I`: stored item type.
/// - `T`: coordinate scalar.
/// - `A`: accessor mapping items to boxes, [`Fields`] by default.
///
/// Every item's box is computed once when it enters the tree. Mutating
/// operations return `&mut Self` so calls can be chained.
///
/// ```rust
/// use understory_rtree::{Aabb3D, RTree};
///
/// let mut tree: RTree<Aabb3D<f64>, f64, 3> = RTree::new();
/// tree.load((0..100).map(|i| {
///     let v = f64::from(i);
///     Aabb3D::new([v, v, v], [v + 1.0, v + 1.0, v + 1.0])
/// }));
/// tree.insert(Aabb3D::new([-5.0; 3], [-4.0; 3]));
///
/// let hits = tree.search(&Aabb3D::new([9.5; 3], [11.5; 3]));
/// assert_eq!(hits.len(), 3);
/// assert!(tree.collides(&Aabb3D::new([-4.5; 3], [-4.5; 3])));
/// ```
pub struct RTree<I, T, const D: usize, A = Fields> {
    params: Params,
    root: Node<I, T, D>,
    accessor: A,
}

/// Something waiting to be attached at a given depth of the tree.
enum Pending<I, T, const D: usize> {
    Entry(Entry<I, T, D>),
    Node(Node<I, T, D>),
}

impl<I, T: Copy, const D: usize> Pending<I, T, D> {
    fn bbox(&self) -> Aabb<T, D> {
        match self {
            Self::Entry(entry) => entry.bbox,
            Self::Node(node) => node.bbox,
        }
    }
}

impl<I: Bounded<T, D>, T: Scalar, const D: usize> RTree<I, T, D, Fields> {
    /// An empty tree with default parameters.
    pub fn new() -> Self {
        Self::with_params(Params::default(), Fields)
    }

    /// An empty tree with the given node capacity (clamped to at least 8).
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self::with_params(Params::new(max_entries), Fields)
    }
}

impl<I: Bounded<T, D>, T: Scalar, const D: usize> Default for RTree<I, T, D, Fields> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T: Scalar, const D: usize> RTree<I, T, D, Format<I, T, D>> {
    /// An empty tree reading item boxes through `format`.
    pub fn with_format(params: Params, format: Format<I, T, D>) -> Self {
        Self::with_params(params, format)
    }

    /// An empty tree reading item boxes through a flat accessor list
    /// `[min0, max0, min1, max1, ...]`.
    ///
    /// See [`Format::from_accessors`] for the validation performed.
    pub fn with_accessors(
        params: Params,
        accessors: &[AccessorFn<I, T>],
    ) -> Result<Self, ConfigError> {
        Ok(Self::with_format(params, Format::from_accessors(accessors)?))
    }
}

impl<I, T: Scalar, const D: usize, A: ToAabb<I, T, D>> RTree<I, T, D, A> {
    /// An empty tree with explicit parameters and accessor.
    pub fn with_params(params: Params, accessor: A) -> Self {
        Self {
            params,
            root: Node::new(),
            accessor,
        }
    }

    /// Node capacity settings.
    pub fn params(&self) -> Params {
        self.params
    }

    /// The box the configured accessor computes for `item`.
    pub fn to_aabb(&self, item: &I) -> Aabb<T, D> {
        self.accessor.to_aabb(item)
    }

    /// The root node, for inspection.
    pub fn root(&self) -> &Node<I, T, D> {
        &self.root
    }

    /// Height of the tree; 1 while the root is a leaf.
    pub fn height(&self) -> usize {
        self.root.height
    }

    /// Number of stored items. Walks the tree.
    pub fn len(&self) -> usize {
        self.root.count_items()
    }

    /// Whether the tree stores no items.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Insert a single item.
    pub fn insert(&mut self, item: I) -> &mut Self {
        let bbox = self.accessor.to_aabb(&item);
        self.insert_entry(Entry { bbox, item });
        self
    }

    /// Insert many items at once.
    ///
    /// Batches smaller than the minimum fill are inserted one by one. Larger
    /// batches are bulk-built into a separate subtree which is then merged in:
    /// adopted as the root of an empty tree, paired with the root under a new
    /// root when heights match, or otherwise grafted into the taller tree at
    /// the level matching its height.
    pub fn load<It: IntoIterator<Item = I>>(&mut self, items: It) -> &mut Self {
        let accessor = &self.accessor;
        let entries: Vec<_> = items
            .into_iter()
            .map(|item| Entry {
                bbox: accessor.to_aabb(&item),
                item,
            })
            .collect();
        let count = entries.len();
        if count == 0 {
            return self;
        }

        if count < self.params.min_entries() {
            for entry in entries {
                self.insert_entry(entry);
            }
            debug!(count, strategy = "insert", height = self.root.height, "load");
            return self;
        }

        let mut node = bulk::build(entries, self.params.max_entries());
        let strategy = if self.root.is_empty() {
            self.root = node;
            "adopt"
        } else if self.root.height == node.height {
            self.grow_root(node);
            "merge-root"
        } else {
            if self.root.height < node.height {
                mem::swap(&mut self.root, &mut node);
            }
            let level = self.root.height - node.height - 1;
            self.insert_at(Pending::Node(node), level);
            "graft"
        };
        debug!(count, strategy, height = self.root.height, "load");
        self
    }

    /// Remove the first item equal to `item`.
    ///
    /// Does nothing if no stored item matches.
    pub fn remove(&mut self, item: &I) -> &mut Self
    where
        I: PartialEq,
    {
        self.take_by(item, |a, b| a == b);
        self
    }

    /// Remove the first item for which `equals(item, stored)` holds.
    ///
    /// Only subtrees whose box contains `item`'s box are searched, so the
    /// probe must map to the same box as the stored item.
    pub fn remove_by<F>(&mut self, item: &I, equals: F) -> &mut Self
    where
        F: FnMut(&I, &I) -> bool,
    {
        self.take_by(item, equals);
        self
    }

    /// Like [`remove`](Self::remove), but hands back the removed item.
    pub fn take(&mut self, item: &I) -> Option<I>
    where
        I: PartialEq,
    {
        self.take_by(item, |a, b| a == b)
    }

    /// Like [`remove_by`](Self::remove_by), but hands back the removed item.
    pub fn take_by<F>(&mut self, item: &I, mut equals: F) -> Option<I>
    where
        F: FnMut(&I, &I) -> bool,
    {
        let bbox = self.accessor.to_aabb(item);
        let (path, index) = locate(&self.root, &bbox, |stored| equals(item, stored))?;
        let entry = descend_mut(&mut self.root, &path).take_entry(index)?;
        self.condense(&path);
        Some(entry.item)
    }

    /// Drop every item, keeping the configuration.
    pub fn clear(&mut self) -> &mut Self {
        self.root = Node::new();
        self
    }

    /// Every item whose box intersects `bbox`. Order is unspecified.
    pub fn search(&self, bbox: &Aabb<T, D>) -> Vec<&I> {
        let mut out = Vec::new();
        if !bbox.intersects(&self.root.bbox) {
            return out;
        }
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match &node.children {
                Children::Leaf(entries) => out.extend(
                    entries
                        .iter()
                        .filter(|e| bbox.intersects(&e.bbox))
                        .map(|e| &e.item),
                ),
                Children::Internal(nodes) => {
                    for child in nodes.iter().filter(|c| bbox.intersects(&c.bbox)) {
                        if bbox.contains(&child.bbox) {
                            child.collect_items(&mut out);
                        } else {
                            stack.push(child);
                        }
                    }
                }
            }
        }
        out
    }

    /// Whether any item's box intersects `bbox`.
    pub fn collides(&self, bbox: &Aabb<T, D>) -> bool {
        if !bbox.intersects(&self.root.bbox) {
            return false;
        }
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match &node.children {
                Children::Leaf(entries) => {
                    if entries.iter().any(|e| bbox.intersects(&e.bbox)) {
                        return true;
                    }
                }
                Children::Internal(nodes) => {
                    for child in nodes.iter().filter(|c| bbox.intersects(&c.bbox)) {
                        if bbox.contains(&child.bbox) {
                            return true;
                        }
                        stack.push(child);
                    }
                }
            }
        }
        false
    }

    /// Every stored item. Order is unspecified.
    pub fn all(&self) -> Vec<&I> {
        self.root.items()
    }

    /// A deep copy of the root node.
    pub fn to_snapshot(&self) -> Node<I, T, D>
    where
        I: Clone,
    {
        self.root.clone()
    }

    /// Consume the tree, returning its root node.
    pub fn into_snapshot(self) -> Node<I, T, D> {
        self.root
    }

    /// Replace the contents with `root`.
    ///
    /// The node is adopted as is; its boxes, heights and fill are trusted.
    pub fn from_snapshot(&mut self, root: Node<I, T, D>) -> &mut Self {
        self.root = root;
        debug!(height = self.root.height, "adopted snapshot");
        self
    }

    fn insert_entry(&mut self, entry: Entry<I, T, D>) {
        let level = self.root.height - 1;
        self.insert_at(Pending::Entry(entry), level);
    }

    /// Attach `pending` to a node at depth `level` (or the leaf reached first),
    /// then split overflowing nodes upward and widen the remaining ancestors.
    fn insert_at(&mut self, pending: Pending<I, T, D>, level: usize) {
        let bbox = pending.bbox();
        let path = self.choose_subtree(&bbox, level);

        let target = descend_mut(&mut self.root, &path);
        match pending {
            Pending::Entry(entry) => target.push_entry(entry),
            Pending::Node(node) => target.push_node(node),
        }
        target.bbox.extend(&bbox);

        let max_entries = self.params.max_entries();
        let min_entries = self.params.min_entries();
        let mut depth = path.len();
        loop {
            let node = descend_mut(&mut self.root, &path[..depth]);
            if node.len() <= max_entries {
                break;
            }
            let sibling = node.split(min_entries);
            match depth.checked_sub(1) {
                Some(parent) => {
                    descend_mut(&mut self.root, &path[..parent]).push_node(sibling);
                    depth = parent;
                }
                None => {
                    self.grow_root(sibling);
                    return;
                }
            }
        }

        let mut node = &mut self.root;
        node.bbox.extend(&bbox);
        for &index in &path[..depth] {
            node = &mut node.nodes_mut()[index];
            node.bbox.extend(&bbox);
        }
    }

    /// Index path from the root to the node that should receive `bbox`.
    fn choose_subtree(&self, bbox: &Aabb<T, D>, level: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut node = &self.root;
        while !node.is_leaf() && path.len() < level {
            let Some(index) = choose_child(node.nodes(), bbox) else {
                break;
            };
            path.push(index);
            node = &node.nodes()[index];
        }
        path
    }

    /// Put the current root and `sibling` under a new root one level higher.
    fn grow_root(&mut self, sibling: Node<I, T, D>) {
        let old = mem::take(&mut self.root);
        let height = old.height + 1;
        self.root = Node::internal(vec![old, sibling], height);
        trace!(height, "root split");
    }

    /// Walk `path` from the leaf back to the root, pruning emptied nodes and
    /// tightening the boxes of the rest.
    fn condense(&mut self, path: &[usize]) {
        for depth in (0..=path.len()).rev() {
            let node = descend_mut(&mut self.root, &path[..depth]);
            if !node.is_empty() {
                node.recalc_bbox();
                continue;
            }
            match depth.checked_sub(1) {
                Some(parent) => {
                    descend_mut(&mut self.root, &path[..parent]).remove_node(path[parent]);
                }
                None => {
                    self.root = Node::new();
                    trace!("removal emptied the tree");
                }
            }
        }
    }
}

/// Child needing the least volume enlargement to cover `bbox`; smaller volume
/// breaks ties, then position.
fn choose_child<I, T: Scalar, const D: usize>(
    nodes: &[Node<I, T, D>],
    bbox: &Aabb<T, D>,
) -> Option<usize> {
    let mut best: Option<(usize, T::Acc, T::Acc)> = None;
    for (index, child) in nodes.iter().enumerate() {
        let volume = child.bbox.volume();
        let enlargement = T::acc_sub(child.bbox.enlarged_volume(bbox), volume);
        let better = match best {
            None => true,
            Some((_, best_enlargement, best_volume)) => {
                enlargement < best_enlargement
                    || (enlargement == best_enlargement && volume < best_volume)
            }
        };
        if better {
            best = Some((index, enlargement, volume));
        }
    }
    best.map(|(index, _, _)| index)
}

/// Find a stored item accepted by `matches`, returning the index path to its
/// leaf and its position there.
///
/// Leaves are scanned without a box test; internal nodes are entered only when
/// their box contains `bbox`.
fn locate<I, T: Scalar, const D: usize>(
    root: &Node<I, T, D>,
    bbox: &Aabb<T, D>,
    mut matches: impl FnMut(&I) -> bool,
) -> Option<(Vec<usize>, usize)> {
    let mut find = |leaf: &Node<I, T, D>| leaf.entries().iter().position(|e| matches(&e.item));
    if root.is_leaf() {
        return find(root).map(|index| (Vec::new(), index));
    }
    if !root.bbox.contains(bbox) {
        return None;
    }

    // One stack frame per node on the current path, with the next child to visit.
    let mut stack = vec![(root, 0_usize)];
    let mut path = Vec::new();
    while let Some(top) = stack.last_mut() {
        let (node, next) = *top;
        top.1 += 1;
        let Some(child) = node.nodes().get(next) else {
            stack.pop();
            path.pop();
            continue;
        };
        if child.is_leaf() {
            if let Some(index) = find(child) {
                path.push(next);
                return Some((path, index));
            }
        } else if child.bbox.contains(bbox) {
            path.push(next);
            stack.push((child, 0));
        }
    }
    None
}

fn descend_mut<'a, I, T: Scalar, const D: usize>(
    mut node: &'a mut Node<I, T, D>,
    path: &[usize],
) -> &'a mut Node<I, T, D> {
    for &index in path {
        node = &mut node.nodes_mut()[index];
    }
    node
}

impl<I, T: Scalar, const D: usize, A: ToAabb<I, T, D>> Extend<I> for RTree<I, T, D, A> {
    fn extend<It: IntoIterator<Item = I>>(&mut self, iter: It) {
        self.load(iter);
    }
}

impl<I, T, const D: usize, A> FromIterator<I> for RTree<I, T, D, A>
where
    T: Scalar,
    A: ToAabb<I, T, D> + Default,
{
    fn from_iter<It: IntoIterator<Item = I>>(iter: It) -> Self {
        let mut tree = Self::with_params(Params::default(), A::default());
        tree.load(iter);
        tree
    }
}

impl<I, T: Scalar, const D: usize, A> Debug for RTree<I, T, D, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_entries", &self.params.max_entries())
            .field("min_entries", &self.params.min_entries())
            .field("height", &self.root.height)
            .field("len", &self.root.count_items())
            .field("bbox", &self.root.bbox)
            .finish_non_exhaustive()
    }
}
