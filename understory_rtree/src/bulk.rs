// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-down bulk construction (OMT).
//!
//! The item set is cut into a `c^D` grid of tiles, axis 0 first, with each
//! tile holding one child subtree's worth of items. Tiles are formed with
//! [`multiselect`] rather than full sorts, and every child recurses one level
//! down until the leaf level is reached.
//!
//! At the top the target height `h` is the smallest with `M^h >= N`, and the
//! root fan-out is reduced to `ceil(N / M^(h-1))` so that lower levels fill up
//! before the root does.

use alloc::vec;
use alloc::vec::Vec;

use crate::axis::Axis;
use crate::node::{Entry, Node};
use crate::select::multiselect;
use crate::types::Scalar;

/// Build a standalone, height-balanced subtree holding `entries`.
pub(crate) fn build<I, T: Scalar, const D: usize>(
    entries: Vec<Entry<I, T, D>>,
    max_entries: usize,
) -> Node<I, T, D> {
    let n = entries.len();
    if n <= max_entries {
        return Node::leaf(entries);
    }
    let height = target_height(n, max_entries);
    let fan = n.div_ceil(saturating_pow(max_entries, height - 1));
    build_level(entries, height, fan, max_entries)
}

fn build_level<I, T: Scalar, const D: usize>(
    mut entries: Vec<Entry<I, T, D>>,
    height: usize,
    fan: usize,
    max_entries: usize,
) -> Node<I, T, D> {
    // Keying the leaf test on height keeps every leaf on the same level, even
    // when a trailing tile ends up small.
    if height <= 1 {
        return Node::leaf(entries);
    }
    let per_child = entries.len().div_ceil(fan);
    let tiles = tile(&mut entries, per_child, slices_per_axis(fan, D));

    let mut children = Vec::with_capacity(tiles.len());
    for &start in tiles.iter().rev() {
        let chunk = entries.split_off(start);
        children.push(build_level(chunk, height - 1, max_entries, max_entries));
    }
    children.reverse();
    Node::internal(children, height)
}

/// Partition `entries` into child-sized tiles and return each tile's start index.
fn tile<I, T: Scalar, const D: usize>(
    entries: &mut [Entry<I, T, D>],
    per_child: usize,
    slices: usize,
) -> Vec<usize> {
    // Tile extent per axis: the last axis cuts child groups, each axis before it
    // spans `slices` tiles of the next.
    let mut sizes = [per_child; D];
    for d in (0..D.saturating_sub(1)).rev() {
        sizes[d] = sizes[d + 1].saturating_mul(slices);
    }

    let mut starts = Vec::new();
    let mut stack = vec![(0_usize, 0_usize, entries.len())];
    while let Some((d, lo, hi)) = stack.pop() {
        let size = sizes[d];
        let axis = Axis::new(d);
        multiselect(&mut entries[lo..hi], size, |a, b| {
            axis.compare_min(&a.bbox, &b.bbox)
        });
        if d + 1 == D {
            starts.extend((lo..hi).step_by(size));
        } else {
            for start in (lo..hi).step_by(size).rev() {
                stack.push((d + 1, start, hi.min(start + size)));
            }
        }
    }
    starts
}

/// Smallest `h >= 1` with `m^h >= n`.
fn target_height(n: usize, m: usize) -> usize {
    let mut height = 1;
    let mut capacity = m;
    while capacity < n {
        capacity = capacity.saturating_mul(m);
        height += 1;
    }
    height
}

/// Smallest `c >= 1` with `c^d >= fan`.
fn slices_per_axis(fan: usize, d: usize) -> usize {
    let mut c = 1;
    while saturating_pow(c, d) < fan {
        c += 1;
    }
    c
}

fn saturating_pow(base: usize, exp: usize) -> usize {
    (0..exp).fold(1_usize, |acc, _| acc.saturating_mul(base))
}
