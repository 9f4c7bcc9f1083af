// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overflow split heuristics.
//!
//! For an overflowing child list of length `n` with minimum fill `m`:
//!
//! 1. For every axis, sort the children by their lower bound on that axis and sum
//!    the margins of both groups over every distribution `k in m..=n-m`. The axis
//!    with the smallest total margin wins; the first such axis on ties.
//! 2. Along the winning axis pick the `k` whose groups overlap least, breaking
//!    ties on the smaller combined volume; again the first such `k` wins.
//!
//! Sorts are stable so that equal keys keep a reproducible order.

use crate::axis::Axis;
use crate::node::{Child, children_bbox};
use crate::types::Scalar;

/// Reorder `children` along the best split axis and return the split index.
pub(crate) fn choose_split<C, T, const D: usize>(children: &mut [C], min_entries: usize) -> usize
where
    C: Child<T, D>,
    T: Scalar,
{
    choose_split_axis(children, min_entries);
    choose_split_index(children, min_entries)
}

fn sort_along<C, T, const D: usize>(children: &mut [C], axis: Axis)
where
    C: Child<T, D>,
    T: Scalar,
{
    children.sort_by(|a, b| axis.compare_min(a.bbox(), b.bbox()));
}

/// Leaves `children` sorted by the axis with the lowest total distribution margin.
fn choose_split_axis<C, T, const D: usize>(children: &mut [C], m: usize)
where
    C: Child<T, D>,
    T: Scalar,
{
    let mut best: Option<(Axis, T::Acc)> = None;
    let mut sorted_by = None;
    for axis in Axis::all::<D>() {
        sort_along(children, axis);
        sorted_by = Some(axis);
        let margin = all_dist_margin(children, m);
        if best.map(|(_, b)| margin < b).unwrap_or(true) {
            best = Some((axis, margin));
        }
    }
    if let Some((axis, _)) = best
        && sorted_by != Some(axis)
    {
        sort_along(children, axis);
    }
}

/// Total margin of every distribution where both groups hold at least `m` children.
fn all_dist_margin<C, T, const D: usize>(children: &[C], m: usize) -> T::Acc
where
    C: Child<T, D>,
    T: Scalar,
{
    let n = children.len();
    let mut left = children_bbox(&children[..m]);
    let mut right = children_bbox(&children[n - m..]);
    let mut margin = T::acc_add(left.margin(), right.margin());

    for c in &children[m..n - m] {
        left.extend(c.bbox());
        margin = T::acc_add(margin, left.margin());
    }
    for c in children[m..n - m].iter().rev() {
        right.extend(c.bbox());
        margin = T::acc_add(margin, right.margin());
    }
    margin
}

fn choose_split_index<C, T, const D: usize>(children: &[C], m: usize) -> usize
where
    C: Child<T, D>,
    T: Scalar,
{
    let n = children.len();
    let mut best: Option<(usize, T::Acc, T::Acc)> = None;
    for k in m..=(n - m) {
        let left = children_bbox(&children[..k]);
        let right = children_bbox(&children[k..]);
        let overlap = left.intersection_volume(&right);
        let volume = T::acc_add(left.volume(), right.volume());
        let better = match best {
            None => true,
            Some((_, best_overlap, best_volume)) => {
                overlap < best_overlap || (overlap == best_overlap && volume < best_volume)
            }
        };
        if better {
            best = Some((k, overlap, volume));
        }
    }
    best.map(|(k, _, _)| k).unwrap_or(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Entry;
    use crate::types::Aabb;
    use alloc::vec::Vec;

    fn entries(boxes: &[([f64; 2], [f64; 2])]) -> Vec<Entry<usize, f64, 2>> {
        boxes
            .iter()
            .enumerate()
            .map(|(i, &(min, max))| Entry {
                bbox: Aabb::new(min, max),
                item: i,
            })
            .collect()
    }

    #[test]
    fn picks_the_elongated_axis() {
        // Nine unit boxes stacked along y with jittered x; sorting by x interleaves
        // the stack and inflates every group's margin.
        let boxes: Vec<_> = (0..9_u32)
            .map(|i| {
                let x = f64::from((i * 4) % 9) * 0.01;
                let y = f64::from(i) * 2.0;
                ([x, y], [x + 1.0, y + 1.0])
            })
            .collect();
        let mut e = entries(&boxes);
        let k = choose_split(&mut e, 4);
        assert!((4..=5).contains(&k));
        // Sorted by y afterwards.
        for w in e.windows(2) {
            assert!(w[0].bbox.min[1] <= w[1].bbox.min[1]);
        }
        let left = children_bbox(&e[..k]);
        let right = children_bbox(&e[k..]);
        assert_eq!(left.intersection_volume(&right), 0.0);
    }

    #[test]
    fn equal_margins_keep_the_first_axis() {
        // A diagonal: both axes produce identical distributions.
        let boxes: Vec<_> = (0..9)
            .map(|i| {
                let v = f64::from(i);
                ([v, v], [v + 0.5, v + 0.5])
            })
            .collect();
        let mut e = entries(&boxes);
        let k = choose_split(&mut e, 4);
        assert_eq!(k, 4);
        let order: Vec<_> = e.iter().map(|x| x.item).collect();
        assert_eq!(order, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn overlap_ties_fall_back_to_volume() {
        // Zero overlap at every index; the smaller combined volume wins.
        let mut boxes: Vec<_> = (0..5)
            .map(|i| {
                let x = f64::from(i);
                ([x, 0.0], [x, 1.0])
            })
            .collect();
        boxes.extend((0..4).map(|i| {
            let x = 100.0 + f64::from(i);
            ([x, 0.0], [x, 1.0])
        }));
        let mut e = entries(&boxes);
        assert_eq!(choose_split(&mut e, 4), 5);
    }
}
