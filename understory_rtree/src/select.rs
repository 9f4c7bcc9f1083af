// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Order-statistic partitioning used by bulk loading.

use alloc::vec;
use core::cmp::Ordering;

/// Partition `items` into consecutive groups of `n`.
///
/// Afterwards every element of a group compares less than or equal to every
/// element of the following groups, while each group itself stays unsorted. The
/// last group holds the remainder. Ranges are halved at a multiple of `n` with a
/// selection step, and pending ranges live on an explicit stack, so auxiliary
/// memory stays logarithmic in `items.len() / n`.
pub fn multiselect<E, F>(items: &mut [E], n: usize, mut compare: F)
where
    F: FnMut(&E, &E) -> Ordering,
{
    if n == 0 {
        return;
    }
    let mut stack = vec![(0, items.len())];
    while let Some((left, right)) = stack.pop() {
        let len = right - left;
        if len <= n {
            continue;
        }
        let mid = left + len.div_ceil(2 * n) * n;
        items[left..right].select_nth_unstable_by(mid - left, &mut compare);
        stack.push((left, mid));
        stack.push((mid, right));
    }
}
