// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis interval logic.
//!
//! An [`Axis`] selects one dimension of an [`Aabb`] and provides the interval
//! operations the box helpers in [`types`](crate::types) are composed from:
//! reading bounds, extending and intersecting intervals, containment and
//! overlap tests, and ordering by lower bound for sorts and selections.

use core::cmp::Ordering;

use crate::types::{Aabb, Scalar, le, max_t, min_t};

/// One axis of a `D`-dimensional box.
///
/// Methods index the box's corner arrays directly; an axis must be below the
/// dimension of the boxes it is applied to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Axis(usize);

impl Axis {
    /// Create an axis from its index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index of this axis.
    pub const fn index(self) -> usize {
        self.0
    }

    /// All axes of a `D`-dimensional box, in order.
    pub fn all<const D: usize>() -> impl Iterator<Item = Self> + Clone {
        (0..D).map(Self)
    }

    /// Lower bound of `a` on this axis.
    #[inline]
    pub fn min<T: Copy, const D: usize>(self, a: &Aabb<T, D>) -> T {
        a.min[self.0]
    }

    /// Upper bound of `a` on this axis.
    #[inline]
    pub fn max<T: Copy, const D: usize>(self, a: &Aabb<T, D>) -> T {
        a.max[self.0]
    }

    /// Extent of `a` on this axis (negative when inverted).
    #[inline]
    pub fn length<T: Scalar, const D: usize>(self, a: &Aabb<T, D>) -> T {
        T::sub(a.max[self.0], a.min[self.0])
    }

    /// Widen `a`'s interval on this axis to cover `b`'s.
    #[inline]
    pub fn extend<T: PartialOrd + Copy, const D: usize>(self, a: &mut Aabb<T, D>, b: &Aabb<T, D>) {
        let i = self.0;
        a.min[i] = min_t(a.min[i], b.min[i]);
        a.max[i] = max_t(a.max[i], b.max[i]);
    }

    /// Narrow `a`'s interval on this axis to the part shared with `b`.
    #[inline]
    pub fn intersect<T: PartialOrd + Copy, const D: usize>(
        self,
        a: &mut Aabb<T, D>,
        b: &Aabb<T, D>,
    ) {
        let i = self.0;
        a.min[i] = max_t(a.min[i], b.min[i]);
        a.max[i] = min_t(a.max[i], b.max[i]);
    }

    /// Length of the shared interval, clamped at zero.
    #[inline]
    pub fn overlap<T: Scalar, const D: usize>(self, a: &Aabb<T, D>, b: &Aabb<T, D>) -> T {
        let i = self.0;
        T::max_zero(T::sub(
            min_t(a.max[i], b.max[i]),
            max_t(a.min[i], b.min[i]),
        ))
    }

    /// Whether `a`'s interval covers `b`'s.
    #[inline]
    pub fn contains<T: PartialOrd + Copy, const D: usize>(
        self,
        a: &Aabb<T, D>,
        b: &Aabb<T, D>,
    ) -> bool {
        let i = self.0;
        le(a.min[i], b.min[i]) && le(b.max[i], a.max[i])
    }

    /// Whether the closed intervals of `a` and `b` meet.
    #[inline]
    pub fn intersects<T: PartialOrd + Copy, const D: usize>(
        self,
        a: &Aabb<T, D>,
        b: &Aabb<T, D>,
    ) -> bool {
        let i = self.0;
        le(b.min[i], a.max[i]) && le(a.min[i], b.max[i])
    }

    /// Order two boxes by their lower bound on this axis. Incomparable values are equal.
    #[inline]
    pub fn compare_min<T: PartialOrd + Copy, const D: usize>(
        self,
        a: &Aabb<T, D>,
        b: &Aabb<T, D>,
    ) -> Ordering {
        a.min[self.0]
            .partial_cmp(&b.min[self.0])
            .unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_touches_only_its_axis() {
        let mut a = Aabb::new([0, 0], [1, 1]);
        let b = Aabb::new([-5, -5], [5, 5]);
        Axis::new(1).extend(&mut a, &b);
        assert_eq!(a, Aabb::new([0, -5], [1, 5]));
    }

    #[test]
    fn intersect_narrows() {
        let mut a = Aabb::new([0.0, 0.0], [4.0, 4.0]);
        let b = Aabb::new([2.0, -1.0], [6.0, 1.0]);
        Axis::new(0).intersect(&mut a, &b);
        assert_eq!(a, Aabb::new([2.0, 0.0], [4.0, 4.0]));
    }

    #[test]
    fn overlap_clamps() {
        let a = Aabb::new([0_i64], [2]);
        let b = Aabb::new([5_i64], [9]);
        assert_eq!(Axis::new(0).overlap(&a, &b), 0);
        let c = Aabb::new([1_i64], [9]);
        assert_eq!(Axis::new(0).overlap(&a, &c), 1);
    }

    #[test]
    fn missing_bounds_compare_equal() {
        let a = Aabb::new([f64::NAN], [1.0]);
        let b = Aabb::new([0.0], [1.0]);
        assert_eq!(Axis::new(0).compare_min(&a, &b), Ordering::Equal);
        assert_eq!(Axis::new(0).compare_min(&b, &b), Ordering::Equal);
    }

    #[test]
    fn all_yields_each_axis_once() {
        let v: alloc::vec::Vec<_> = Axis::all::<3>().map(Axis::index).collect();
        assert_eq!(v, [0, 1, 2]);
    }
}
