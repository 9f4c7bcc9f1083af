// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

use crate::axis::Axis;

/// Axis-aligned bounding box over `D` dimensions.
///
/// Axis `i` spans the closed interval `[min[i], max[i]]`. Nothing enforces
/// `min[i] <= max[i]`: inverted boxes flow through [`volume`](Self::volume) and
/// [`margin`](Self::margin) as plain arithmetic and simply produce odd metrics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: serde::Serialize",
        deserialize = "T: serde::Deserialize<'de>"
    ))
)]
pub struct Aabb<T, const D: usize> {
    /// Minimum corner, one coordinate per axis.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_array"))]
    pub min: [T; D],
    /// Maximum corner, one coordinate per axis.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_array"))]
    pub max: [T; D],
}

/// Axis-aligned bounding box in 2D.
pub type Aabb2D<T> = Aabb<T, 2>;

/// Axis-aligned bounding box in 3D.
pub type Aabb3D<T> = Aabb<T, 3>;

impl<T, const D: usize> Aabb<T, D> {
    /// Create a new AABB from its min/max corners.
    pub const fn new(min: [T; D], max: [T; D]) -> Self {
        Self { min, max }
    }
}

impl<T: Scalar, const D: usize> Aabb<T, D> {
    /// The identity for [`union`](Self::union): every axis runs from the highest
    /// to the lowest representable value, so it intersects nothing.
    pub fn empty() -> Self {
        Self {
            min: [T::highest(); D],
            max: [T::lowest(); D],
        }
    }

    /// A zero-extent box at `point`.
    pub const fn from_point(point: [T; D]) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Return true if the AABB is empty or inverted on any axis. Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        Axis::all::<D>().any(|axis| lt(axis.max(self), axis.min(self)))
    }

    /// Grow `self` so that it also covers `other`.
    pub fn extend(&mut self, other: &Self) -> &mut Self {
        for axis in Axis::all::<D>() {
            axis.extend(self, other);
        }
        self
    }

    /// The smallest box covering both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.extend(other);
        out
    }

    /// The intersection of two AABBs (possibly inverted when they are disjoint).
    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = *self;
        for axis in Axis::all::<D>() {
            axis.intersect(&mut out, other);
        }
        out
    }

    /// Product of the per-axis extents, in the widened accumulator.
    ///
    /// A zero-width axis yields zero volume.
    pub fn volume(&self) -> T::Acc {
        Axis::all::<D>().fold(T::acc_from_usize(1), |v, axis| {
            T::acc_mul(v, T::widen(axis.length(self)))
        })
    }

    /// Sum of the per-axis extents, in the widened accumulator.
    pub fn margin(&self) -> T::Acc {
        Axis::all::<D>().fold(T::acc_from_usize(0), |m, axis| {
            T::acc_add(m, T::widen(axis.length(self)))
        })
    }

    /// Volume of the union of `self` and `other`.
    pub fn enlarged_volume(&self, other: &Self) -> T::Acc {
        self.union(other).volume()
    }

    /// Volume shared by `self` and `other`; zero as soon as one axis does not overlap.
    pub fn intersection_volume(&self, other: &Self) -> T::Acc {
        Axis::all::<D>().fold(T::acc_from_usize(1), |v, axis| {
            T::acc_mul(v, T::widen(axis.overlap(self, other)))
        })
    }

    /// Whether `other` lies entirely inside `self` (boundaries included).
    pub fn contains(&self, other: &Self) -> bool {
        Axis::all::<D>().all(|axis| axis.contains(self, other))
    }

    /// Whether `self` and `other` share at least one point. Touching boundaries count.
    pub fn intersects(&self, other: &Self) -> bool {
        Axis::all::<D>().all(|axis| axis.intersects(self, other))
    }
}

impl<T: Scalar, const D: usize> Default for Aabb<T, D> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Numeric scalar abstraction for AABB coordinates.
///
/// This trait provides the minimal set of operations the tree metrics need, and an
/// associated widened accumulator type for volumes and margins
/// (e.g., f32→f64, i64→i128).
///
/// Accumulator arithmetic goes through [`acc_add`](Self::acc_add),
/// [`acc_sub`](Self::acc_sub) and [`acc_mul`](Self::acc_mul). Integer
/// accumulators saturate there, so metrics of huge boxes clamp to the
/// accumulator's range instead of overflowing.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for volume/margin computations.
    type Acc: Copy + PartialOrd + Debug;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Max of the scalar value and zero.
    fn max_zero(v: Self) -> Self;

    /// Lowest representable value (negative infinity for floats).
    fn lowest() -> Self;

    /// Highest representable value (positive infinity for floats).
    fn highest() -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;

    /// Convert a `usize` to the accumulator type.
    fn acc_from_usize(n: usize) -> Self::Acc;

    /// Accumulator sum: a + b.
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc;

    /// Accumulator difference: a - b.
    fn acc_sub(a: Self::Acc, b: Self::Acc) -> Self::Acc;

    /// Accumulator product: a * b.
    fn acc_mul(a: Self::Acc, b: Self::Acc) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn lowest() -> Self {
        Self::NEG_INFINITY
    }

    #[inline]
    fn highest() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as f64
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a + b
    }

    #[inline]
    fn acc_sub(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a - b
    }

    #[inline]
    fn acc_mul(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a * b
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn lowest() -> Self {
        Self::NEG_INFINITY
    }

    #[inline]
    fn highest() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as Self::Acc
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a + b
    }

    #[inline]
    fn acc_sub(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a - b
    }

    #[inline]
    fn acc_mul(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a * b
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0)
    }

    #[inline]
    fn lowest() -> Self {
        Self::MIN
    }

    #[inline]
    fn highest() -> Self {
        Self::MAX
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }

    #[inline]
    fn acc_from_usize(n: usize) -> Self::Acc {
        n as i128
    }

    #[inline]
    fn acc_add(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_add(b)
    }

    #[inline]
    fn acc_sub(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_sub(b)
    }

    #[inline]
    fn acc_mul(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_mul(b)
    }
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
