// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping items to boxes.
//!
//! The tree never inspects items directly. It asks its accessor, a [`ToAabb`]
//! implementation, for the box of each item once, when the item enters the tree,
//! and caches the result next to the item.
//!
//! - [`Fields`] (the default) is for items that know their own box through
//!   [`Bounded`]; [`Aabb`] itself and `(Aabb, payload)` pairs qualify.
//! - [`Format`] is a fixed table of per-axis accessor functions for item types
//!   that carry their bounds under other names.

use core::fmt::Debug;

use crate::error::ConfigError;
use crate::types::Aabb;

/// Items that expose their own bounding box.
pub trait Bounded<T, const D: usize> {
    /// The item's box.
    fn aabb(&self) -> Aabb<T, D>;
}

impl<T: Copy, const D: usize> Bounded<T, D> for Aabb<T, D> {
    #[inline]
    fn aabb(&self) -> Self {
        *self
    }
}

impl<T: Copy, P, const D: usize> Bounded<T, D> for (Aabb<T, D>, P) {
    #[inline]
    fn aabb(&self) -> Aabb<T, D> {
        self.0
    }
}

#[cfg(feature = "kurbo")]
impl Bounded<f64, 2> for kurbo::Rect {
    #[inline]
    fn aabb(&self) -> Aabb<f64, 2> {
        Aabb::new([self.min_x(), self.min_y()], [self.max_x(), self.max_y()])
    }
}

/// Strategy used by a tree to compute the box of an item.
pub trait ToAabb<I, T, const D: usize> {
    /// The box of `item`.
    fn to_aabb(&self, item: &I) -> Aabb<T, D>;
}

/// Default accessor: items report their own box via [`Bounded`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fields;

impl<I: Bounded<T, D>, T, const D: usize> ToAabb<I, T, D> for Fields {
    #[inline]
    fn to_aabb(&self, item: &I) -> Aabb<T, D> {
        item.aabb()
    }
}

/// Reads one coordinate from an item.
pub type AccessorFn<I, T> = fn(&I) -> T;

/// The min/max accessor pair for one axis.
pub struct AxisAccessor<I, T> {
    /// Reads the item's lower bound on this axis.
    pub min: AccessorFn<I, T>,
    /// Reads the item's upper bound on this axis.
    pub max: AccessorFn<I, T>,
}

impl<I, T> AxisAccessor<I, T> {
    /// Create an accessor pair.
    pub const fn new(min: AccessorFn<I, T>, max: AccessorFn<I, T>) -> Self {
        Self { min, max }
    }
}

impl<I, T> Copy for AxisAccessor<I, T> {}

impl<I, T> Clone for AxisAccessor<I, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, T> Debug for AxisAccessor<I, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisAccessor")
            .field("min", &(self.min as *const ()))
            .field("max", &(self.max as *const ()))
            .finish()
    }
}

/// A fixed table of per-axis accessors.
///
/// Plain function pointers keep the hot sort and split paths free of dynamic
/// dispatch beyond a single indirect call per coordinate.
///
/// ```rust
/// use understory_rtree::{Format, RTree, Params};
///
/// struct Particle {
///     lo: [f32; 2],
///     hi: [f32; 2],
/// }
///
/// let format = Format::<Particle, f32, 2>::from_accessors(&[
///     |p| p.lo[0],
///     |p| p.hi[0],
///     |p| p.lo[1],
///     |p| p.hi[1],
/// ])
/// .unwrap();
/// let mut tree = RTree::with_format(Params::default(), format);
/// tree.insert(Particle { lo: [0.0, 0.0], hi: [1.0, 1.0] });
/// assert_eq!(tree.len(), 1);
/// ```
pub struct Format<I, T, const D: usize> {
    axes: [AxisAccessor<I, T>; D],
}

impl<I, T, const D: usize> Format<I, T, D> {
    /// Build a format from one `(min, max)` accessor pair per axis.
    pub const fn new(axes: [AxisAccessor<I, T>; D]) -> Self {
        Self { axes }
    }

    /// Build a format from a flat accessor list `[min0, max0, min1, max1, ...]`.
    ///
    /// Fails if the list is not made of pairs or describes a different number
    /// of axes than `D`.
    pub fn from_accessors(accessors: &[AccessorFn<I, T>]) -> Result<Self, ConfigError> {
        if accessors.len() % 2 != 0 {
            return Err(ConfigError::OddAccessorCount {
                count: accessors.len(),
            });
        }
        let found = accessors.len() / 2;
        if found != D {
            return Err(ConfigError::DimensionMismatch { expected: D, found });
        }
        Ok(Self {
            axes: core::array::from_fn(|i| {
                AxisAccessor::new(accessors[2 * i], accessors[2 * i + 1])
            }),
        })
    }

    /// The accessor pair for each axis.
    pub fn axes(&self) -> &[AxisAccessor<I, T>; D] {
        &self.axes
    }
}

impl<I, T, const D: usize> ToAabb<I, T, D> for Format<I, T, D> {
    #[inline]
    fn to_aabb(&self, item: &I) -> Aabb<T, D> {
        Aabb::new(
            core::array::from_fn(|i| (self.axes[i].min)(item)),
            core::array::from_fn(|i| (self.axes[i].max)(item)),
        )
    }
}

impl<I, T, const D: usize> Clone for Format<I, T, D> {
    fn clone(&self) -> Self {
        Self { axes: self.axes }
    }
}

impl<I, T, const D: usize> Debug for Format<I, T, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Format").field("axes", &self.axes).finish()
    }
}
