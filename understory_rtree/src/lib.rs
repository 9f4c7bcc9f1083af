// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_rtree --heading-base-level=0

//! Understory R-tree: a dimension-agnostic, height-balanced R-tree.
//!
//! Understory R-tree indexes axis-aligned bounding boxes over any fixed number of
//! dimensions `D`, chosen at compile time.
//!
//! - Bulk-load item sets with top-down tiling ([`RTree::load`]), or insert items one at a time.
//! - Query every item intersecting a box ([`RTree::search`]) or just test for one ([`RTree::collides`]).
//! - Remove items by equality or by a custom predicate; emptied nodes are pruned on the way up.
//! - Export and adopt the raw node structure as a snapshot.
//!
//! The tree is generic over the coordinate scalar `T` (`f32`, `f64`, `i64`). Volumes and
//! margins are computed in a widened accumulator (f32→f64, f64→f64, i64→i128).
//!
//! Items are mapped to boxes by an accessor. By default items report their own box
//! through [`Bounded`], which [`Aabb`] and `(Aabb, payload)` pairs implement. Other
//! item types can be described with a [`Format`] of per-axis accessor functions.
//!
//! # Example
//!
//! ```rust
//! use understory_rtree::{Aabb3D, RTree};
//!
//! // Boxes carrying an id.
//! let mut tree: RTree<(Aabb3D<f64>, u32), f64, 3> = RTree::with_max_entries(8);
//! tree.load((0..64_u32).map(|i| {
//!     let v = f64::from(i);
//!     (Aabb3D::new([v, 0.0, 0.0], [v + 0.5, 1.0, 1.0]), i)
//! }));
//! assert_eq!(tree.height(), 2);
//!
//! let mut hits: Vec<u32> = tree
//!     .search(&Aabb3D::new([10.0, 0.0, 0.0], [12.0, 1.0, 1.0]))
//!     .into_iter()
//!     .map(|(_, id)| *id)
//!     .collect();
//! hits.sort_unstable();
//! assert_eq!(hits, [10, 11, 12]);
//!
//! tree.remove_by(&(Aabb3D::new([11.0, 0.0, 0.0], [11.5, 1.0, 1.0]), 0), |a, b| a.0 == b.0);
//! assert_eq!(tree.len(), 63);
//! ```
//!
//! ## Snapshots
//!
//! [`RTree::to_snapshot`] clones the root [`Node`]; [`RTree::from_snapshot`] adopts one
//! without validating it. With the `serde` feature nodes serialize as nested
//! `{ bbox, height, children }` records.
//!
//! ### Float semantics
//!
//! NaN coordinates are outside the contract. Comparisons involving NaN never panic;
//! they simply fail, so such items may be missed by queries.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod axis;
pub mod error;
pub mod format;
pub mod node;
pub mod params;
pub mod select;
pub mod tree;
pub mod types;

mod bulk;
mod split;

pub use axis::Axis;
pub use error::ConfigError;
pub use format::{AccessorFn, AxisAccessor, Bounded, Fields, Format, ToAabb};
pub use node::{Children, Entry, Node};
pub use params::Params;
pub use select::multiselect;
pub use tree::RTree;
pub use types::{Aabb, Aabb2D, Aabb3D, Scalar, ScalarAcc};

/// Serde glue for `[T; D]` with a const-generic `D`.
#[cfg(feature = "serde")]
mod serde_array {
    use alloc::vec::Vec;
    use core::fmt;
    use core::marker::PhantomData;

    use serde::de::{Deserializer, Error, SeqAccess, Visitor};
    use serde::ser::{SerializeTuple, Serializer};
    use serde::{Deserialize, Serialize};

    pub(crate) fn serialize<S, T, const D: usize>(
        value: &[T; D],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        let mut tuple = serializer.serialize_tuple(D)?;
        for v in value {
            tuple.serialize_element(v)?;
        }
        tuple.end()
    }

    pub(crate) fn deserialize<'de, De, T, const D: usize>(
        deserializer: De,
    ) -> Result<[T; D], De::Error>
    where
        De: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        struct ArrayVisitor<T, const D: usize>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>, const D: usize> Visitor<'de> for ArrayVisitor<T, D> {
            type Value = [T; D];

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an array of length {D}")
            }

            fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<Self::Value, S::Error> {
                let mut values = Vec::with_capacity(D);
                while let Some(v) = seq.next_element()? {
                    values.push(v);
                }
                let len = values.len();
                values
                    .try_into()
                    .map_err(|_| S::Error::invalid_length(len, &self))
            }
        }

        deserializer.deserialize_tuple(D, ArrayVisitor(PhantomData))
    }
}
