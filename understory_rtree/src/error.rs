// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use thiserror::Error;

/// Rejected accessor configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Accessors must come in `min, max` pairs.
    #[error("accessor list has {count} entries; expected min/max pairs")]
    OddAccessorCount {
        /// Number of accessors supplied.
        count: usize,
    },
    /// The number of accessor pairs does not match the tree's dimension.
    #[error("accessor list describes {found} axes but the tree has {expected}")]
    DimensionMismatch {
        /// Dimension of the tree.
        expected: usize,
        /// Number of axes described by the accessor list.
        found: usize,
    },
}
