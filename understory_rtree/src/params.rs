// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node fill parameters.

/// Smallest accepted `max_entries`.
pub const MIN_MAX_ENTRIES: usize = 8;

/// `max_entries` used by [`Params::default`].
pub const DEFAULT_MAX_ENTRIES: usize = 16;

/// Node capacity settings for an [`RTree`](crate::RTree).
///
/// `min_entries` is derived: 40% of `max_entries`, rounded up, and never below 4.
/// It bounds split distributions; after removals nodes may hold fewer entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Params {
    max_entries: usize,
}

impl Params {
    /// Create parameters with the given node capacity, clamped to at least
    /// [`MIN_MAX_ENTRIES`].
    pub const fn new(max_entries: usize) -> Self {
        let max_entries = if max_entries < MIN_MAX_ENTRIES {
            MIN_MAX_ENTRIES
        } else {
            max_entries
        };
        Self { max_entries }
    }

    /// Maximum number of children per node.
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Minimum fill used when choosing split distributions.
    pub const fn min_entries(&self) -> usize {
        let m = (2 * self.max_entries).div_ceil(5);
        if m < 4 { 4 } else { m }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}
