// Copyright 2025 the Quadtree Index Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Balancing parameters shared by every node of a tree.

use crate::error::Error;

/// Subdivision policy of a [`QuadTree`](crate::QuadTree).
///
/// Every node of a tree shares the same policy. A leaf subdivides when an
/// insertion finds it already holding `capacity` objects and its level is
/// below `max_level`; a leaf at `max_level` keeps accepting objects past
/// capacity instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /// Objects a leaf holds before the next insertion subdivides it.
    pub capacity: usize,
    /// Depth ceiling. The root is level 0; `0` disables subdivision.
    pub max_level: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(8, 4)
    }
}

impl Config {
    /// Create a policy from a capacity and depth ceiling.
    pub const fn new(capacity: usize, max_level: usize) -> Self {
        Self {
            capacity,
            max_level,
        }
    }

    /// Replace the capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Replace the depth ceiling.
    #[must_use]
    pub const fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Reject policies that would subdivide on every insertion.
    pub fn validate(&self) -> Result<(), Error> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_and_builders() {
        let config = Config::default();
        assert_eq!(config, Config::new(8, 4));
        let config = config.with_capacity(2).with_max_level(6);
        assert_eq!(config.capacity, 2);
        assert_eq!(config.max_level, 6);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            Config::default().with_capacity(0).validate(),
            Err(Error::ZeroCapacity)
        );
    }
}
