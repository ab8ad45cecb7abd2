//! Arena configuration parameters.

use crate::error::ConfigError;
use crate::placement::Placement;

/// Configuration for the arena allocator.
///
/// Controls buffer capacity, the spacing between granted blocks, and the
/// placement policy. Validated at construction; all values are immutable
/// after the arena is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the backing buffer in bytes.
    ///
    /// Default: 1024. Must be non-zero. The last byte is never granted:
    /// a request fails once `offset + bytes` reaches the capacity.
    pub capacity: usize,

    /// Bytes skipped after an occupied block when placement moves past it.
    ///
    /// Default: 1, which reproduces the classic layout where sequential
    /// blocks are separated by a one-byte gap.
    pub block_gap: usize,

    /// How a free offset is chosen for each request.
    pub placement: Placement,
}

impl ArenaConfig {
    /// Default buffer capacity in bytes.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Default gap after each occupied block.
    pub const DEFAULT_BLOCK_GAP: usize = 1;

    /// Create a config for the given capacity.
    ///
    /// Uses default values for all other parameters.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            block_gap: Self::DEFAULT_BLOCK_GAP,
            placement: Placement::default(),
        }
    }

    /// Replace the block gap.
    pub fn with_block_gap(mut self, block_gap: usize) -> Self {
        self.block_gap = block_gap;
        self
    }

    /// Replace the placement policy.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Check that the config describes a usable arena.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
