//! Resource identity and block addresses.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ResourceId`] allocation.
static RESOURCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a memory resource.
///
/// Allocated from a monotonic atomic counter via [`ResourceId::next`].
/// Two distinct resources always have different IDs, even if they have
/// identical configuration, so identity comparison never depends on where
/// a resource happens to live in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(u64);

impl ResourceId {
    /// Allocate a fresh, unique resource ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(RESOURCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address of a granted byte range: the owning resource plus a byte offset.
///
/// This is the only form in which callers see an address. Resolving it to
/// memory is the providing resource's job, so an address from one resource
/// can never be used to reach into another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockAddr {
    /// Resource that granted the range.
    pub resource: ResourceId,
    /// Byte offset of the range start within the resource.
    pub offset: usize,
}

impl BlockAddr {
    /// Create an address.
    pub fn new(resource: ResourceId, offset: usize) -> Self {
        Self { resource, offset }
    }
}

impl fmt::Display for BlockAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource#{}+{:#x}", self.resource, self.offset)
    }
}
