//! Test utilities and mock resources for Leasehold development.
//!
//! Provides a [`CountingResource`], an unbounded [`MemoryResource`] that
//! records every grant and release and can be told to fail after a number
//! of allocations, plus ready-made allocator fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use leasehold_core::{AllocError, BlockAddr, MemoryResource, ResourceId, SharedResource};

/// Unbounded memory resource that counts what passes through it.
///
/// Addresses are bump-allocated (aligned as requested) and never reused,
/// so a stale address is always detected as an invalid free. Set a failure
/// budget with [`fail_after`](CountingResource::fail_after) to make the
/// n+1-th allocation fail with `OutOfMemory`, or turn on
/// [`refuse_frees`](CountingResource::refuse_frees) to reject releases.
pub struct CountingResource {
    id: ResourceId,
    cursor: usize,
    /// offset -> size of every live grant.
    live: BTreeMap<usize, usize>,
    allocations: usize,
    deallocations: usize,
    rejected_frees: usize,
    budget: Option<usize>,
    refuse_frees: bool,
}

impl CountingResource {
    pub fn new() -> Self {
        Self {
            id: ResourceId::next(),
            cursor: 0,
            live: BTreeMap::new(),
            allocations: 0,
            deallocations: 0,
            rejected_frees: 0,
            budget: None,
            refuse_frees: false,
        }
    }

    /// Allow `n` more successful allocations, then fail every request.
    pub fn fail_after(&mut self, n: usize) {
        self.budget = Some(n);
    }

    /// Remove any failure budget.
    pub fn never_fail(&mut self) {
        self.budget = None;
    }

    /// Reject every later release with `InvalidFree`, leaving the grant live.
    pub fn refuse_frees(&mut self, refuse: bool) {
        self.refuse_frees = refuse;
    }

    /// Number of live grants.
    pub fn live(&self) -> usize {
        self.live.len()
    }

    /// Bytes held by live grants.
    pub fn live_bytes(&self) -> usize {
        self.live.values().sum()
    }

    /// Successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Successful releases so far.
    pub fn deallocations(&self) -> usize {
        self.deallocations
    }

    /// Releases rejected with `InvalidFree`.
    pub fn rejected_frees(&self) -> usize {
        self.rejected_frees
    }

    /// Share the resource and keep a typed handle for assertions.
    pub fn into_rc(self) -> (Rc<RefCell<CountingResource>>, SharedResource) {
        let counter = Rc::new(RefCell::new(self));
        let shared = SharedResource::from_rc(Rc::clone(&counter));
        (counter, shared)
    }
}

impl Default for CountingResource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryResource for CountingResource {
    fn allocate(&mut self, bytes: usize, alignment: usize) -> Result<BlockAddr, AllocError> {
        if bytes == 0 || !alignment.is_power_of_two() {
            return Err(AllocError::InvalidLayout { bytes, alignment });
        }
        let offset = self.cursor.next_multiple_of(alignment);
        match self.budget {
            Some(0) => {
                return Err(AllocError::OutOfMemory {
                    requested: bytes,
                    offset,
                    capacity: usize::MAX,
                })
            }
            Some(ref mut left) => *left -= 1,
            None => {}
        }
        self.cursor = offset + bytes;
        self.live.insert(offset, bytes);
        self.allocations += 1;
        Ok(BlockAddr::new(self.id, offset))
    }

    fn deallocate(
        &mut self,
        addr: BlockAddr,
        _bytes: usize,
        _alignment: usize,
    ) -> Result<(), AllocError> {
        if !self.refuse_frees
            && addr.resource == self.id
            && self.live.remove(&addr.offset).is_some()
        {
            self.deallocations += 1;
            Ok(())
        } else {
            self.rejected_frees += 1;
            Err(AllocError::InvalidFree { addr })
        }
    }

    fn resource_id(&self) -> ResourceId {
        self.id
    }
}
