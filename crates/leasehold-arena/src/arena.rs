//! The fixed-capacity arena.
//!
//! [`Arena`] owns a single byte buffer and a [`BlockTable`] of the ranges
//! currently leased from it. It never grows: once a request cannot be
//! placed below the capacity it fails with
//! [`AllocError::OutOfMemory`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use leasehold_core::{AllocError, BlockAddr, MemoryResource, ResourceId, SharedResource};

use crate::block::{BlockRecord, BlockTable};
use crate::config::ArenaConfig;
use crate::error::ConfigError;

/// Fixed-size byte arena with offset/size bookkeeping.
///
/// Addresses handed out are `(arena id, offset)` pairs; only the arena can
/// turn one back into bytes ([`bytes`](Arena::bytes),
/// [`bytes_mut`](Arena::bytes_mut)). Freed ranges are not coalesced with
/// their neighbours.
pub struct Arena {
    id: ResourceId,
    /// Backing storage, allocated to full capacity at creation.
    buffer: Box<[u8]>,
    /// Live leases, sorted by offset.
    blocks: BlockTable,
    config: ArenaConfig,
}

impl Arena {
    /// Create an arena with the default configuration (1 KiB, first-fit).
    pub fn new() -> Self {
        Self::build(ArenaConfig::default())
    }

    /// Create an arena of `capacity` bytes with default placement.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_config(ArenaConfig::new(capacity))
    }

    /// Create an arena from an explicit configuration.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ArenaConfig) -> Self {
        Self {
            id: ResourceId::next(),
            buffer: vec![0u8; config.capacity].into_boxed_slice(),
            blocks: BlockTable::new(),
            config,
        }
    }

    /// Identity of this arena.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// The configuration the arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Total buffer size in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes currently leased (gaps not included).
    pub fn used_bytes(&self) -> usize {
        self.blocks.used_bytes()
    }

    /// Number of live leases.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Live leases in offset order.
    pub fn blocks(&self) -> impl Iterator<Item = &BlockRecord> {
        self.blocks.as_slice().iter()
    }

    /// Read the bytes of a live lease.
    pub fn bytes(&self, addr: BlockAddr) -> Result<&[u8], AllocError> {
        let block = self.lookup(addr)?;
        Ok(&self.buffer[block.offset..block.end()])
    }

    /// Write the bytes of a live lease.
    pub fn bytes_mut(&mut self, addr: BlockAddr) -> Result<&mut [u8], AllocError> {
        let block = self.lookup(addr)?;
        Ok(&mut self.buffer[block.offset..block.end()])
    }

    /// Move this arena behind a [`SharedResource`] handle.
    pub fn into_shared(self) -> SharedResource {
        SharedResource::new(self)
    }

    /// Share this arena while keeping a typed handle for inspection.
    pub fn into_rc(self) -> (Rc<RefCell<Arena>>, SharedResource) {
        let arena = Rc::new(RefCell::new(self));
        let shared = SharedResource::from_rc(Rc::clone(&arena));
        (arena, shared)
    }

    fn lookup(&self, addr: BlockAddr) -> Result<BlockRecord, AllocError> {
        if addr.resource != self.id {
            return Err(AllocError::InvalidFree { addr });
        }
        self.blocks
            .get(addr.offset)
            .copied()
            .ok_or(AllocError::InvalidFree { addr })
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryResource for Arena {
    fn allocate(&mut self, bytes: usize, alignment: usize) -> Result<BlockAddr, AllocError> {
        if bytes == 0 || !alignment.is_power_of_two() {
            return Err(AllocError::InvalidLayout { bytes, alignment });
        }

        let capacity = self.capacity();
        let offset = self.config.placement.locate(
            self.blocks.as_slice(),
            bytes,
            self.config.block_gap,
            capacity,
        );
        if offset.saturating_add(bytes) >= capacity {
            tracing::debug!(
                arena = %self.id,
                bytes,
                offset,
                capacity,
                live = self.blocks.len(),
                "arena exhausted"
            );
            return Err(AllocError::OutOfMemory {
                requested: bytes,
                offset,
                capacity,
            });
        }
        debug_assert!(
            !self.blocks.overlaps_any(offset, bytes),
            "placement returned an occupied range"
        );

        self.blocks.insert(BlockRecord::new(offset, bytes));
        self.buffer[offset..offset + bytes].fill(0);
        tracing::trace!(
            arena = %self.id,
            offset,
            bytes,
            live = self.blocks.len(),
            "block granted"
        );
        Ok(BlockAddr::new(self.id, offset))
    }

    fn deallocate(
        &mut self,
        addr: BlockAddr,
        _bytes: usize,
        _alignment: usize,
    ) -> Result<(), AllocError> {
        let removed = if addr.resource == self.id {
            self.blocks.remove(addr.offset)
        } else {
            None
        };
        match removed {
            Some(block) => {
                tracing::trace!(
                    arena = %self.id,
                    offset = block.offset,
                    bytes = block.size,
                    live = self.blocks.len(),
                    "block released"
                );
                Ok(())
            }
            None => {
                tracing::warn!(arena = %self.id, %addr, "release of unallocated block");
                Err(AllocError::InvalidFree { addr })
            }
        }
    }

    fn resource_id(&self) -> ResourceId {
        self.id
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("capacity", &self.capacity())
            .field("used_bytes", &self.used_bytes())
            .field("blocks", &self.blocks.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Placement;

    #[test]
    fn new_arena_is_empty() {
        let arena = Arena::new();
        assert_eq!(arena.capacity(), 1024);
        assert_eq!(arena.block_count(), 0);
        assert_eq!(arena.used_bytes(), 0);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(Arena::with_capacity(0).unwrap_err(), ConfigError::ZeroCapacity);
    }

    #[test]
    fn sequential_allocations_are_gap_separated() {
        let mut arena = Arena::new();
        let a = arena.allocate(10, 1).unwrap();
        let b = arena.allocate(20, 1).unwrap();
        let c = arena.allocate(30, 1).unwrap();
        assert_eq!((a.offset, b.offset, c.offset), (0, 11, 32));
        assert_eq!(arena.used_bytes(), 60);
        assert_eq!(arena.block_count(), 3);
    }

    #[test]
    fn blocks_stay_sorted_after_reuse() {
        let mut arena = Arena::new();
        let a = arena.allocate(10, 1).unwrap();
        let _b = arena.allocate(10, 1).unwrap();
        arena.deallocate(a, 10, 1).unwrap();
        let c = arena.allocate(5, 1).unwrap();
        assert_eq!(c.offset, 0);
        let offsets: Vec<usize> = arena.blocks().map(|b| b.offset).collect();
        assert_eq!(offsets, vec![0, 11]);
    }

    #[test]
    fn exhaustion_reports_out_of_memory() {
        let mut arena = Arena::new();
        let mut granted = Vec::new();
        // 100-byte blocks land at 0, 101, ..., 909; the next would end at 1110.
        for _ in 0..10 {
            granted.push(arena.allocate(100, 1).unwrap());
        }
        let err = arena.allocate(100, 1).unwrap_err();
        assert_eq!(
            err,
            AllocError::OutOfMemory {
                requested: 100,
                offset: 1010,
                capacity: 1024,
            }
        );
        assert_eq!(arena.block_count(), 10);
        let first = granted.remove(0);
        arena.deallocate(first, 100, 1).unwrap();
        assert_eq!(arena.block_count(), 9);
    }

    #[test]
    fn final_byte_is_never_granted() {
        let mut arena = Arena::with_capacity(16).unwrap();
        assert!(arena.allocate(16, 1).is_err());
        assert!(arena.allocate(15, 1).is_ok());
    }

    #[test]
    fn double_free_is_rejected() {
        let mut arena = Arena::new();
        let addr = arena.allocate(8, 8).unwrap();
        arena.deallocate(addr, 8, 8).unwrap();
        assert_eq!(
            arena.deallocate(addr, 8, 8),
            Err(AllocError::InvalidFree { addr })
        );
    }

    #[test]
    fn interior_address_is_rejected() {
        let mut arena = Arena::new();
        let addr = arena.allocate(8, 1).unwrap();
        let inner = BlockAddr::new(arena.id(), addr.offset + 1);
        assert!(matches!(
            arena.deallocate(inner, 1, 1),
            Err(AllocError::InvalidFree { .. })
        ));
        assert_eq!(arena.block_count(), 1);
    }

    #[test]
    fn foreign_address_is_rejected() {
        let mut a = Arena::new();
        let mut b = Arena::new();
        let addr = a.allocate(8, 1).unwrap();
        let _same_offset = b.allocate(8, 1).unwrap();
        assert!(matches!(
            b.deallocate(addr, 8, 1),
            Err(AllocError::InvalidFree { .. })
        ));
        assert_eq!(b.block_count(), 1);
    }

    #[test]
    fn invalid_layouts_are_rejected() {
        let mut arena = Arena::new();
        assert!(matches!(
            arena.allocate(0, 1),
            Err(AllocError::InvalidLayout { bytes: 0, .. })
        ));
        assert!(matches!(
            arena.allocate(8, 3),
            Err(AllocError::InvalidLayout { alignment: 3, .. })
        ));
        assert!(matches!(
            arena.allocate(8, 0),
            Err(AllocError::InvalidLayout { alignment: 0, .. })
        ));
        assert_eq!(arena.block_count(), 0);
    }

    #[test]
    fn alignment_does_not_move_placement() {
        let mut arena = Arena::new();
        arena.allocate(3, 1).unwrap();
        let b = arena.allocate(8, 8).unwrap();
        assert_eq!(b.offset, 4);
    }

    #[test]
    fn granted_bytes_are_zeroed_and_writable() {
        let mut arena = Arena::new();
        let addr = arena.allocate(4, 1).unwrap();
        arena.bytes_mut(addr).unwrap().copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(arena.bytes(addr).unwrap(), &[1, 2, 3, 4]);
        arena.deallocate(addr, 4, 1).unwrap();
        assert!(arena.bytes(addr).is_err());

        let again = arena.allocate(4, 1).unwrap();
        assert_eq!(again.offset, addr.offset);
        assert_eq!(arena.bytes(again).unwrap(), &[0, 0, 0, 0]);
    }

    #[test]
    fn is_equal_is_identity() {
        let a = Arena::new();
        let b = Arena::new();
        assert!(a.is_equal(&a));
        assert!(!a.is_equal(&b));
    }

    #[test]
    fn best_fit_config_is_honoured() {
        let config = ArenaConfig::default().with_placement(Placement::BestFit);
        let mut arena = Arena::with_config(config).unwrap();
        let big = arena.allocate(50, 1).unwrap();
        let _sep = arena.allocate(1, 1).unwrap();
        let small = arena.allocate(9, 1).unwrap();
        let _tail = arena.allocate(1, 1).unwrap();
        arena.deallocate(big, 50, 1).unwrap();
        arena.deallocate(small, 9, 1).unwrap();
        // Holes: [0,51) and [53,63); best fit picks the second.
        let addr = arena.allocate(8, 1).unwrap();
        assert_eq!(addr.offset, small.offset);
    }

    #[test]
    fn shared_handle_reaches_the_arena() {
        let (arena, shared) = Arena::new().into_rc();
        let addr = shared.allocate(16, 8).unwrap();
        assert_eq!(arena.borrow().block_count(), 1);
        assert_eq!(shared.id(), arena.borrow().id());
        shared.deallocate(addr, 16, 8).unwrap();
        assert_eq!(arena.borrow().block_count(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn live_blocks_never_overlap(
                ops in proptest::collection::vec((any::<bool>(), 1usize..64), 1..64),
                best in any::<bool>(),
            ) {
                let placement = if best { Placement::BestFit } else { Placement::FirstFit };
                let mut arena =
                    Arena::with_config(ArenaConfig::default().with_placement(placement)).unwrap();
                let mut live = Vec::new();
                for (alloc, size) in ops {
                    if alloc || live.is_empty() {
                        if let Ok(addr) = arena.allocate(size, 1) {
                            live.push((addr, size));
                        }
                    } else {
                        let (addr, size) = live.remove(size % live.len());
                        prop_assert!(arena.deallocate(addr, size, 1).is_ok());
                    }
                    let blocks: Vec<BlockRecord> = arena.blocks().copied().collect();
                    for pair in blocks.windows(2) {
                        prop_assert!(pair[0].end() <= pair[1].offset);
                    }
                    prop_assert!(blocks.iter().all(|b| b.end() < arena.capacity()));
                    prop_assert_eq!(blocks.len(), live.len());
                }
            }
        }
    }
}
