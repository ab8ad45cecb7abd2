//! Reusable allocator fixtures.
//!
//! Each fixture returns the typed resource (for assertions) together with a
//! [`ResourceAllocator`] ready to hand to a container:
//!
//! - [`arena_allocator`]: a default 1 KiB first-fit [`Arena`].
//! - [`arena_allocator_with`]: an arena built from an explicit config.
//! - [`counting_allocator`]: an unbounded [`CountingResource`].

use std::cell::RefCell;
use std::rc::Rc;

use leasehold_arena::{Arena, ArenaConfig};
use leasehold_core::ResourceAllocator;

use crate::CountingResource;

/// Default arena plus an allocator over it.
pub fn arena_allocator() -> (Rc<RefCell<Arena>>, ResourceAllocator) {
    let (arena, shared) = Arena::new().into_rc();
    (arena, ResourceAllocator::new(shared))
}

/// Arena built from `config` plus an allocator over it.
///
/// # Panics
///
/// Panics if `config` is invalid.
pub fn arena_allocator_with(config: ArenaConfig) -> (Rc<RefCell<Arena>>, ResourceAllocator) {
    let arena = match Arena::with_config(config) {
        Ok(arena) => arena,
        Err(err) => panic!("invalid fixture config: {err}"),
    };
    let (arena, shared) = arena.into_rc();
    (arena, ResourceAllocator::new(shared))
}

/// Counting resource plus an allocator over it.
pub fn counting_allocator() -> (Rc<RefCell<CountingResource>>, ResourceAllocator) {
    let (counter, shared) = CountingResource::new().into_rc();
    (counter, ResourceAllocator::new(shared))
}
