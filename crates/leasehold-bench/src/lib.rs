//! Benchmark workloads for the Leasehold allocator and containers.
//!
//! Provides deterministic inputs shared by the Criterion benches:
//!
//! - [`churn_plan`]: a reproducible sequence of allocate/release steps
//! - [`run_churn`]: replays a plan against any [`MemoryResource`]
//! - [`filled_list`]: a list of `n` integers on a fresh arena

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::mem::size_of;

use leasehold_arena::{Arena, ArenaConfig};
use leasehold_core::{BlockAddr, MemoryResource, ResourceAllocator};
use leasehold_list::{ForwardList, ListError};

/// One step of a churn workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnStep {
    /// Request a block of this many bytes.
    Allocate(usize),
    /// Release the live block at this position in allocation order
    /// (taken modulo the number of live blocks).
    Release(usize),
}

/// Generate `steps` churn steps from `seed`.
///
/// Roughly two allocations for every release, with sizes between 8 and 64
/// bytes. The same seed always produces the same plan.
pub fn churn_plan(steps: usize, seed: u64) -> Vec<ChurnStep> {
    let mut state = seed;
    (0..steps)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let roll = (state >> 33) as usize;
            if roll % 3 == 2 {
                ChurnStep::Release(roll / 3)
            } else {
                ChurnStep::Allocate(8 + (roll / 3) % 57)
            }
        })
        .collect()
}

/// Replay `plan` against `resource`, returning how many requests failed.
///
/// Every block still live at the end is released.
pub fn run_churn<R: MemoryResource>(resource: &mut R, plan: &[ChurnStep]) -> usize {
    let mut live: Vec<(BlockAddr, usize)> = Vec::new();
    let mut failures = 0;
    for &step in plan {
        match step {
            ChurnStep::Allocate(bytes) => match resource.allocate(bytes, 8) {
                Ok(addr) => live.push((addr, bytes)),
                Err(_) => failures += 1,
            },
            ChurnStep::Release(pick) => {
                if !live.is_empty() {
                    let (addr, bytes) = live.swap_remove(pick % live.len());
                    if resource.deallocate(addr, bytes, 8).is_err() {
                        failures += 1;
                    }
                }
            }
        }
    }
    for (addr, bytes) in live {
        if resource.deallocate(addr, bytes, 8).is_err() {
            failures += 1;
        }
    }
    failures
}

/// Bytes one `u64` list node occupies in an arena, block gap included.
///
/// A node is the value plus an `Option<usize>` link, which has no niche and
/// so takes two words.
pub const U64_NODE_FOOTPRINT: usize =
    size_of::<u64>() + size_of::<Option<usize>>() + ArenaConfig::DEFAULT_BLOCK_GAP;

/// Arena with room for exactly `n` list nodes of `u64`.
pub fn arena_for_nodes(n: usize) -> Arena {
    // The final byte of the buffer is never granted.
    let config = ArenaConfig::new(n.max(1) * U64_NODE_FOOTPRINT + 1);
    match Arena::with_config(config) {
        Ok(arena) => arena,
        Err(err) => panic!("bench arena config rejected: {err}"),
    }
}

/// A list holding `0..n` in order, on its own arena.
pub fn filled_list(n: usize) -> Result<ForwardList<u64>, ListError> {
    let alloc = ResourceAllocator::new(arena_for_nodes(2 * n).into_shared());
    let mut list = ForwardList::new_in(alloc);
    for v in (0..n as u64).rev() {
        list.push_front(v)?;
    }
    Ok(list)
}
