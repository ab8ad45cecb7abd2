//! Leasehold: fixed-capacity arena allocation and allocator-aware containers.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Leasehold sub-crates. For most users, adding `leasehold` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use leasehold::prelude::*;
//!
//! // One 1 KiB arena backing three independent lists.
//! let (arena, shared) = Arena::new().into_rc();
//! let alloc = ResourceAllocator::new(shared);
//!
//! let mut lists: Vec<ForwardList<i32>> =
//!     (0..3).map(|_| ForwardList::new_in(alloc.clone())).collect();
//! for i in 0..10 {
//!     for (k, list) in lists.iter_mut().enumerate() {
//!         list.push_back(i * (k as i32 + 1))?;
//!     }
//! }
//! assert_eq!(arena.borrow().block_count(), 30);
//! assert_eq!(lists[2].iter().nth(4), Some(&12));
//!
//! drop(lists);
//! assert_eq!(arena.borrow().block_count(), 0);
//! # Ok::<(), ListError>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `leasehold-core` | Resource and allocator traits, leases, addresses, errors |
//! | [`arena`] | `leasehold-arena` | The fixed-capacity arena, block table, placement policies |
//! | [`list`] | `leasehold-list` | `ForwardList`, its iterators and cursors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core allocation abstractions (`leasehold-core`).
///
/// The byte-level [`types::MemoryResource`] trait, the typed
/// [`types::Allocator`] trait, and the [`types::ResourceAllocator`] that
/// bridges them.
pub use leasehold_core as types;

/// Fixed-capacity arena (`leasehold-arena`).
///
/// [`arena::Arena`] is configured through [`arena::ArenaConfig`] and picks
/// offsets with an [`arena::Placement`] policy.
pub use leasehold_arena as arena;

/// Allocator-aware singly-linked list (`leasehold-list`).
pub use leasehold_list as list;

/// Common imports for typical Leasehold usage.
///
/// ```rust
/// use leasehold::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use leasehold_core::{
        AllocError, Allocator, MemoryResource, ResourceAllocator, SharedResource,
    };

    // Arena
    pub use leasehold_arena::{Arena, ArenaConfig, ConfigError, Placement};

    // List
    pub use leasehold_list::{ForwardList, ListError};
}
