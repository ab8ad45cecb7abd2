//! Core types and traits for the Leasehold workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! allocation abstraction that sits between memory providers and the
//! containers that consume them:
//!
//! ```text
//! ForwardList<T, A: Allocator>          (leasehold-list)
//!         │ allocate::<Node<T>>(1) / deallocate(lease)
//!         ▼
//! ResourceAllocator ── SharedResource ── Rc<RefCell<dyn MemoryResource>>
//!                                                 │ allocate(bytes, align)
//!                                                 ▼
//!                                         Arena (leasehold-arena)
//! ```
//!
//! - [`MemoryResource`] is the untyped, byte-level provider contract.
//! - [`Allocator`] is the typed capability a container is generic over. It
//!   hands out [`Lease`]s, constructs values into them ([`Slot`]) and takes
//!   them back.
//! - [`ResourceAllocator`] adapts any shared [`MemoryResource`] into an
//!   [`Allocator`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alloc;
pub mod error;
pub mod id;
pub mod resource;

pub use alloc::{Allocator, Lease, ResourceAllocator, Slot};
pub use error::AllocError;
pub use id::{BlockAddr, ResourceId};
pub use resource::{MemoryResource, SharedResource};
