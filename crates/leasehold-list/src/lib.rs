//! Singly-linked list over an injected allocator.
//!
//! [`ForwardList<T, A>`] stores each element in a node whose storage is
//! leased from `A: Allocator`. The list depends only on the allocation
//! abstraction in `leasehold-core`; any provider that honours that contract
//! can back it.
//!
//! ```
//! use leasehold_arena::Arena;
//! use leasehold_core::ResourceAllocator;
//! use leasehold_list::ForwardList;
//!
//! let alloc = ResourceAllocator::new(Arena::new().into_shared());
//! let mut list = ForwardList::new_in(alloc.clone());
//! list.push_back(10)?;
//! list.push_back(20)?;
//! list.push_front(5)?;
//!
//! let copy = list.try_clone()?;
//! list.pop_front()?;
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
//! assert_eq!(copy.iter().copied().collect::<Vec<_>>(), vec![5, 10, 20]);
//! # Ok::<(), leasehold_list::ListError>(())
//! ```
//!
//! # Ownership
//!
//! Nodes sit in an index-addressed slot table owned by the list, and each
//! `next` edge is an index into it. Nodes are never shared between lists:
//! [`ForwardList::try_clone`] builds a separate chain, and
//! [`ForwardList::take`] hands the whole table over and leaves the source
//! empty. Every path that removes a node (`pop_front`, `clear`, drop,
//! reassignment, draining iteration) returns its lease to the allocator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod error;
pub mod iter;
pub mod list;
mod node;

pub use cursor::Cursor;
pub use error::ListError;
pub use iter::{IntoIter, Iter, IterMut};
pub use list::ForwardList;
