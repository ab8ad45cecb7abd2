//! Fixed-capacity arena memory resource for Leasehold.
//!
//! An [`Arena`] owns one contiguous byte buffer and leases ranges of it out
//! by `(arena id, offset)` address. Bookkeeping is a table of
//! `{offset, size}` records kept sorted by offset; placement walks that
//! table to find a clear range.
//!
//! # Architecture
//!
//! ```text
//! Arena (implements leasehold_core::MemoryResource)
//! ├── buffer: Box<[u8]>          (capacity bytes, never grows)
//! ├── BlockTable                 (live BlockRecords, sorted by offset)
//! └── ArenaConfig
//!     ├── capacity               (default 1024)
//!     ├── block_gap              (default 1 byte after each block)
//!     └── Placement              (FirstFit | BestFit)
//! ```
//!
//! # Non-features
//!
//! - No growth. A request whose range would reach the capacity fails with
//!   `OutOfMemory`.
//! - No coalescing. Adjacent freed ranges stay separate holes.
//! - Alignment is validated (non-zero power of two) but does not move
//!   placement.
//! - No locking. Share an arena between containers on one thread through
//!   [`SharedResource`](leasehold_core::SharedResource).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod block;
pub mod config;
pub mod error;
pub mod placement;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use block::{BlockRecord, BlockTable};
pub use config::ArenaConfig;
pub use error::ConfigError;
pub use placement::Placement;
