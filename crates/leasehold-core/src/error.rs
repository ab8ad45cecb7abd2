//! Allocation error types.

use std::error::Error;
use std::fmt;

use crate::id::BlockAddr;

/// Errors reported by a [`MemoryResource`](crate::MemoryResource) or an
/// [`Allocator`](crate::Allocator).
///
/// All variants are local, synchronous failures surfaced to the direct
/// caller. Nothing is retried internally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The request cannot be placed inside the resource's capacity.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
        /// Offset at which placement was attempted.
        offset: usize,
        /// Total capacity of the resource in bytes.
        capacity: usize,
    },
    /// A release named an address with no live grant behind it.
    InvalidFree {
        /// The address that was released.
        addr: BlockAddr,
    },
    /// The request had zero size, a non-power-of-two alignment, or a
    /// layout that overflows `isize`.
    InvalidLayout {
        /// Number of bytes requested.
        bytes: usize,
        /// Requested alignment.
        alignment: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory {
                requested,
                offset,
                capacity,
            } => {
                write!(
                    f,
                    "out of memory: requested {requested} bytes at offset {offset}, capacity {capacity} bytes"
                )
            }
            Self::InvalidFree { addr } => {
                write!(f, "attempt to release an unallocated block at {addr}")
            }
            Self::InvalidLayout { bytes, alignment } => {
                write!(f, "invalid layout: {bytes} bytes with alignment {alignment}")
            }
        }
    }
}

impl Error for AllocError {}
