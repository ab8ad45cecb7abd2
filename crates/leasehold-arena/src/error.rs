//! Arena-specific error types.
//!
//! Allocation failures use [`AllocError`](leasehold_core::AllocError) from
//! `leasehold-core`, since they cross the [`MemoryResource`] boundary.
//! This module only covers construction.
//!
//! [`MemoryResource`]: leasehold_core::MemoryResource

use std::error::Error;
use std::fmt;

/// Errors that can occur when building an arena from an
/// [`ArenaConfig`](crate::ArenaConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured capacity is zero; no request could ever be placed.
    ZeroCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "arena capacity must be non-zero"),
        }
    }
}

impl Error for ConfigError {}
