//! List error types.

use std::error::Error;
use std::fmt;

use leasehold_core::AllocError;

/// Errors from [`ForwardList`](crate::ForwardList) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    /// `front`, `front_mut` or `pop_front` on an empty list.
    ///
    /// The list is left exactly as it was.
    Empty,
    /// The allocator refused to grant or take back node storage.
    Alloc(AllocError),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "list is empty"),
            Self::Alloc(err) => write!(f, "node allocation failed: {err}"),
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Alloc(err) => Some(err),
            Self::Empty => None,
        }
    }
}

impl From<AllocError> for ListError {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}
