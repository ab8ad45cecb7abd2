//! Byte-level memory resources and the shared handle over them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::AllocError;
use crate::id::{BlockAddr, ResourceId};

/// A provider of byte ranges.
///
/// Implementors own some backing storage and lease ranges of it out by
/// address. Every successful [`allocate`](MemoryResource::allocate) is
/// expected to be matched by exactly one
/// [`deallocate`](MemoryResource::deallocate) naming the same address.
pub trait MemoryResource {
    /// Lease `bytes` bytes with the given alignment.
    ///
    /// Returns the address of the granted range, or an error if the
    /// request is malformed or cannot be satisfied.
    fn allocate(&mut self, bytes: usize, alignment: usize) -> Result<BlockAddr, AllocError>;

    /// Return a range previously granted by this resource.
    ///
    /// Fails with [`AllocError::InvalidFree`] if `addr` does not name a
    /// live grant of this resource.
    fn deallocate(
        &mut self,
        addr: BlockAddr,
        bytes: usize,
        alignment: usize,
    ) -> Result<(), AllocError>;

    /// The identity of this resource instance.
    fn resource_id(&self) -> ResourceId;

    /// Whether memory granted by `self` can be released through `other`.
    ///
    /// The default is instance identity.
    fn is_equal(&self, other: &dyn MemoryResource) -> bool {
        self.resource_id() == other.resource_id()
    }
}

/// Cloneable, single-threaded handle to a [`MemoryResource`].
///
/// Several containers may hold clones of the same handle; all of them
/// draw from one resource. The handle is `Rc`-based, so it is neither
/// `Send` nor `Sync`.
#[derive(Clone)]
pub struct SharedResource {
    inner: Rc<RefCell<dyn MemoryResource>>,
    id: ResourceId,
}

impl SharedResource {
    /// Move `resource` behind a new shared handle.
    pub fn new<R: MemoryResource + 'static>(resource: R) -> Self {
        Self::from_rc(Rc::new(RefCell::new(resource)))
    }

    /// Share a resource the caller keeps its own typed reference to.
    ///
    /// Useful when the caller wants to inspect the concrete resource (block
    /// counts, usage) while containers allocate through the handle.
    pub fn from_rc<R: MemoryResource + 'static>(resource: Rc<RefCell<R>>) -> Self {
        let id = resource.borrow().resource_id();
        Self {
            inner: resource,
            id,
        }
    }

    /// Identity of the underlying resource.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Forward an allocation request to the resource.
    pub fn allocate(&self, bytes: usize, alignment: usize) -> Result<BlockAddr, AllocError> {
        self.inner.borrow_mut().allocate(bytes, alignment)
    }

    /// Forward a release to the resource.
    pub fn deallocate(
        &self,
        addr: BlockAddr,
        bytes: usize,
        alignment: usize,
    ) -> Result<(), AllocError> {
        self.inner.borrow_mut().deallocate(addr, bytes, alignment)
    }

    /// Whether both handles reach interchangeable storage.
    pub fn is_equal(&self, other: &SharedResource) -> bool {
        self.inner.borrow().is_equal(&*other.inner.borrow())
    }

    /// Number of live handles to the underlying resource.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }
}

impl fmt::Debug for SharedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedResource")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out increasing offsets and remembers nothing but a count.
    struct Bump {
        id: ResourceId,
        cursor: usize,
        live: usize,
    }

    impl Bump {
        fn new() -> Self {
            Self {
                id: ResourceId::next(),
                cursor: 0,
                live: 0,
            }
        }
    }

    impl MemoryResource for Bump {
        fn allocate(&mut self, bytes: usize, _alignment: usize) -> Result<BlockAddr, AllocError> {
            let addr = BlockAddr::new(self.id, self.cursor);
            self.cursor += bytes;
            self.live += 1;
            Ok(addr)
        }

        fn deallocate(
            &mut self,
            addr: BlockAddr,
            _bytes: usize,
            _alignment: usize,
        ) -> Result<(), AllocError> {
            if self.live == 0 || addr.resource != self.id {
                return Err(AllocError::InvalidFree { addr });
            }
            self.live -= 1;
            Ok(())
        }

        fn resource_id(&self) -> ResourceId {
            self.id
        }
    }

    #[test]
    fn clones_share_the_resource() {
        let a = SharedResource::new(Bump::new());
        let b = a.clone();
        assert!(a.is_equal(&b));
        assert_eq!(a.handle_count(), 2);
        let first = a.allocate(8, 8).unwrap();
        let second = b.allocate(8, 8).unwrap();
        assert_eq!(first.offset, 0);
        assert_eq!(second.offset, 8);
    }

    #[test]
    fn distinct_resources_are_not_equal() {
        let a = SharedResource::new(Bump::new());
        let b = SharedResource::new(Bump::new());
        assert!(!a.is_equal(&b));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn from_rc_keeps_caller_view() {
        let bump = Rc::new(RefCell::new(Bump::new()));
        let shared = SharedResource::from_rc(Rc::clone(&bump));
        let addr = shared.allocate(4, 4).unwrap();
        assert_eq!(bump.borrow().live, 1);
        shared.deallocate(addr, 4, 4).unwrap();
        assert_eq!(bump.borrow().live, 0);
        assert_eq!(shared.id(), bump.borrow().resource_id());
    }

    #[test]
    fn foreign_address_is_rejected() {
        let a = SharedResource::new(Bump::new());
        let b = SharedResource::new(Bump::new());
        let addr = a.allocate(4, 4).unwrap();
        let err = b.deallocate(addr, 4, 4).unwrap_err();
        assert_eq!(err, AllocError::InvalidFree { addr });
    }
}
