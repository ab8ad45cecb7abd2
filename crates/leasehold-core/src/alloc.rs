//! Typed allocation: leases, slots, and the [`Allocator`] capability.
//!
//! A container never sees raw addresses. It asks an [`Allocator`] for a
//! [`Lease`] sized for `count` values of `T`, constructs a value into it
//! (producing a [`Slot`]), and on removal destroys the slot and hands the
//! lease back. Leases are not `Clone`, so the typed path cannot release the
//! same storage twice.

use std::alloc::Layout;
use std::fmt;
use std::marker::PhantomData;

use crate::error::AllocError;
use crate::id::BlockAddr;
use crate::resource::SharedResource;

/// Storage for `count` values of `T`, granted by an [`Allocator`].
#[must_use = "a lease must be returned with `Allocator::deallocate`"]
pub struct Lease<T> {
    addr: BlockAddr,
    count: usize,
    layout: Layout,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Lease<T> {
    /// Wrap a granted range.
    ///
    /// Intended for [`Allocator`] implementations; `layout` must be the
    /// layout the range was requested with.
    pub fn new(addr: BlockAddr, count: usize, layout: Layout) -> Self {
        Self {
            addr,
            count,
            layout,
            _marker: PhantomData,
        }
    }

    /// Address of the granted range.
    pub fn addr(&self) -> BlockAddr {
        self.addr
    }

    /// Number of `T` values the range holds.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Layout the range was requested with.
    pub fn layout(&self) -> Layout {
        self.layout
    }
}

impl<T> fmt::Debug for Lease<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lease")
            .field("addr", &self.addr)
            .field("count", &self.count)
            .field("bytes", &self.layout.size())
            .finish()
    }
}

/// A value constructed into the lease that backs it.
pub struct Slot<T> {
    lease: Lease<T>,
    value: T,
}

impl<T> Slot<T> {
    /// Bind `value` to `lease`.
    pub fn new(lease: Lease<T>, value: T) -> Self {
        Self { lease, value }
    }

    /// Shared access to the value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Mutable access to the value.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// The lease backing this slot.
    pub fn lease(&self) -> &Lease<T> {
        &self.lease
    }

    /// Split into the lease and the value without dropping either.
    pub fn into_parts(self) -> (Lease<T>, T) {
        (self.lease, self.value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("addr", &self.lease.addr)
            .field("value", &self.value)
            .finish()
    }
}

/// Typed allocation capability consumed by containers.
///
/// Handles are cheap to clone; clones refer to the same storage.
/// Any implementation honouring this contract can back a container without
/// changing the container's observable behaviour.
pub trait Allocator: Clone {
    /// Obtain storage for `count` values of `T`.
    fn allocate<T>(&self, count: usize) -> Result<Lease<T>, AllocError>;

    /// Return storage obtained from [`allocate`](Allocator::allocate).
    fn deallocate<T>(&self, lease: Lease<T>) -> Result<(), AllocError>;

    /// Construct `value` into `lease`.
    fn construct<T>(&self, lease: Lease<T>, value: T) -> Slot<T> {
        Slot::new(lease, value)
    }

    /// Destroy the value held by `slot`, keeping its storage.
    fn destroy<T>(&self, slot: Slot<T>) -> Lease<T> {
        let (lease, value) = slot.into_parts();
        drop(value);
        lease
    }

    /// Whether storage from `self` may be released through `other`.
    fn is_equal(&self, other: &Self) -> bool;
}

/// Compute the layout for `count` values of `T`.
pub(crate) fn array_layout<T>(count: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(count).map_err(|_| AllocError::InvalidLayout {
        bytes: std::mem::size_of::<T>().saturating_mul(count),
        alignment: std::mem::align_of::<T>(),
    })
}

/// [`Allocator`] over a shared [`MemoryResource`](crate::MemoryResource).
///
/// Every typed request becomes a byte request against the resource, sized
/// and aligned for `T`.
#[derive(Clone, Debug)]
pub struct ResourceAllocator {
    resource: SharedResource,
}

impl ResourceAllocator {
    /// Allocate through `resource`.
    pub fn new(resource: SharedResource) -> Self {
        Self { resource }
    }

    /// The resource behind this allocator.
    pub fn resource(&self) -> &SharedResource {
        &self.resource
    }
}

impl From<SharedResource> for ResourceAllocator {
    fn from(resource: SharedResource) -> Self {
        Self::new(resource)
    }
}

impl Allocator for ResourceAllocator {
    fn allocate<T>(&self, count: usize) -> Result<Lease<T>, AllocError> {
        let layout = array_layout::<T>(count)?;
        let addr = self.resource.allocate(layout.size(), layout.align())?;
        Ok(Lease::new(addr, count, layout))
    }

    fn deallocate<T>(&self, lease: Lease<T>) -> Result<(), AllocError> {
        let layout = lease.layout();
        self.resource
            .deallocate(lease.addr(), layout.size(), layout.align())
    }

    fn is_equal(&self, other: &Self) -> bool {
        self.resource.is_equal(&other.resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ResourceId;
    use crate::resource::MemoryResource;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every request so tests can check what reached the resource.
    struct Recorder {
        id: ResourceId,
        requests: Vec<(usize, usize)>,
        live: Vec<usize>,
        cursor: usize,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                id: ResourceId::next(),
                requests: Vec::new(),
                live: Vec::new(),
                cursor: 0,
            }
        }
    }

    impl MemoryResource for Recorder {
        fn allocate(&mut self, bytes: usize, alignment: usize) -> Result<BlockAddr, AllocError> {
            if bytes == 0 {
                return Err(AllocError::InvalidLayout { bytes, alignment });
            }
            self.requests.push((bytes, alignment));
            let offset = self.cursor;
            self.cursor += bytes;
            self.live.push(offset);
            Ok(BlockAddr::new(self.resource_id(), offset))
        }

        fn deallocate(
            &mut self,
            addr: BlockAddr,
            _bytes: usize,
            _alignment: usize,
        ) -> Result<(), AllocError> {
            match self.live.iter().position(|&o| o == addr.offset) {
                Some(pos) => {
                    self.live.swap_remove(pos);
                    Ok(())
                }
                None => Err(AllocError::InvalidFree { addr }),
            }
        }

        fn resource_id(&self) -> ResourceId {
            self.id
        }
    }

    fn recorder() -> (Rc<RefCell<Recorder>>, ResourceAllocator) {
        let rec = Rc::new(RefCell::new(Recorder::new()));
        let alloc = ResourceAllocator::new(SharedResource::from_rc(Rc::clone(&rec)));
        (rec, alloc)
    }

    #[test]
    fn typed_request_uses_array_layout() {
        let (rec, alloc) = recorder();
        let lease = alloc.allocate::<u64>(3).unwrap();
        assert_eq!(lease.count(), 3);
        assert_eq!(lease.layout().size(), 24);
        assert_eq!(rec.borrow().requests, vec![(24, 8)]);
        alloc.deallocate(lease).unwrap();
        assert!(rec.borrow().live.is_empty());
    }

    #[test]
    fn construct_then_destroy_keeps_the_lease() {
        let (rec, alloc) = recorder();
        let lease = alloc.allocate::<String>(1).unwrap();
        let addr = lease.addr();
        let mut slot = alloc.construct(lease, String::from("node"));
        slot.get_mut().push('!');
        assert_eq!(slot.get(), "node!");
        let lease = alloc.destroy(slot);
        assert_eq!(lease.addr(), addr);
        alloc.deallocate(lease).unwrap();
        assert!(rec.borrow().live.is_empty());
    }

    #[test]
    fn into_parts_returns_value() {
        let (_rec, alloc) = recorder();
        let lease = alloc.allocate::<i32>(1).unwrap();
        let slot = alloc.construct(lease, 7);
        let (lease, value) = slot.into_parts();
        assert_eq!(value, 7);
        alloc.deallocate(lease).unwrap();
    }

    #[test]
    fn zero_count_is_rejected_by_resource() {
        let (_rec, alloc) = recorder();
        let err = alloc.allocate::<u32>(0).unwrap_err();
        assert!(matches!(err, AllocError::InvalidLayout { bytes: 0, .. }));
    }

    #[test]
    fn overflowing_layout_is_rejected() {
        let (rec, alloc) = recorder();
        let err = alloc.allocate::<u64>(usize::MAX).unwrap_err();
        assert!(matches!(err, AllocError::InvalidLayout { .. }));
        assert!(rec.borrow().requests.is_empty());
    }

    #[test]
    fn allocator_equality_follows_resource() {
        let (_rec, a) = recorder();
        let (_rec2, b) = recorder();
        let a2 = a.clone();
        assert!(a.is_equal(&a2));
        assert!(!a.is_equal(&b));
    }
}
