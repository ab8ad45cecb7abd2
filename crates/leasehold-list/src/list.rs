//! The [`ForwardList`] container.

use std::fmt;
use std::mem;

use leasehold_core::{Allocator, Lease, ResourceAllocator};

use crate::cursor::Cursor;
use crate::error::ListError;
use crate::iter::{IntoIter, Iter, IterMut};
use crate::node::{Node, NodeIndex, NodeTable};

/// A singly-linked list whose nodes are leased from an injected allocator.
///
/// Every node costs one `allocate::<Node<T>>(1)` on the bound allocator and
/// is returned to it when the node is removed, cleared, or dropped.
/// Insertion and removal at the front are O(1). There is no tail pointer,
/// so [`push_back`](ForwardList::push_back) walks the whole chain.
///
/// Copy and move are explicit operations rather than `Clone`/assignment,
/// because copying can fail when the allocator runs out of space:
///
/// | Operation | Method |
/// |-----------|--------|
/// | copy construction | [`try_clone`](ForwardList::try_clone), [`try_clone_in`](ForwardList::try_clone_in) |
/// | copy assignment | [`assign`](ForwardList::assign) |
/// | move construction | [`take`](ForwardList::take) |
/// | move assignment | [`move_assign`](ForwardList::move_assign) |
pub struct ForwardList<T, A: Allocator = ResourceAllocator> {
    alloc: A,
    nodes: NodeTable<T>,
    head: Option<NodeIndex>,
    len: usize,
}

impl<T, A: Allocator> ForwardList<T, A> {
    /// Create an empty list that allocates through `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            alloc,
            nodes: NodeTable::new(),
            head: None,
            len: 0,
        }
    }

    /// Create a list of `count` default values.
    ///
    /// If the allocator fails partway, the nodes built so far are released
    /// and the error is returned.
    pub fn with_len_in(count: usize, alloc: A) -> Result<Self, ListError>
    where
        T: Default,
    {
        let mut list = Self::new_in(alloc);
        let mut tail = None;
        for _ in 0..count {
            tail = Some(list.append(tail, T::default())?);
        }
        Ok(list)
    }

    /// The allocator nodes are leased from.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Number of elements. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `value` before the current first element. O(1).
    ///
    /// On allocator failure the list is unchanged and `value` is dropped.
    pub fn push_front(&mut self, value: T) -> Result<(), ListError> {
        let idx = self.alloc_node(value, self.head)?;
        self.head = Some(idx);
        self.len += 1;
        Ok(())
    }

    /// Insert `value` after the current last element. O(n).
    ///
    /// On allocator failure the list is unchanged and `value` is dropped.
    pub fn push_back(&mut self, value: T) -> Result<(), ListError> {
        let tail = self.tail();
        self.append(tail, value)?;
        Ok(())
    }

    /// Remove the first element and return it.
    ///
    /// Fails with [`ListError::Empty`] without touching the list when it is
    /// empty. If the allocator rejects the release, the node is still
    /// unlinked and the allocator's error is returned.
    pub fn pop_front(&mut self) -> Result<T, ListError> {
        let (lease, value) = self.detach_front().ok_or(ListError::Empty)?;
        self.alloc.deallocate(lease)?;
        Ok(value)
    }

    /// Shared reference to the first element.
    pub fn front(&self) -> Result<&T, ListError> {
        let idx = self.head.ok_or(ListError::Empty)?;
        Ok(&self.nodes[idx].value)
    }

    /// Mutable reference to the first element.
    ///
    /// Writes through it are seen by later iteration.
    pub fn front_mut(&mut self) -> Result<&mut T, ListError> {
        let idx = self.head.ok_or(ListError::Empty)?;
        Ok(&mut self.nodes[idx].value)
    }

    /// Remove every element, returning all node storage to the allocator.
    ///
    /// Never fails. A release the allocator rejects is logged and skipped.
    pub fn clear(&mut self) {
        let mut cursor = self.head.take();
        while let Some(idx) = cursor {
            let slot = self.nodes.take(idx);
            cursor = slot.get().next;
            let lease = self.alloc.destroy(slot);
            if let Err(err) = self.alloc.deallocate(lease) {
                tracing::error!(%err, "list node release failed during clear");
            }
        }
        self.nodes.reset();
        self.len = 0;
    }

    /// Iterate over shared references, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.head, self.len)
    }

    /// Iterate over mutable references, front to back.
    ///
    /// Creating the iterator collects one handle per table slot into a
    /// `Vec`, so each call costs O(slots) time and memory up front.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.nodes, self.head, self.len)
    }

    /// Cursor at the first node, or equal to [`end`](ForwardList::end) when
    /// the list is empty.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(&self.nodes, self.head)
    }

    /// The past-the-end sentinel cursor.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(&self.nodes, None)
    }

    /// Move the contents out into a new list. O(1).
    ///
    /// The returned list owns every node and a clone of the allocator;
    /// `self` is left empty and keeps its allocator.
    pub fn take(&mut self) -> Self {
        Self {
            alloc: self.alloc.clone(),
            nodes: mem::take(&mut self.nodes),
            head: self.head.take(),
            len: mem::replace(&mut self.len, 0),
        }
    }

    /// Release this list's nodes, then take over `other`'s nodes and
    /// allocator.
    ///
    /// `other` is left empty, bound to the allocator `self` had.
    pub fn move_assign(&mut self, other: &mut Self) {
        self.clear();
        mem::swap(self, other);
    }

    /// Deep-copy into a new list on the same allocator.
    pub fn try_clone(&self) -> Result<Self, ListError>
    where
        T: Clone,
    {
        self.try_clone_in(self.alloc.clone())
    }

    /// Deep-copy into a new list on `alloc`.
    ///
    /// The copy shares no nodes with `self`. If the allocator fails partway
    /// the partial copy is released and the error is returned.
    pub fn try_clone_in(&self, alloc: A) -> Result<Self, ListError>
    where
        T: Clone,
    {
        let mut copy = Self::new_in(alloc);
        let mut tail = None;
        for value in self.iter() {
            tail = Some(copy.append(tail, value.clone())?);
        }
        Ok(copy)
    }

    /// Replace the contents with a deep copy of `other`.
    ///
    /// The copy is built on `self`'s allocator before anything is released,
    /// so on failure `self` is left exactly as it was.
    pub fn assign(&mut self, other: &Self) -> Result<(), ListError>
    where
        T: Clone,
    {
        let mut copy = other.try_clone_in(self.alloc.clone())?;
        mem::swap(self, &mut copy);
        Ok(())
    }

    /// Unlink the head node, handing back its storage and value.
    pub(crate) fn detach_front(&mut self) -> Option<(Lease<Node<T>>, T)> {
        let idx = self.head?;
        let (lease, node) = self.nodes.take(idx).into_parts();
        self.head = node.next;
        self.len -= 1;
        if self.len == 0 {
            self.nodes.reset();
        }
        debug_assert_eq!(self.nodes.occupied(), self.len);
        Some((lease, node.value))
    }

    /// Release a lease on a path that cannot report failure.
    pub(crate) fn release_quietly(&self, lease: Lease<Node<T>>) {
        if let Err(err) = self.alloc.deallocate(lease) {
            tracing::error!(%err, "list node release failed");
        }
    }

    fn alloc_node(&mut self, value: T, next: Option<NodeIndex>) -> Result<NodeIndex, ListError> {
        let lease = self.alloc.allocate::<Node<T>>(1)?;
        let slot = self.alloc.construct(lease, Node { value, next });
        Ok(self.nodes.insert(slot))
    }

    /// Link a new node after `tail` (or as head when `tail` is `None`).
    fn append(&mut self, tail: Option<NodeIndex>, value: T) -> Result<NodeIndex, ListError> {
        let idx = self.alloc_node(value, None)?;
        match tail {
            Some(tail) => self.nodes[tail].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.len += 1;
        Ok(idx)
    }

    fn tail(&self) -> Option<NodeIndex> {
        let mut cursor = self.head?;
        while let Some(next) = self.nodes[cursor].next {
            cursor = next;
        }
        Some(cursor)
    }
}

impl<T, A: Allocator> Drop for ForwardList<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: PartialEq, A: Allocator> PartialEq for ForwardList<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator> Eq for ForwardList<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for ForwardList<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a ForwardList<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut ForwardList<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, A: Allocator> IntoIterator for ForwardList<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter::new(self)
    }
}
