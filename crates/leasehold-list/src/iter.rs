//! Forward iterators over a [`ForwardList`].

use std::fmt;
use std::iter::FusedIterator;

use leasehold_core::Allocator;

use crate::list::ForwardList;
use crate::node::{Node, NodeIndex, NodeTable};

/// Shared iterator, created by [`ForwardList::iter`].
pub struct Iter<'a, T> {
    nodes: &'a NodeTable<T>,
    next: Option<NodeIndex>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a NodeTable<T>, head: Option<NodeIndex>, len: usize) -> Self {
        Self {
            nodes,
            next: head,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let idx = self.next?;
        let nodes: &'a NodeTable<T> = self.nodes;
        let node = &nodes[idx];
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Mutable iterator, created by [`ForwardList::iter_mut`].
///
/// Chain order differs from slot order, so the iterator splits the node
/// table into per-slot `&mut` handles when it is created (one heap
/// allocation sized to the table) and takes each handle as the chain
/// reaches it.
pub struct IterMut<'a, T> {
    /// Per-slot `&mut` handles; each one is taken when its node is visited.
    nodes: Vec<Option<&'a mut Node<T>>>,
    next: Option<NodeIndex>,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(nodes: &'a mut NodeTable<T>, head: Option<NodeIndex>, len: usize) -> Self {
        Self {
            nodes: nodes.split_mut(),
            next: head,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let idx = self.next?;
        let node = self.nodes.get_mut(idx)?.take()?;
        self.next = node.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// Owning iterator, created by [`ForwardList::into_iter`].
///
/// Each element's node storage is returned to the allocator as the element
/// is yielded; whatever is left is released when the iterator is dropped.
pub struct IntoIter<T, A: Allocator> {
    list: ForwardList<T, A>,
}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(crate) fn new(list: ForwardList<T, A>) -> Self {
        Self { list }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let (lease, value) = self.list.detach_front()?;
        self.list.release_quietly(lease);
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}
