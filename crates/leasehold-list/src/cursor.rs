//! Position cursors: the `begin()`/`end()` pair of a list.

use std::fmt;
use std::ptr;

use crate::node::{NodeIndex, NodeTable};

/// A read-only position in a [`ForwardList`](crate::ForwardList).
///
/// A cursor either references a node or is the past-the-end sentinel.
/// Two cursors are equal when they reference the same node of the same
/// list, or are both the sentinel of the same list.
pub struct Cursor<'a, T> {
    nodes: &'a NodeTable<T>,
    current: Option<NodeIndex>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(nodes: &'a NodeTable<T>, current: Option<NodeIndex>) -> Self {
        Self { nodes, current }
    }

    /// The value at this position, or `None` at the sentinel.
    pub fn get(&self) -> Option<&'a T> {
        let nodes: &'a NodeTable<T> = self.nodes;
        self.current.map(|idx| &nodes[idx].value)
    }

    /// Step to the next node. The sentinel stays where it is.
    pub fn advance(&mut self) {
        if let Some(idx) = self.current {
            self.current = self.nodes[idx].next;
        }
    }

    /// Whether this is the past-the-end sentinel.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.current == other.current
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current {
            Some(idx) => write!(f, "Cursor(node {idx})"),
            None => write!(f, "Cursor(end)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use leasehold_arena::Arena;
    use leasehold_core::ResourceAllocator;

    use crate::ForwardList;

    #[test]
    fn walks_from_begin_to_end() {
        let mut list = ForwardList::new_in(ResourceAllocator::new(Arena::new().into_shared()));
        for v in [3, 2, 1] {
            list.push_front(v).unwrap();
        }
        let mut it = list.begin();
        let mut seen = Vec::new();
        while it != list.end() {
            seen.extend(it.get().copied());
            it.advance();
        }
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(it.is_end());
        assert_eq!(it.get(), None);
    }

    #[test]
    fn advancing_the_sentinel_is_a_no_op() {
        let list: ForwardList<i32> =
            ForwardList::new_in(ResourceAllocator::new(Arena::new().into_shared()));
        let mut end = list.end();
        end.advance();
        assert_eq!(end, list.end());
        assert_eq!(list.begin(), list.end());
    }

    #[test]
    fn cursors_compare_by_node() {
        let mut list = ForwardList::new_in(ResourceAllocator::new(Arena::new().into_shared()));
        list.push_back(7).unwrap();
        list.push_back(7).unwrap();
        let first = list.begin();
        let mut second = first;
        second.advance();
        // Equal values, different nodes.
        assert_eq!(first.get(), second.get());
        assert_ne!(first, second);
        assert_eq!(first, list.begin());
    }

    #[test]
    fn sentinels_of_different_lists_differ() {
        let alloc = ResourceAllocator::new(Arena::new().into_shared());
        let a: ForwardList<i32> = ForwardList::new_in(alloc.clone());
        let b: ForwardList<i32> = ForwardList::new_in(alloc);
        assert_ne!(a.end(), b.end());
    }
}
