//! Node storage: an index-addressed table of leased slots.
//!
//! Every node lives in a [`Slot`] whose lease came from the list's
//! allocator. The `next` edge is a table index, so the chain is a set of
//! single-owner edges rooted at the list head and no node is ever reachable
//! through two paths. Indices of removed nodes go on a free list and are
//! reused by later insertions.

use std::ops::{Index, IndexMut};

use leasehold_core::Slot;

/// Position of a node in its [`NodeTable`].
pub(crate) type NodeIndex = usize;

/// One link of the chain.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Option<NodeIndex>,
}

/// Slot table holding every live node of one list.
pub(crate) struct NodeTable<T> {
    /// Occupied and vacant slots; vacant ones are listed in `free_list`.
    slots: Vec<Option<Slot<Node<T>>>>,
    free_list: Vec<NodeIndex>,
}

impl<T> NodeTable<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Store a constructed node, reusing a vacant slot when one exists.
    pub(crate) fn insert(&mut self, slot: Slot<Node<T>>) -> NodeIndex {
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(slot);
            idx
        } else {
            self.slots.push(Some(slot));
            self.slots.len() - 1
        }
    }

    /// Take the node at `idx` out of the table.
    ///
    /// # Panics
    ///
    /// Panics if the slot is vacant. Indices only come from the chain, so a
    /// vacant slot means the chain itself is corrupt.
    pub(crate) fn take(&mut self, idx: NodeIndex) -> Slot<Node<T>> {
        match self.slots[idx].take() {
            Some(slot) => {
                self.free_list.push(idx);
                slot
            }
            None => panic!("node slot {idx} is vacant"),
        }
    }

    /// Drop all bookkeeping. Only valid once every node has been taken.
    pub(crate) fn reset(&mut self) {
        debug_assert!(self.slots.iter().all(Option::is_none));
        self.slots.clear();
        self.free_list.clear();
    }

    /// Number of occupied slots.
    pub(crate) fn occupied(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Mutable access to every node, indexed by position.
    ///
    /// Lets a caller hold `&mut` to several nodes at once without aliasing.
    pub(crate) fn split_mut(&mut self) -> Vec<Option<&mut Node<T>>> {
        self.slots
            .iter_mut()
            .map(|slot| slot.as_mut().map(Slot::get_mut))
            .collect()
    }
}

impl<T> Default for NodeTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeIndex> for NodeTable<T> {
    type Output = Node<T>;

    fn index(&self, idx: NodeIndex) -> &Node<T> {
        match &self.slots[idx] {
            Some(slot) => slot.get(),
            None => panic!("node slot {idx} is vacant"),
        }
    }
}

impl<T> IndexMut<NodeIndex> for NodeTable<T> {
    fn index_mut(&mut self, idx: NodeIndex) -> &mut Node<T> {
        match &mut self.slots[idx] {
            Some(slot) => slot.get_mut(),
            None => panic!("node slot {idx} is vacant"),
        }
    }
}
