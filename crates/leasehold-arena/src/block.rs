//! Block records and the sorted block table.
//!
//! A [`BlockRecord`] describes one leased byte range. The [`BlockTable`]
//! keeps every live record ordered by offset, which is what lets a single
//! forward pass over it find free space (see [`crate::placement`]).

use smallvec::SmallVec;

/// One leased range `[offset, offset + size)` within the arena buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockRecord {
    /// Byte offset of the range start.
    pub offset: usize,
    /// Length of the range in bytes.
    pub size: usize,
}

impl BlockRecord {
    /// Create a record.
    pub fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// One past the last byte of the range.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.size)
    }

    /// Whether `[offset, offset + len)` shares any byte with this record.
    pub fn overlaps(&self, offset: usize, len: usize) -> bool {
        offset < self.end() && self.offset < offset.saturating_add(len)
    }
}

/// Live block records, sorted ascending by offset.
///
/// Records never overlap and are never split or merged: each one is
/// inserted by a successful allocation and removed by the matching release.
/// Small arenas hold few blocks, so the first sixteen records live inline.
#[derive(Clone, Debug, Default)]
pub struct BlockTable {
    blocks: SmallVec<[BlockRecord; 16]>,
}

impl BlockTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record at its sorted position.
    pub fn insert(&mut self, record: BlockRecord) {
        let at = self.blocks.partition_point(|b| b.offset < record.offset);
        self.blocks.insert(at, record);
    }

    /// Remove the record starting exactly at `offset`.
    pub fn remove(&mut self, offset: usize) -> Option<BlockRecord> {
        let at = self.position(offset)?;
        Some(self.blocks.remove(at))
    }

    /// The record starting exactly at `offset`, if any.
    pub fn get(&self, offset: usize) -> Option<&BlockRecord> {
        self.position(offset).map(|at| &self.blocks[at])
    }

    /// Whether any live record overlaps `[offset, offset + len)`.
    pub fn overlaps_any(&self, offset: usize, len: usize) -> bool {
        self.blocks.iter().any(|b| b.overlaps(offset, len))
    }

    /// All live records in offset order.
    pub fn as_slice(&self) -> &[BlockRecord] {
        &self.blocks
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block is leased.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sum of the sizes of all live records.
    pub fn used_bytes(&self) -> usize {
        self.blocks.iter().map(|b| b.size).sum()
    }

    fn position(&self, offset: usize) -> Option<usize> {
        self.blocks
            .binary_search_by_key(&offset, |b| b.offset)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_half_open() {
        let block = BlockRecord::new(10, 5);
        assert!(block.overlaps(10, 1));
        assert!(block.overlaps(14, 1));
        assert!(block.overlaps(0, 11));
        assert!(!block.overlaps(15, 3));
        assert!(!block.overlaps(5, 5));
    }

    #[test]
    fn insert_keeps_offset_order() {
        let mut table = BlockTable::new();
        table.insert(BlockRecord::new(40, 4));
        table.insert(BlockRecord::new(0, 4));
        table.insert(BlockRecord::new(20, 4));
        let offsets: Vec<usize> = table.as_slice().iter().map(|b| b.offset).collect();
        assert_eq!(offsets, vec![0, 20, 40]);
    }

    #[test]
    fn remove_requires_exact_start() {
        let mut table = BlockTable::new();
        table.insert(BlockRecord::new(8, 16));
        assert!(table.remove(9).is_none());
        assert_eq!(table.remove(8), Some(BlockRecord::new(8, 16)));
        assert!(table.is_empty());
        assert!(table.remove(8).is_none());
    }

    #[test]
    fn used_bytes_sums_sizes() {
        let mut table = BlockTable::new();
        table.insert(BlockRecord::new(0, 10));
        table.insert(BlockRecord::new(11, 20));
        assert_eq!(table.used_bytes(), 30);
        assert_eq!(table.len(), 2);
        assert!(table.overlaps_any(25, 2));
        assert!(!table.overlaps_any(31, 2));
    }

    #[test]
    fn spills_past_inline_capacity() {
        let mut table = BlockTable::new();
        for i in (0..40).rev() {
            table.insert(BlockRecord::new(i * 2, 1));
        }
        assert_eq!(table.len(), 40);
        assert!(table
            .as_slice()
            .windows(2)
            .all(|w| w[0].offset < w[1].offset));
    }
}
