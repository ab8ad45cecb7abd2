//! Placement policies: choosing an offset for a new block.
//!
//! Both policies read the sorted [`BlockTable`](crate::block::BlockTable)
//! in one forward pass and only ever return an offset whose range is clear
//! of every live block. The returned offset is not bounds-checked here; the
//! arena rejects it if `offset + bytes` reaches capacity.

use crate::block::BlockRecord;

/// Strategy used to pick the offset of each new block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Lowest offset whose range is clear of every block.
    ///
    /// Walks the blocks in offset order and, whenever the candidate range
    /// collides with a block, moves the candidate to that block's end plus
    /// the gap. Because the table is sorted, a block that has been passed
    /// can never collide again, so the single pass lands on the first fit.
    /// Sequential requests on a fresh arena are laid out back to back,
    /// one gap apart.
    #[default]
    FirstFit,
    /// Smallest free region that still holds the request.
    ///
    /// Ties go to the lower offset. The region after the last block counts
    /// as a candidate with its usable room.
    BestFit,
}

impl Placement {
    /// Choose an offset for `bytes` bytes among `blocks` (sorted by offset).
    pub fn locate(
        self,
        blocks: &[BlockRecord],
        bytes: usize,
        gap: usize,
        capacity: usize,
    ) -> usize {
        match self {
            Self::FirstFit => first_fit(blocks, bytes, gap),
            Self::BestFit => best_fit(blocks, bytes, gap, capacity),
        }
    }
}

fn first_fit(blocks: &[BlockRecord], bytes: usize, gap: usize) -> usize {
    let mut candidate = 0usize;
    for block in blocks {
        if block.overlaps(candidate, bytes) {
            candidate = block.end().saturating_add(gap);
        }
    }
    candidate
}

fn best_fit(blocks: &[BlockRecord], bytes: usize, gap: usize, capacity: usize) -> usize {
    // (room, offset) of the tightest region seen so far.
    let mut best: Option<(usize, usize)> = None;
    let mut consider = |room: usize, offset: usize| {
        if room >= bytes && best.map_or(true, |(r, _)| room < r) {
            best = Some((room, offset));
        }
    };

    let mut cursor = 0usize;
    for block in blocks {
        if block.offset >= cursor {
            consider(block.offset - cursor, cursor);
        }
        cursor = cursor.max(block.end().saturating_add(gap));
    }
    // The tail may not reach the final byte of the buffer.
    consider(capacity.saturating_sub(cursor).saturating_sub(1), cursor);

    best.map_or(cursor, |(_, offset)| offset)
}
