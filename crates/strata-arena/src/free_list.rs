//! Address-ordered free list with eager coalescing.
//!
//! [`FreeList`] tracks blocks handed back to the arena through
//! `recycle`. It is a side structure owned by the arena: freed bytes are
//! never reused to store list nodes. Blocks are ordered by
//! `(region, offset)`, which is address order across the region chain,
//! and blocks that touch are merged as soon as they meet.

/// A reclaimed block available for reuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreeBlock {
    /// Index of the region holding the block.
    pub region: usize,
    /// Byte offset of the block within its region.
    pub offset: usize,
    /// Size of the block in bytes (word aligned).
    pub size: usize,
}

/// Smallest block the free list accepts: the footprint of one node.
///
/// Blocks below this size cost more to track than they can return.
pub const MIN_RECYCLE_BYTES: usize = std::mem::size_of::<FreeBlock>();

impl FreeBlock {
    /// One past the last byte of the block.
    pub fn end(&self) -> usize {
        self.offset + self.size
    }

    fn key(&self) -> (usize, usize) {
        (self.region, self.offset)
    }

    /// Whether `next` starts exactly where `self` ends.
    fn touches(&self, next: &FreeBlock) -> bool {
        self.region == next.region && self.end() == next.offset
    }

    fn overlaps(&self, other: &FreeBlock) -> bool {
        self.region == other.region && self.offset < other.end() && other.offset < self.end()
    }
}

/// Address-sorted collection of free blocks.
///
/// Invariants: blocks are strictly ordered by `(region, offset)`, never
/// overlap, and no two neighbours touch (they would have been merged).
#[derive(Clone, Debug, Default)]
pub struct FreeList {
    blocks: Vec<FreeBlock>,
}

impl FreeList {
    /// Create an empty free list.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Insert a block in address order, then run one coalescing pass.
    ///
    /// Returns `false` and leaves the list unchanged if the block overlaps
    /// a block already on the list.
    pub fn insert(&mut self, block: FreeBlock) -> bool {
        let pos = self
            .blocks
            .iter()
            .position(|b| b.key() >= block.key())
            .unwrap_or(self.blocks.len());

        let clashes_prev = pos > 0 && self.blocks[pos - 1].overlaps(&block);
        let clashes_next = self.blocks.get(pos).is_some_and(|b| b.overlaps(&block));
        if clashes_prev || clashes_next {
            return false;
        }

        self.blocks.insert(pos, block);
        self.coalesce();
        true
    }

    /// Merge every pair of touching neighbours in a single pass.
    fn coalesce(&mut self) {
        self.blocks.dedup_by(|next, prev| {
            if prev.touches(next) {
                prev.size += next.size;
                true
            } else {
                false
            }
        });
    }

    /// Unlink and return the first block of at least `min_size` bytes.
    ///
    /// The block is returned whole; any excess over `min_size` stays with
    /// it rather than being split off.
    pub fn take_first_fit(&mut self, min_size: usize) -> Option<FreeBlock> {
        let pos = self.blocks.iter().position(|b| b.size >= min_size)?;
        Some(self.blocks.remove(pos))
    }

    /// Unlink and return the head block if it holds at least `min_size`
    /// bytes. Larger blocks further down are not considered.
    pub fn take_head(&mut self, min_size: usize) -> Option<FreeBlock> {
        if self.blocks.first()?.size >= min_size {
            Some(self.blocks.remove(0))
        } else {
            None
        }
    }

    /// Drop every block.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Number of blocks on the list.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the list holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sum of all block sizes in bytes.
    pub fn total_bytes(&self) -> usize {
        self.blocks.iter().map(|b| b.size).sum()
    }

    /// Blocks in address order.
    pub fn iter(&self) -> impl Iterator<Item = &FreeBlock> + '_ {
        self.blocks.iter()
    }
}
