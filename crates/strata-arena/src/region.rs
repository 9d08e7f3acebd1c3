//! Fixed-capacity bump-allocated regions.
//!
//! A [`Region`] is one contiguous, word-aligned buffer with a cursor that
//! only moves forward on allocation. The [`Arena`](crate::Arena) chains
//! regions together and grows the chain when the current one is full.

use crate::align::{align_up, words_for, WORD_SIZE};
use crate::error::ArenaError;
use crate::raw;

/// A single contiguous buffer with bump allocation.
///
/// Regions are never freed individually. They are reset or rewound by
/// the arena and dropped together with it.
pub struct Region {
    /// Backing storage, in machine words. Allocated to full capacity at
    /// creation and never resized.
    data: Vec<usize>,
    /// Bump pointer: next free byte offset. Always a multiple of the word
    /// size and never past the end of `data`.
    used: usize,
}

impl Region {
    /// Create a region holding `capacity` bytes, rounded up to the word size.
    ///
    /// Storage is reserved fallibly, so a host that cannot supply the memory
    /// produces an error instead of aborting.
    ///
    /// # Errors
    ///
    /// [`ArenaError::BackingAllocationFailure`] if the rounded capacity
    /// overflows or the reservation fails.
    pub fn new(capacity: usize) -> Result<Self, ArenaError> {
        let failure = ArenaError::BackingAllocationFailure {
            requested: capacity,
        };
        let words = words_for(capacity).ok_or_else(|| failure.clone())?;
        let mut data = Vec::new();
        data.try_reserve_exact(words).map_err(|_| failure)?;
        data.resize(words, 0);
        Ok(Self { data, used: 0 })
    }

    /// Bump-allocate `size` bytes, rounded up to the word size.
    ///
    /// Returns the byte offset of the new block within this region.
    ///
    /// # Errors
    ///
    /// [`ArenaError::CapacityExceeded`] if the aligned size does not fit in
    /// the remaining room. The region is unchanged.
    pub fn alloc(&mut self, size: usize) -> Result<usize, ArenaError> {
        let remaining = self.remaining();
        let aligned = align_up(size).ok_or(ArenaError::CapacityExceeded {
            requested: size,
            remaining,
        })?;
        if aligned > remaining {
            return Err(ArenaError::CapacityExceeded {
                requested: aligned,
                remaining,
            });
        }
        let offset = self.used;
        self.used += aligned;
        Ok(offset)
    }

    /// Reset the bump pointer to zero. The storage is not cleared.
    pub fn reset(&mut self) {
        self.used = 0;
    }

    /// Move the bump pointer back to a previously observed position.
    pub(crate) fn rewind(&mut self, used: usize) {
        debug_assert!(used <= self.capacity());
        debug_assert_eq!(used % WORD_SIZE, 0);
        self.used = used;
    }

    /// Bytes handed out so far.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len() * WORD_SIZE
    }

    /// Bytes still available for bump allocation.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.used
    }

    /// Whether `offset..offset + len` lies inside this region.
    pub(crate) fn contains(&self, offset: usize, len: usize) -> bool {
        offset
            .checked_add(len)
            .is_some_and(|end| end <= self.capacity())
    }

    /// Address of the byte at `offset`.
    ///
    /// `offset` may equal the capacity, yielding the one-past-the-end
    /// address.
    pub(crate) fn ptr_at(&self, offset: usize) -> *const u8 {
        debug_assert!(offset <= self.capacity());
        self.data.as_ptr().cast::<u8>().wrapping_add(offset)
    }

    /// Shared byte view of `offset..offset + len`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the region's capacity.
    pub fn bytes(&self, offset: usize, len: usize) -> &[u8] {
        &raw::as_bytes(&self.data)[offset..offset + len]
    }

    /// Mutable byte view of `offset..offset + len`.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the region's capacity.
    pub fn bytes_mut(&mut self, offset: usize, len: usize) -> &mut [u8] {
        &mut raw::as_bytes_mut(&mut self.data)[offset..offset + len]
    }
}
