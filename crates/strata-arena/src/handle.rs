//! Allocation handles.
//!
//! An [`Allocation`] records where a block lives inside an arena: the
//! region index, the byte offset within that region, and the usable
//! length. Resolve it to bytes or to a raw address through the arena that
//! produced it.

use std::fmt;

/// Location of a block handed out by an [`Arena`](crate::Arena).
///
/// Handles are plain data. They stay resolvable for as long as the arena
/// lives, but the bytes they name are reused after `reset`, after `pop`
/// past the mark they were allocated under, and after `recycle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Allocation {
    /// Index of the region in the arena's chain.
    pub(crate) region: usize,
    /// Byte offset within the region. Always word aligned.
    pub(crate) offset: usize,
    /// Usable length in bytes.
    pub(crate) len: usize,
}

impl Allocation {
    pub(crate) fn new(region: usize, offset: usize, len: usize) -> Self {
        Self {
            region,
            offset,
            len,
        }
    }

    /// Index of the region holding this block.
    pub fn region(&self) -> usize {
        self.region
    }

    /// Byte offset of the block within its region.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Usable length in bytes.
    ///
    /// For a bump allocation this is the requested size. A block served
    /// from the free list may be longer than requested.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Allocation(region={}, off={}, len={})",
            self.region, self.offset, self.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let a = Allocation::new(2, 64, 10);
        assert_eq!(a.region(), 2);
        assert_eq!(a.offset(), 64);
        assert_eq!(a.len(), 10);
        assert!(!a.is_empty());
        assert!(Allocation::new(0, 0, 0).is_empty());
    }

    #[test]
    fn display_format() {
        let a = Allocation::new(1, 16, 8);
        assert_eq!(a.to_string(), "Allocation(region=1, off=16, len=8)");
    }
}
