//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
///
/// Allocation failures are always returned as values. Recycle errors are
/// diagnostics only: the arena is left untouched and callers may ignore
/// them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The host could not supply backing storage for a new region.
    BackingAllocationFailure {
        /// Number of bytes requested for the region.
        requested: usize,
    },
    /// A request does not fit in the remaining room of a single region.
    ///
    /// Region-local: [`Arena::allocate`](crate::Arena::allocate) recovers
    /// from it by walking the chain or growing, and never returns it.
    CapacityExceeded {
        /// Number of bytes requested (word aligned).
        requested: usize,
        /// Bytes left in the region.
        remaining: usize,
    },
    /// Growing the arena would exceed the configured region limit.
    RegionLimit {
        /// The configured maximum number of regions.
        limit: usize,
    },
    /// A recycled block is too small to be tracked by the free list.
    InvalidRecycle {
        /// Word-aligned size of the rejected block.
        size: usize,
        /// Minimum block size the free list accepts.
        min: usize,
    },
    /// `recycle` was called on an arena created without a free list.
    RecyclingDisabled,
    /// A recycled block overlaps a block already on the free list.
    DoubleRecycle {
        /// Region index of the rejected block.
        region: usize,
        /// Byte offset of the rejected block.
        offset: usize,
    },
    /// An allocation handle does not lie within this arena's regions.
    ForeignAllocation {
        /// Region index encoded in the handle.
        region: usize,
        /// Byte offset encoded in the handle.
        offset: usize,
        /// Length encoded in the handle.
        len: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackingAllocationFailure { requested } => {
                write!(f, "failed to allocate region backing storage: {requested} bytes")
            }
            Self::CapacityExceeded {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "region capacity exceeded: requested {requested} bytes, remaining {remaining} bytes"
                )
            }
            Self::RegionLimit { limit } => {
                write!(f, "arena region limit reached: {limit} regions")
            }
            Self::InvalidRecycle { size, min } => {
                write!(
                    f,
                    "block of {size} bytes is too small for the free list (minimum {min} bytes)"
                )
            }
            Self::RecyclingDisabled => write!(f, "arena was created without a free list"),
            Self::DoubleRecycle { region, offset } => {
                write!(
                    f,
                    "block at region {region} offset {offset} overlaps a free block"
                )
            }
            Self::ForeignAllocation {
                region,
                offset,
                len,
            } => {
                write!(
                    f,
                    "allocation (region {region}, offset {offset}, len {len}) does not belong to this arena"
                )
            }
        }
    }
}

impl Error for ArenaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_sizes() {
        let err = ArenaError::InvalidRecycle { size: 8, min: 24 };
        let msg = err.to_string();
        assert!(msg.contains("8 bytes"));
        assert!(msg.contains("24 bytes"));
    }

    #[test]
    fn errors_are_std_errors() {
        let err: Box<dyn Error> = Box::new(ArenaError::RecyclingDisabled);
        assert_eq!(err.to_string(), "arena was created without a free list");
    }
}
