//! Read-only usage reports.

use std::fmt;

use smallvec::SmallVec;

/// Usage of one region at the time of the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionStats {
    /// Bytes handed out from the region.
    pub used: usize,
    /// Capacity of the region in bytes.
    pub capacity: usize,
}

/// Snapshot of an arena's memory usage, produced by
/// [`Arena::report`](crate::Arena::report).
///
/// `bytes_used` counts bump-allocated bytes, including blocks currently
/// parked on the free list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaReport {
    /// Bytes handed out across all regions.
    pub bytes_used: usize,
    /// Capacity across all regions.
    pub bytes_capacity: usize,
    /// Number of regions in the chain.
    pub region_count: usize,
    /// Number of blocks on the free list.
    pub free_blocks: usize,
    /// Bytes held by the free list.
    pub free_bytes: usize,
    /// Per-region breakdown, in chain order.
    pub regions: SmallVec<[RegionStats; 4]>,
}

impl fmt::Display for ArenaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Used: {} bytes", self.bytes_used)?;
        writeln!(f, "Total Capacity: {} bytes", self.bytes_capacity)?;
        writeln!(f, "Num Regions: {}", self.region_count)?;
        if self.free_blocks > 0 {
            writeln!(
                f,
                "Free List: {} blocks, {} bytes",
                self.free_blocks, self.free_bytes
            )?;
        }
        for (i, region) in self.regions.iter().enumerate() {
            writeln!(
                f,
                "  region {i}: {}/{} bytes",
                region.used, region.capacity
            )?;
        }
        Ok(())
    }
}
