//! Arena configuration parameters.

use crate::align::align_up;
use crate::error::ArenaError;

/// How the free list is searched when a request misses the current region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecyclePolicy {
    /// Scan the whole free list and take the first block that is large
    /// enough.
    #[default]
    FirstFit,
    /// Only look at the lowest-addressed free block. Cheaper per call, but
    /// a small block at the head hides every larger block behind it.
    HeadOnly,
}

/// Configuration for the arena allocator.
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Capacity of the first region in bytes, rounded up to the word size.
    ///
    /// Later regions reuse the capacity of the last region unless a single
    /// request is larger.
    pub region_capacity: usize,

    /// Whether freed blocks can be handed back through `recycle`.
    pub recycling: bool,

    /// Free-list search policy. Ignored when `recycling` is off.
    pub recycle_policy: RecyclePolicy,

    /// Upper bound on the number of regions, or `None` for unbounded growth.
    pub max_regions: Option<usize>,
}

impl ArenaConfig {
    /// Default first-region capacity: 64KB.
    pub const DEFAULT_REGION_CAPACITY: usize = 64 * 1024;

    /// Create a config for an arena whose first region holds `region_capacity`
    /// bytes. Recycling is off and growth is unbounded.
    pub fn new(region_capacity: usize) -> Self {
        Self {
            region_capacity,
            recycling: false,
            recycle_policy: RecyclePolicy::FirstFit,
            max_regions: None,
        }
    }

    /// Enable the free list.
    pub fn with_recycling(mut self) -> Self {
        self.recycling = true;
        self
    }

    /// Select the free-list search policy.
    pub fn with_policy(mut self, policy: RecyclePolicy) -> Self {
        self.recycle_policy = policy;
        self
    }

    /// Cap the number of regions the arena may hold.
    pub fn with_max_regions(mut self, limit: usize) -> Self {
        self.max_regions = Some(limit);
        self
    }

    /// Check the configuration before any storage is acquired.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::RegionLimit`] if `max_regions` is `Some(0)`; the arena
    ///   always holds at least one region.
    /// - [`ArenaError::BackingAllocationFailure`] if `region_capacity` cannot
    ///   be rounded up to the word size.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.max_regions == Some(0) {
            return Err(ArenaError::RegionLimit { limit: 0 });
        }
        if align_up(self.region_capacity).is_none() {
            return Err(ArenaError::BackingAllocationFailure {
                requested: self.region_capacity,
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REGION_CAPACITY)
    }
}
