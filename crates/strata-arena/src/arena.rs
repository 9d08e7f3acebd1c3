//! The region arena.
//!
//! [`Arena`] owns a chain of [`Region`]s and an optional [`FreeList`].
//! Allocation tries, in order:
//!
//! 1. the current region (bump, O(1));
//! 2. the free list, if recycling is enabled and it holds blocks;
//! 3. later regions already in the chain (left over from a reset or pop);
//! 4. a new region appended to the chain.
//!
//! ```text
//! Arena
//! ├── regions: Vec<Region>   [r0][r1][r2] ...   append-only
//! │                               ^ current
//! ├── free_list: Option<FreeList>   (region, offset)-ordered, coalesced
//! └── config: ArenaConfig
//! ```

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::align::{align_up, WORD_SIZE};
use crate::config::{ArenaConfig, RecyclePolicy};
use crate::error::ArenaError;
use crate::free_list::{FreeBlock, FreeList, MIN_RECYCLE_BYTES};
use crate::handle::Allocation;
use crate::region::Region;
use crate::report::{ArenaReport, RegionStats};

/// Region-based bump allocator with optional block recycling.
///
/// Memory is released in bulk: through [`reset`](Arena::reset), through
/// [`pop`](Arena::pop) back to a [`ScratchMark`](crate::ScratchMark), or
/// when the arena is dropped. Individual blocks can only be handed back
/// when the arena was built with recycling enabled.
///
/// All mutation takes `&mut self`; the arena does no locking of its own.
pub struct Arena {
    /// Region chain. Never empty, never shrinks.
    pub(crate) regions: Vec<Region>,
    /// Index of the region currently being bumped.
    pub(crate) current: usize,
    /// Reclaimed blocks, present only when recycling is enabled.
    pub(crate) free_list: Option<FreeList>,
    config: ArenaConfig,
}

impl Arena {
    /// Create an arena whose first region holds `capacity` bytes.
    ///
    /// # Errors
    ///
    /// [`ArenaError::BackingAllocationFailure`] if the first region cannot
    /// be allocated.
    pub fn new(capacity: usize) -> Result<Self, ArenaError> {
        Self::from_config(ArenaConfig::new(capacity))
    }

    /// Create an arena with the free list enabled.
    ///
    /// # Errors
    ///
    /// As for [`Arena::new`].
    pub fn with_recycling(capacity: usize) -> Result<Self, ArenaError> {
        Self::from_config(ArenaConfig::new(capacity).with_recycling())
    }

    /// Create an arena from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Any error from [`ArenaConfig::validate`], or
    /// [`ArenaError::BackingAllocationFailure`] if the first region cannot
    /// be allocated.
    pub fn from_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let first = Region::new(config.region_capacity)?;
        debug!(
            capacity = first.capacity(),
            recycling = config.recycling,
            "arena created"
        );
        Ok(Self {
            regions: vec![first],
            current: 0,
            free_list: config.recycling.then(FreeList::new),
            config,
        })
    }

    /// Allocate `size` bytes, rounded up to the word size.
    ///
    /// The returned block starts on a word boundary. A zero-size request
    /// returns an empty allocation at the current bump position without
    /// advancing it or consulting the free list.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::RegionLimit`] if growth would exceed `max_regions`.
    /// - [`ArenaError::BackingAllocationFailure`] if a new region cannot be
    ///   allocated, or `size` cannot be rounded up.
    ///
    /// On error the arena is unchanged.
    pub fn allocate(&mut self, size: usize) -> Result<Allocation, ArenaError> {
        let aligned =
            align_up(size).ok_or(ArenaError::BackingAllocationFailure { requested: size })?;

        if aligned == 0 {
            let offset = self.regions[self.current].used();
            return Ok(Allocation::new(self.current, offset, 0));
        }

        if self.regions[self.current].remaining() >= aligned {
            return self.bump(self.current, size);
        }

        if let Some(block) = self.take_recycled(aligned) {
            trace!(
                region = block.region,
                offset = block.offset,
                size = block.size,
                requested = aligned,
                "reused free block"
            );
            return Ok(Allocation::new(block.region, block.offset, block.size));
        }

        let later = (self.current + 1..self.regions.len())
            .find(|&i| self.regions[i].remaining() >= aligned);
        if let Some(index) = later {
            self.current = index;
            return self.bump(index, size);
        }

        self.grow(aligned)?;
        self.bump(self.current, size)
    }

    fn bump(&mut self, index: usize, size: usize) -> Result<Allocation, ArenaError> {
        let offset = self.regions[index].alloc(size)?;
        Ok(Allocation::new(index, offset, size))
    }

    fn take_recycled(&mut self, aligned: usize) -> Option<FreeBlock> {
        let free_list = self.free_list.as_mut()?;
        match self.config.recycle_policy {
            RecyclePolicy::FirstFit => free_list.take_first_fit(aligned),
            RecyclePolicy::HeadOnly => free_list.take_head(aligned),
        }
    }

    /// Append a region large enough for `aligned` bytes and make it current.
    fn grow(&mut self, aligned: usize) -> Result<(), ArenaError> {
        if let Some(limit) = self.config.max_regions {
            if self.regions.len() >= limit {
                warn!(limit, requested = aligned, "arena region limit reached");
                return Err(ArenaError::RegionLimit { limit });
            }
        }

        let tail = self.regions.last().map_or(0, Region::capacity);
        let capacity = tail.max(aligned);
        let region = Region::new(capacity)?;
        self.regions
            .try_reserve(1)
            .map_err(|_| ArenaError::BackingAllocationFailure {
                requested: capacity,
            })?;
        self.regions.push(region);
        self.current = self.regions.len() - 1;
        debug!(
            region = self.current,
            capacity,
            requested = aligned,
            "arena grew"
        );
        Ok(())
    }

    /// Hand a block back for reuse by later allocations.
    ///
    /// The block is inserted into the address-ordered free list and merged
    /// with any free neighbours. Its size is the allocation's length rounded
    /// up to the word size.
    ///
    /// # Errors
    ///
    /// All errors leave the arena unchanged and are safe to ignore:
    ///
    /// - [`ArenaError::RecyclingDisabled`] if the arena has no free list.
    /// - [`ArenaError::InvalidRecycle`] if the block is smaller than
    ///   [`MIN_RECYCLE_BYTES`].
    /// - [`ArenaError::ForeignAllocation`] if the handle does not lie within
    ///   this arena's regions.
    /// - [`ArenaError::DoubleRecycle`] if the block overlaps a free block.
    pub fn recycle(&mut self, allocation: Allocation) -> Result<(), ArenaError> {
        let foreign = ArenaError::ForeignAllocation {
            region: allocation.region,
            offset: allocation.offset,
            len: allocation.len,
        };

        let Some(free_list) = self.free_list.as_mut() else {
            debug!(%allocation, "recycle ignored: arena has no free list");
            return Err(ArenaError::RecyclingDisabled);
        };

        let size = align_up(allocation.len).ok_or_else(|| foreign.clone())?;
        if size < MIN_RECYCLE_BYTES {
            warn!(
                %allocation,
                size,
                min = MIN_RECYCLE_BYTES,
                "block too small for the free list"
            );
            return Err(ArenaError::InvalidRecycle {
                size,
                min: MIN_RECYCLE_BYTES,
            });
        }

        let in_bounds = self
            .regions
            .get(allocation.region)
            .is_some_and(|r| r.contains(allocation.offset, size));
        if !in_bounds || allocation.offset % WORD_SIZE != 0 {
            warn!(%allocation, "recycle of a block outside this arena");
            return Err(foreign);
        }

        let block = FreeBlock {
            region: allocation.region,
            offset: allocation.offset,
            size,
        };
        if !free_list.insert(block) {
            warn!(%allocation, "block overlaps the free list");
            return Err(ArenaError::DoubleRecycle {
                region: block.region,
                offset: block.offset,
            });
        }
        trace!(%allocation, free_blocks = free_list.len(), "block recycled");
        Ok(())
    }

    /// Release every allocation at once.
    ///
    /// Every region's cursor returns to zero, the first region becomes
    /// current, and the free list is emptied. Regions keep their storage.
    /// Calling this twice in a row has the same effect as calling it once.
    pub fn reset(&mut self) {
        for region in &mut self.regions {
            region.reset();
        }
        self.current = 0;
        if let Some(free_list) = self.free_list.as_mut() {
            free_list.clear();
        }
        debug!(regions = self.regions.len(), "arena reset");
    }

    /// Summarise current usage. Has no effect on the arena.
    pub fn report(&self) -> ArenaReport {
        let regions: SmallVec<[RegionStats; 4]> = self
            .regions
            .iter()
            .map(|r| RegionStats {
                used: r.used(),
                capacity: r.capacity(),
            })
            .collect();
        let (free_blocks, free_bytes) = self
            .free_list
            .as_ref()
            .map_or((0, 0), |fl| (fl.len(), fl.total_bytes()));
        ArenaReport {
            bytes_used: regions.iter().map(|r| r.used).sum(),
            bytes_capacity: regions.iter().map(|r| r.capacity).sum(),
            region_count: regions.len(),
            free_blocks,
            free_bytes,
            regions,
        }
    }

    /// Raw address of the first byte of `allocation`.
    ///
    /// Always word aligned. For an empty allocation the address may be one
    /// past the end of its region and must not be read.
    ///
    /// # Panics
    ///
    /// Panics if the handle names a region this arena does not have.
    pub fn as_ptr(&self, allocation: Allocation) -> *const u8 {
        self.regions[allocation.region].ptr_at(allocation.offset)
    }

    /// Shared view of the bytes of `allocation`.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not lie within this arena's regions.
    pub fn bytes(&self, allocation: Allocation) -> &[u8] {
        self.regions[allocation.region].bytes(allocation.offset, allocation.len)
    }

    /// Mutable view of the bytes of `allocation`.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not lie within this arena's regions.
    pub fn bytes_mut(&mut self, allocation: Allocation) -> &mut [u8] {
        self.regions[allocation.region].bytes_mut(allocation.offset, allocation.len)
    }

    /// Number of regions in the chain.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Index of the region currently being bumped.
    pub fn current_region(&self) -> usize {
        self.current
    }

    /// The region at `index`, if any.
    pub fn region(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    /// Whether the arena was built with a free list.
    pub fn is_recycling(&self) -> bool {
        self.free_list.is_some()
    }

    /// Blocks currently on the free list, in address order.
    pub fn free_blocks(&self) -> impl Iterator<Item = &FreeBlock> + '_ {
        self.free_list.iter().flat_map(|fl| fl.iter())
    }

    /// The configuration the arena was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        trace!(regions = self.regions.len(), "arena destroyed");
    }
}
