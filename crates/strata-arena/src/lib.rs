//! Region-based memory arena for Strata.
//!
//! Hands out word-aligned blocks from a chain of fixed-capacity regions
//! with no per-allocation bookkeeping. Memory is released in bulk by
//! resetting the arena or popping a scratch mark; an optional free list
//! recycles individual blocks. This crate contains the workspace's only
//! `unsafe` code, confined to `raw.rs`.
//!
//! # Architecture
//!
//! ```text
//! Arena (orchestrator)
//! ├── Region × N (fixed-capacity word buffers, bump-allocated)
//! ├── FreeList (optional; address-ordered, coalescing)
//! ├── ScratchMark (region index + saved offset, for rollback)
//! └── ArenaConfig (first-region size, recycling, policy, region limit)
//! ```
//!
//! # Allocation order
//!
//! 1. **Fast path:** bump the current region.
//! 2. **Recycle:** first-fit search of the free list, if enabled.
//! 3. **Chain walk:** later regions left empty by a reset or pop.
//! 4. **Growth:** append a region of `max(last capacity, request)` bytes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod align;
pub mod arena;
pub mod config;
pub mod error;
pub mod free_list;
pub mod handle;
mod raw;
pub mod region;
pub mod report;
pub mod scratch;

// Public re-exports for the primary API surface.
pub use align::{align_up, WORD_SIZE};
pub use arena::Arena;
pub use config::{ArenaConfig, RecyclePolicy};
pub use error::ArenaError;
pub use free_list::{FreeBlock, MIN_RECYCLE_BYTES};
pub use handle::Allocation;
pub use report::{ArenaReport, RegionStats};
pub use scratch::ScratchMark;
