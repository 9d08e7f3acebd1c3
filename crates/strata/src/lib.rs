//! Strata: region-based memory arenas.
//!
//! This is the top-level facade crate that re-exports the public API of
//! the Strata sub-crates. For most users, adding `strata` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! let mut arena = Arena::new(1024).unwrap();
//!
//! let a = arena.allocate(8).unwrap();
//! let b = arena.allocate(8).unwrap();
//! assert_eq!(arena.as_ptr(b) as usize, arena.as_ptr(a) as usize + 8);
//!
//! arena.bytes_mut(a).copy_from_slice(&42u64.to_ne_bytes()[..8]);
//!
//! // A request larger than the first region appends a new one.
//! let big = arena.allocate(2048).unwrap();
//! assert_eq!(big.region(), 1);
//! assert_eq!(arena.report().region_count, 2);
//!
//! // Roll back everything allocated after a checkpoint.
//! let mark = arena.mark();
//! arena.allocate(512).unwrap();
//! arena.pop(mark);
//!
//! // Release everything at once.
//! arena.reset();
//! assert_eq!(arena.report().bytes_used, 0);
//! ```
//!
//! # Recycling
//!
//! ```rust
//! use strata::prelude::*;
//!
//! let mut arena = Arena::with_recycling(128).unwrap();
//! let a = arena.allocate(64).unwrap();
//! let b = arena.allocate(64).unwrap();
//! arena.recycle(a).unwrap();
//! arena.recycle(b).unwrap();
//!
//! // Neighbouring blocks merged into one 128-byte block.
//! assert_eq!(arena.report().free_blocks, 1);
//! let c = arena.allocate(100).unwrap();
//! assert_eq!(c.offset(), a.offset());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `strata-arena` | `Arena`, regions, free list, scratch marks, reports |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Arena allocator, regions, free list and scratch marks (`strata-arena`).
///
/// Most users only need [`arena::Arena`] and the types in the
/// [`prelude`].
pub use strata_arena as arena;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    pub use strata_arena::{
        Allocation, Arena, ArenaConfig, ArenaError, ArenaReport, RecyclePolicy, ScratchMark,
    };
}
