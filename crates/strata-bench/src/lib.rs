//! Benchmark workloads and drivers for Strata arenas.
//!
//! Provides deterministic allocation-size profiles and the loops that
//! drive an [`Arena`] through them:
//!
//! - [`small_uniform`]: many identical small requests (bump fast path)
//! - [`mixed_sizes`]: seeded sizes between 8 bytes and 1KB
//! - [`growing`]: 1KB, 2KB, ... requests that force region growth
//! - [`run_bump`] / [`run_churn`]: allocate-only and allocate/recycle loops

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strata_arena::{Allocation, Arena, ArenaError};

/// A named sequence of allocation sizes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workload {
    /// Label used in benchmark IDs.
    pub name: &'static str,
    /// Request sizes in bytes, in issue order.
    pub sizes: Vec<usize>,
}

impl Workload {
    /// Sum of all request sizes.
    pub fn total_bytes(&self) -> usize {
        self.sizes.iter().sum()
    }
}

/// `count` requests of `size` bytes each.
pub fn small_uniform(count: usize, size: usize) -> Workload {
    Workload {
        name: "small_uniform",
        sizes: vec![size; count],
    }
}

/// `count` requests with sizes drawn from `8..1024`, reproducible per seed.
pub fn mixed_sizes(count: usize, seed: u64) -> Workload {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let sizes = (0..count)
        .map(|_| 8 + (rng.next_u32() % 1016) as usize)
        .collect();
    Workload {
        name: "mixed_sizes",
        sizes,
    }
}

/// Requests of 1KB, 2KB, ... up to `steps` KB.
pub fn growing(steps: usize) -> Workload {
    Workload {
        name: "growing",
        sizes: (1..=steps).map(|i| i * 1024).collect(),
    }
}

/// Allocate every request in `workload`, touching the first byte of each.
///
/// Returns the number of bytes requested.
pub fn run_bump(arena: &mut Arena, workload: &Workload) -> Result<usize, ArenaError> {
    for &size in &workload.sizes {
        let a = arena.allocate(size)?;
        if let Some(first) = arena.bytes_mut(a).first_mut() {
            *first = 1;
        }
    }
    Ok(workload.total_bytes())
}

/// Allocate the workload, recycle every other block, then allocate the
/// workload again so the second pass draws on the free list.
///
/// Returns how many second-pass requests were served from recycled blocks.
/// Recycle rejections (blocks below the free-list minimum) are skipped.
pub fn run_churn(arena: &mut Arena, workload: &Workload) -> Result<usize, ArenaError> {
    let first: Vec<Allocation> = workload
        .sizes
        .iter()
        .map(|&size| arena.allocate(size))
        .collect::<Result<_, _>>()?;

    for a in first.iter().step_by(2) {
        let _ = arena.recycle(*a);
    }

    let mut reused = 0;
    for &size in &workload.sizes {
        let a = arena.allocate(size)?;
        if first.contains(&a) || a.len() > size {
            reused += 1;
        }
    }
    Ok(reused)
}
