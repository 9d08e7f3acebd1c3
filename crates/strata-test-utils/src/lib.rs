//! Test utilities for Strata development.
//!
//! Provides byte-pattern fixtures for checking that arena memory is
//! writable and not clobbered ([`fixtures`]), span helpers for asserting
//! that live allocations do not overlap, and an opt-in tracing subscriber
//! for tests that want to see the arena's log output.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{fill_pattern, verify_pattern, PatternMismatch};

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber that writes through the test harness.
///
/// Filtering follows `RUST_LOG`. Safe to call from every test: only the
/// first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A half-open byte range `[start, end)` in the address space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Span of `len` bytes starting at address `start`.
    pub fn new(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Return the first pair of overlapping non-empty spans, if any.
pub fn find_overlap(spans: &[Span]) -> Option<(Span, Span)> {
    let mut sorted: Vec<Span> = spans.iter().copied().filter(|s| !s.is_empty()).collect();
    sorted.sort_unstable();
    sorted
        .windows(2)
        .find(|pair| pair[0].overlaps(&pair[1]))
        .map(|pair| (pair[0], pair[1]))
}

/// Panic with both spans if any two non-empty spans overlap.
pub fn assert_disjoint(spans: &[Span]) {
    if let Some((a, b)) = find_overlap(spans) {
        panic!("spans overlap: {a:?} and {b:?}");
    }
}
