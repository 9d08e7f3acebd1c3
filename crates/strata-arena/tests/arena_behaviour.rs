//! Integration tests: end-to-end arena behaviour through the public API.
//!
//! Covers the documented allocation scenarios (growth, scratch
//! round-trips, recycling with coalescing, bulk reset) and checks that
//! memory handed out stays intact while other blocks are written.

use strata_arena::{Allocation, Arena, ArenaConfig, ArenaError, RecyclePolicy, WORD_SIZE};
use strata_test_utils::{assert_disjoint, fill_pattern, init_tracing, verify_pattern, Span};

fn span(arena: &Arena, a: Allocation) -> Span {
    Span::new(arena.as_ptr(a) as usize, a.len())
}

fn addr(arena: &Arena, a: Allocation) -> usize {
    arena.as_ptr(a) as usize
}

// ── Growth ──────────────────────────────────────────────────────────

#[test]
fn small_allocations_then_growth() {
    init_tracing();
    let mut arena = Arena::new(1024).unwrap();

    let a = arena.allocate(8).unwrap();
    let b = arena.allocate(8).unwrap();
    assert_eq!(addr(&arena, b), addr(&arena, a) + 8);
    assert_eq!(addr(&arena, a) % WORD_SIZE, 0);
    assert_eq!(addr(&arena, b) % WORD_SIZE, 0);

    fill_pattern(arena.bytes_mut(a), 0xA);
    fill_pattern(arena.bytes_mut(b), 0xB);

    let big = arena.allocate(2048).unwrap();
    assert_eq!(arena.region_count(), 2);
    assert!(arena.region(big.region()).unwrap().capacity() >= 2048);
    fill_pattern(arena.bytes_mut(big), 0xC);

    // Earlier blocks are untouched by growth.
    assert_eq!(verify_pattern(arena.bytes(a), 0xA), Ok(()));
    assert_eq!(verify_pattern(arena.bytes(b), 0xB), Ok(()));
    assert_ne!(addr(&arena, a), addr(&arena, b));
    assert_disjoint(&[span(&arena, a), span(&arena, b), span(&arena, big)]);
}

#[test]
fn overflowing_sequence_spills_into_new_regions() {
    let mut arena = Arena::new(4 * 1024).unwrap();
    let first = arena.allocate(2 * 1024).unwrap();
    let second = arena.allocate(3 * 1024).unwrap();
    let third = arena.allocate(4 * 1024).unwrap();

    assert_eq!(first.region(), 0);
    assert_eq!(second.region(), 1);
    assert_eq!(third.region(), 2);
    assert_eq!(arena.region(1).unwrap().capacity(), 4 * 1024);
    assert_eq!(arena.region(2).unwrap().capacity(), 4 * 1024);
}

#[test]
fn growing_request_sizes_stay_intact() {
    let mut arena = Arena::new(16 * 1024).unwrap();
    let mut live = Vec::new();
    for i in 1..=20usize {
        let a = arena.allocate(i * 1024).unwrap();
        fill_pattern(arena.bytes_mut(a), i as u8);
        live.push(a);
    }
    for (i, &a) in live.iter().enumerate() {
        assert_eq!(verify_pattern(arena.bytes(a), (i + 1) as u8), Ok(()));
    }
    let spans: Vec<Span> = live.iter().map(|&a| span(&arena, a)).collect();
    assert_disjoint(&spans);
}

#[test]
fn region_limit_surfaces_as_error_not_panic() {
    let mut arena = Arena::from_config(ArenaConfig::new(256).with_max_regions(1)).unwrap();
    arena.allocate(256).unwrap();
    let err = arena.allocate(1).unwrap_err();
    assert_eq!(err, ArenaError::RegionLimit { limit: 1 });
    // The arena keeps working after the failure.
    arena.reset();
    assert!(arena.allocate(128).is_ok());
}

// ── Scratch marks ───────────────────────────────────────────────────

#[test]
fn scratch_round_trip_returns_same_address() {
    let mut arena = Arena::new(1024).unwrap();
    let keep = arena.allocate(1024 / 2).unwrap();
    fill_pattern(arena.bytes_mut(keep), 9);

    let mark = arena.mark();
    let region_before = arena.current_region();
    let used_before = arena.region(region_before).unwrap().used();

    let a = arena.allocate(4096).unwrap();
    let _b = arena.allocate(8192).unwrap();
    arena.pop(mark);

    assert_eq!(arena.current_region(), region_before);
    assert_eq!(arena.region(region_before).unwrap().used(), used_before);
    let again = arena.allocate(4096).unwrap();
    assert_eq!(addr(&arena, again), addr(&arena, a));
    assert_eq!(verify_pattern(arena.bytes(keep), 9), Ok(()));
}

#[test]
fn pop_then_allocate_reuses_regions_without_growth() {
    let mut arena = Arena::new(1024).unwrap();
    let mark = arena.mark();
    for _ in 0..8 {
        arena.allocate(1000).unwrap();
    }
    let regions = arena.region_count();
    arena.pop(mark);
    for _ in 0..8 {
        arena.allocate(1000).unwrap();
    }
    assert_eq!(arena.region_count(), regions);
}

// ── Recycling ───────────────────────────────────────────────────────

#[test]
fn adjacent_blocks_coalesce_in_either_order() {
    for reversed in [false, true] {
        let mut arena = Arena::with_recycling(256).unwrap();
        let a = arena.allocate(32).unwrap();
        let b = arena.allocate(32).unwrap();
        arena.allocate(192).unwrap();

        if reversed {
            arena.recycle(b).unwrap();
            arena.recycle(a).unwrap();
        } else {
            arena.recycle(a).unwrap();
            arena.recycle(b).unwrap();
        }

        let blocks: Vec<_> = arena.free_blocks().copied().collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].offset, a.offset());
        assert_eq!(blocks[0].size, 64);

        // Current region is full, so a request up to 64 bytes takes the
        // merged block.
        let c = arena.allocate(56).unwrap();
        assert_eq!(addr(&arena, c), addr(&arena, a));
        assert_eq!(c.len(), 64);
        assert_eq!(arena.free_blocks().count(), 0);
    }
}

#[test]
fn recycled_blocks_are_reused_across_interleaved_frees() {
    let mut arena = Arena::with_recycling(10 * 1024).unwrap();
    let blocks: Vec<Allocation> = (0..10).map(|_| arena.allocate(1024).unwrap()).collect();
    for (i, &a) in blocks.iter().enumerate() {
        fill_pattern(arena.bytes_mut(a), i as u8);
    }

    for &i in &[3, 5, 7] {
        arena.recycle(blocks[i]).unwrap();
    }
    assert_eq!(arena.free_blocks().count(), 3);

    let reused: Vec<Allocation> = (0..3).map(|_| arena.allocate(1024).unwrap()).collect();
    for a in &reused {
        assert!([3, 5, 7].iter().any(|&i| blocks[i] == *a));
    }
    assert_eq!(arena.region_count(), 1);

    // Live blocks that were never recycled kept their contents.
    for i in [0, 1, 2, 4, 6, 8, 9] {
        assert_eq!(verify_pattern(arena.bytes(blocks[i]), i as u8), Ok(()));
    }
}

#[test]
fn mixed_sizes_recycle_and_reallocate() {
    let sizes = [64usize, 128, 256, 512, 1024, 2048, 4096, 8192];
    let mut arena = Arena::with_recycling(16 * 1024).unwrap();
    let blocks: Vec<Allocation> = sizes.iter().map(|&s| arena.allocate(s).unwrap()).collect();

    for i in (0..sizes.len()).step_by(2) {
        arena.recycle(blocks[i]).unwrap();
    }
    let free_before = arena.report().free_bytes;
    assert_eq!(free_before, 64 + 256 + 1024 + 4096);

    // Fill the current region so the free list is consulted.
    let remaining = arena.region(arena.current_region()).unwrap().remaining();
    if remaining > 0 {
        arena.allocate(remaining).unwrap();
    }
    for &size in &[1000usize, 200, 50] {
        let a = arena.allocate(size).unwrap();
        assert!(a.len() >= size);
        assert_eq!(arena.region_count(), 1);
    }
    assert_eq!(arena.free_blocks().count(), 1);
}

#[test]
fn too_small_recycle_is_a_no_op() {
    let mut arena = Arena::with_recycling(128).unwrap();
    let tiny = arena.allocate(4).unwrap();
    let before = arena.report();
    assert!(matches!(
        arena.recycle(tiny),
        Err(ArenaError::InvalidRecycle { .. })
    ));
    assert_eq!(arena.report(), before);
}

#[test]
fn head_only_policy_is_opt_in() {
    let arena = Arena::with_recycling(64).unwrap();
    assert_eq!(arena.config().recycle_policy, RecyclePolicy::FirstFit);
}

// ── Reset ───────────────────────────────────────────────────────────

#[test]
fn reset_twice_matches_reset_once() {
    let mut arena = Arena::with_recycling(512).unwrap();
    let a = arena.allocate(128).unwrap();
    arena.allocate(1024).unwrap();
    arena.recycle(a).unwrap();

    arena.reset();
    let once = arena.report();
    arena.reset();
    assert_eq!(arena.report(), once);
    assert!(once.regions.iter().all(|r| r.used == 0));
    assert_eq!(once.free_blocks, 0);
    assert_eq!(arena.current_region(), 0);
}

#[test]
fn reset_returns_first_address() {
    let mut arena = Arena::new(128).unwrap();
    let first = arena.allocate(128).unwrap();
    for _ in 0..10 {
        arena.allocate(64).unwrap();
    }
    arena.reset();
    let again = arena.allocate(16).unwrap();
    assert_eq!(addr(&arena, again), addr(&arena, first));
}

#[test]
fn report_display_mentions_totals() {
    let mut arena = Arena::new(1024).unwrap();
    arena.allocate(100).unwrap();
    let text = arena.report().to_string();
    assert!(text.contains("Total Capacity: 1024 bytes"));
    assert!(text.contains("Num Regions: 1"));
}
