//! Scratch checkpoints for bounded-lifetime rollback.
//!
//! A [`ScratchMark`] records where the arena's bump pointer stood. Popping
//! it discards everything allocated since, in time proportional to the
//! number of regions touched, and leaves the free list alone.
//!
//! ```ignore
//! let mark = arena.mark();
//! let tmp = arena.allocate(4096)?;
//! // ... use tmp for intermediate work ...
//! arena.pop(mark);
//! ```

use tracing::{trace, warn};

use crate::arena::Arena;

/// Saved position of an arena's bump pointer.
///
/// Marks are plain `(region index, used offset)` pairs, so they remain
/// meaningful while the region chain grows. Popping a mark taken from a
/// different arena is a caller error: it never causes memory unsafety,
/// but the rollback it performs is meaningless.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct ScratchMark {
    /// Region that was current when the mark was taken.
    pub(crate) region: usize,
    /// That region's `used` offset at the time.
    pub(crate) saved_used: usize,
}

impl ScratchMark {
    /// Region index captured by the mark.
    pub fn region(&self) -> usize {
        self.region
    }

    /// Bump offset captured by the mark.
    pub fn saved_used(&self) -> usize {
        self.saved_used
    }
}

impl Arena {
    /// Take a checkpoint of the current allocation position.
    ///
    /// The arena always holds at least one region, so a mark can be taken
    /// before the first allocation; popping it is then a rollback to empty.
    pub fn mark(&self) -> ScratchMark {
        ScratchMark {
            region: self.current,
            saved_used: self.regions[self.current].used(),
        }
    }

    /// Roll back every allocation made since `mark` was taken.
    ///
    /// The marked region's cursor is restored, every later region is
    /// emptied, and the marked region becomes current. The free list is not
    /// touched: blocks recycled after the mark stay listed, so callers
    /// mixing recycling with scratch marks must not recycle post-mark
    /// blocks they intend to pop.
    ///
    /// A mark that does not fit this arena's chain falls back to
    /// [`reset`](Arena::reset).
    pub fn pop(&mut self, mark: ScratchMark) {
        let fits = self
            .regions
            .get(mark.region)
            .is_some_and(|r| mark.saved_used <= r.capacity());
        if !fits {
            warn!(
                region = mark.region,
                saved_used = mark.saved_used,
                regions = self.regions.len(),
                "scratch mark does not match this arena; resetting"
            );
            self.reset();
            return;
        }

        self.regions[mark.region].rewind(mark.saved_used);
        for region in &mut self.regions[mark.region + 1..] {
            region.reset();
        }
        self.current = mark.region;
        trace!(
            region = mark.region,
            saved_used = mark.saved_used,
            "scratch mark popped"
        );
    }

    /// Run `f` with a scratch checkpoint, rolling back afterwards.
    ///
    /// Everything `f` allocates is discarded when it returns. Results that
    /// must outlive the scope have to be copied out of the arena by `f`.
    pub fn scratch<R>(&mut self, f: impl FnOnce(&mut Arena) -> R) -> R {
        let mark = self.mark();
        let result = f(self);
        self.pop(mark);
        result
    }
}
