//! Machine-word alignment helpers.

/// Size in bytes of a machine word. Every allocation is rounded up to a
/// multiple of this and starts on a word boundary.
pub const WORD_SIZE: usize = std::mem::size_of::<usize>();

/// Round `size` up to the next multiple of [`WORD_SIZE`].
///
/// Returns `None` if the rounded value does not fit in a `usize`.
#[inline]
pub const fn align_up(size: usize) -> Option<usize> {
    match size.checked_add(WORD_SIZE - 1) {
        Some(padded) => Some(padded & !(WORD_SIZE - 1)),
        None => None,
    }
}

/// Number of words needed to hold `size` bytes.
#[inline]
pub(crate) const fn words_for(size: usize) -> Option<usize> {
    match align_up(size) {
        Some(aligned) => Some(aligned / WORD_SIZE),
        None => None,
    }
}
