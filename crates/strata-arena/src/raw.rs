//! Low-level primitives for arena memory operations.
//!
//! Regions keep their storage as `usize` words so that every word-aligned
//! offset is word aligned in memory. These functions reinterpret that
//! storage as bytes. They are the only `unsafe` code in the crate; each
//! block carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::mem;
use std::slice;

/// View word storage as bytes.
pub(crate) fn as_bytes(words: &[usize]) -> &[u8] {
    // SAFETY: `u8` has alignment 1 and no invalid bit patterns. The pointer
    // and length cover exactly the memory owned by `words`, and the returned
    // slice borrows `words` for its whole lifetime.
    unsafe { slice::from_raw_parts(words.as_ptr().cast::<u8>(), mem::size_of_val(words)) }
}

/// View word storage as mutable bytes.
pub(crate) fn as_bytes_mut(words: &mut [usize]) -> &mut [u8] {
    let len = mem::size_of_val(words);
    // SAFETY: as in `as_bytes`. Any byte pattern written through the view is
    // a valid `usize`, and the exclusive borrow of `words` is held by the
    // returned slice.
    unsafe { slice::from_raw_parts_mut(words.as_mut_ptr().cast::<u8>(), len) }
}
