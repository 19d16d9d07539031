//! Internal utility functions and helpers.
//!
//! This module contains small helper functions used throughout the crate.
//! It is an implementation detail and not part of the public API.

/// Returns the length of the longest suffix of `a` that is also a prefix
/// of `b`, or 0 if there is none.
///
/// The engine uses this on the unmatched tail of a chunk to decide how many
/// bytes might still begin a match once the next chunk arrives. It must be
/// the longest width: withholding a shorter one would release bytes that
/// belong to a match split across the boundary.
pub(crate) fn overlap_width(a: &[u8], b: &[u8]) -> usize {
    let max = a.len().min(b.len());
    let tail = &a[a.len() - max..];

    (1..=max)
        .rev()
        .find(|&w| tail[max - w..] == b[..w])
        .unwrap_or(0)
}
