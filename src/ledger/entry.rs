//! The LedgerEntry type - one recorded replacement.

use std::fmt;
use std::ops::Range;

/// Absolute stream positions of a single replacement.
///
/// `source_start..source_end` is where the pattern sat in the input stream;
/// `dest_start..dest_end` is where the replacement landed in the output
/// stream. Positions count from the start of the stream, not of any chunk.
///
/// # Example
///
/// ```
/// use replacers::LedgerEntry;
///
/// let entry = LedgerEntry::new(7, 10, 7, 10);
///
/// assert_eq!(entry.source_range(), 7..10);
/// assert_eq!(entry.dest_len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LedgerEntry {
    /// First input byte of the matched pattern.
    pub source_start: u64,

    /// One past the last input byte of the matched pattern.
    pub source_end: u64,

    /// First output byte of the replacement.
    pub dest_start: u64,

    /// One past the last output byte of the replacement.
    pub dest_end: u64,
}

impl LedgerEntry {
    /// Creates a new entry.
    pub const fn new(source_start: u64, source_end: u64, dest_start: u64, dest_end: u64) -> Self {
        Self {
            source_start,
            source_end,
            dest_start,
            dest_end,
        }
    }

    /// Returns the matched span in the input stream.
    pub fn source_range(&self) -> Range<u64> {
        self.source_start..self.source_end
    }

    /// Returns the replacement span in the output stream.
    pub fn dest_range(&self) -> Range<u64> {
        self.dest_start..self.dest_end
    }

    /// Returns the length of the matched pattern.
    pub fn source_len(&self) -> u64 {
        self.source_end - self.source_start
    }

    /// Returns the length of the replacement (0 for deletions).
    pub fn dest_len(&self) -> u64 {
        self.dest_end - self.dest_start
    }

    /// Returns the four positions as a tuple.
    pub fn into_parts(self) -> (u64, u64, u64, u64) {
        (
            self.source_start,
            self.source_end,
            self.dest_start,
            self.dest_end,
        )
    }
}

impl From<(u64, u64, u64, u64)> for LedgerEntry {
    fn from((source_start, source_end, dest_start, dest_end): (u64, u64, u64, u64)) -> Self {
        Self::new(source_start, source_end, dest_start, dest_end)
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "src[{}..{}] -> dst[{}..{}]",
            self.source_start, self.source_end, self.dest_start, self.dest_end
        )
    }
}
