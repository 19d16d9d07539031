//! Append-only record of replacements.

use std::ops::{ControlFlow, Index};
use std::slice;

use super::LedgerEntry;

/// An append-only list of every replacement performed on one stream.
///
/// Entries are stored in the order the engine made them, which is also
/// increasing source position. They can be read back but never edited or
/// removed.
///
/// A ledger is attached to at most one [`Replacer`](crate::Replacer). An
/// engine without a ledger records nothing.
///
/// # Example
///
/// ```
/// use replacers::{Ledger, Replacer, Transformer};
///
/// let mut replacer = Replacer::with_ledger(&b"abc"[..], &b"ABC"[..], Ledger::new());
/// let mut out = [0u8; 16];
/// let progress = replacer.transform(&mut out, b"abcdefgabcd", true);
///
/// assert_eq!(&out[..progress.written], b"ABCdefgABCd");
///
/// let ledger = replacer.ledger().unwrap();
/// assert_eq!(ledger.len(), 2);
/// assert_eq!(ledger.at(1), (7, 10, 7, 10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one replacement.
    pub fn append(&mut self, source_start: u64, source_end: u64, dest_start: u64, dest_end: u64) {
        debug_assert!(source_start <= source_end);
        debug_assert!(dest_start <= dest_end);
        debug_assert!(
            self.entries
                .last()
                .is_none_or(|last| last.source_end <= source_start),
            "ledger entries must be appended in stream order"
        );

        self.entries.push(LedgerEntry::new(
            source_start,
            source_end,
            dest_start,
            dest_end,
        ));
    }

    /// Visits entries in recorded order until the visitor breaks.
    ///
    /// Returns the break value, if any.
    ///
    /// ```
    /// use std::ops::ControlFlow;
    /// use replacers::Ledger;
    ///
    /// let mut ledger = Ledger::new();
    /// ledger.append(0, 3, 0, 3);
    /// ledger.append(7, 10, 7, 10);
    ///
    /// let first_past_five = ledger.iterate(|e| {
    ///     if e.source_start > 5 { ControlFlow::Break(e.source_start) } else { ControlFlow::Continue(()) }
    /// });
    /// assert_eq!(first_past_five, Some(7));
    /// ```
    pub fn iterate<B, F>(&self, mut visitor: F) -> Option<B>
    where
        F: FnMut(&LedgerEntry) -> ControlFlow<B>,
    {
        match self.entries.iter().try_for_each(|entry| visitor(entry)) {
            ControlFlow::Break(b) => Some(b),
            ControlFlow::Continue(()) => None,
        }
    }

    /// Returns the four positions of entry `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn at(&self, index: usize) -> (u64, u64, u64, u64) {
        self.entries[index].into_parts()
    }

    /// Returns entry `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<&LedgerEntry> {
        self.entries.get(index)
    }

    /// Returns an iterator over the entries in recorded order.
    pub fn iter(&self) -> slice::Iter<'_, LedgerEntry> {
        self.entries.iter()
    }

    /// Returns the entries as a slice.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Returns the number of recorded replacements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was replaced.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<usize> for Ledger {
    type Output = LedgerEntry;

    fn index(&self, index: usize) -> &LedgerEntry {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a LedgerEntry;
    type IntoIter = slice::Iter<'a, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Recording sink used by the engine.
///
/// Implemented for `Option<Ledger>` so an engine without a ledger records
/// into `None` and the call is a no-op.
pub(crate) trait Record {
    fn record(&mut self, source_start: u64, source_end: u64, dest_start: u64, dest_end: u64);
}

impl Record for Option<Ledger> {
    #[inline]
    fn record(&mut self, source_start: u64, source_end: u64, dest_start: u64, dest_end: u64) {
        if let Some(ledger) = self {
            ledger.append(source_start, source_end, dest_start, dest_end);
        }
    }
}
