//! Core replace engine - Replacer with chunked transform API.
//!
//! This module implements the streaming search-and-replace state machine.
//! It provides a pure streaming interface:
//!
//! - [`Replacer`] - Stateful engine that rewrites one pattern in a byte stream
//! - `transform()` - Feed data in any size (1 byte, 8KB, 1MB, etc.)
//! - `transform(.., at_eof = true)` - Flush withheld bytes when the stream ends
//!
//! # Example
//!
//! ```
//! use replacers::{Replacer, Transformer};
//!
//! let mut replacer = Replacer::new(&b"abc"[..], &b"ABC"[..]);
//! let mut out = [0u8; 8];
//!
//! // "ab" might be the start of "abc": it is held back
//! let first = replacer.transform(&mut out, b"ab", false);
//! assert_eq!(first.written, 0);
//! assert!(first.is_short_src());
//!
//! // The next chunk completes the match
//! let second = replacer.transform(&mut out, b"cd", true);
//! assert_eq!(&out[..second.written], b"ABCd");
//! ```

use bytes::{Buf, Bytes};
use memchr::memmem::Finder;

use crate::ledger::{Ledger, Record};
use crate::transform::{Progress, Transformer};
use crate::util::overlap_width;

/// A streaming replacer for one `pattern -> replacement` rule.
///
/// `Replacer` rewrites every left-to-right, non-overlapping occurrence of
/// `pattern` in a byte stream that arrives in arbitrary pieces. It keeps two
/// small carries across calls:
///
/// - input bytes at the end of a chunk that could be the start of a match
///   (at most `pattern.len() - 1` bytes)
/// - the tail of a replacement that did not fit in the destination buffer
///   (at most `replacement.len()` bytes)
///
/// # Determinism
///
/// Identical byte streams produce identical output and identical ledgers,
/// regardless of:
/// - How the input is split into chunks (1 byte vs 1MB)
/// - How large the destination buffers are
/// - Number of `transform()` calls
///
/// Replacement text is never rescanned, so a replacement that contains the
/// pattern does not trigger another match.
///
/// # Edge Cases
///
/// - Empty pattern: input is copied through unchanged, nothing is recorded
/// - Empty replacement: matches are deleted; the ledger still records a
///   zero-length destination span at the right position
/// - A final chunk shorter than the pattern is emitted as literal bytes
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use replacers::{Ledger, Replacer, Transformer};
///
/// let mut replacer = Replacer::with_ledger(&b"123"[..], Bytes::new(), Ledger::new());
/// let mut out = [0u8; 16];
///
/// let progress = replacer.transform(&mut out, b"0123456789", false);
/// assert_eq!(&out[..progress.written], b"0456789");
/// assert_eq!(replacer.ledger().unwrap().at(0), (1, 4, 1, 1));
/// ```
#[derive(Debug, Clone)]
pub struct Replacer {
    pattern: Bytes,
    replacement: Bytes,
    finder: Finder<'static>,
    pending_output: Bytes,
    pending_input: Vec<u8>,
    window: Vec<u8>,
    source_offset: u64,
    dest_offset: u64,
    ledger: Option<Ledger>,
}

/// How a scan over one input slice ended.
enum Scan {
    /// Every byte up to the end (or the limit) was emitted.
    Drained,
    /// The last `n` bytes might start a match and were not emitted.
    Withheld(usize),
    /// The destination buffer filled up.
    DstFull,
}

/// Destination buffer with a write cursor.
struct Output<'a> {
    buf: &'a mut [u8],
    written: usize,
}

impl Output<'_> {
    /// Copies as much of `data` as fits and returns how much that was.
    fn write(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.buf.len() - self.written);
        self.buf[self.written..self.written + n].copy_from_slice(&data[..n]);
        self.written += n;
        n
    }
}

impl Replacer {
    /// Creates a replacer without a ledger.
    ///
    /// Either argument may be empty. An empty pattern never matches; an
    /// empty replacement deletes every match.
    ///
    /// # Example
    ///
    /// ```
    /// use replacers::Replacer;
    ///
    /// let replacer = Replacer::new(&b"Hello"[..], &b"Hi"[..]);
    /// assert_eq!(replacer.pattern().as_ref(), b"Hello");
    /// ```
    pub fn new(pattern: impl Into<Bytes>, replacement: impl Into<Bytes>) -> Self {
        Self::build(pattern.into(), replacement.into(), None)
    }

    /// Creates a replacer that records every replacement into `ledger`.
    pub fn with_ledger(
        pattern: impl Into<Bytes>,
        replacement: impl Into<Bytes>,
        ledger: Ledger,
    ) -> Self {
        Self::build(pattern.into(), replacement.into(), Some(ledger))
    }

    /// Creates a replacer for a text pattern.
    ///
    /// ```
    /// use replacers::{transform_bytes, Replacer};
    ///
    /// let mut replacer = Replacer::from_text("World", "Rust");
    /// assert_eq!(transform_bytes(&mut replacer, b"Hello, World"), &b"Hello, Rust"[..]);
    /// ```
    pub fn from_text(pattern: &str, replacement: &str) -> Self {
        Self::new(
            Bytes::copy_from_slice(pattern.as_bytes()),
            Bytes::copy_from_slice(replacement.as_bytes()),
        )
    }

    /// Creates a replacer for a single code point, matched by its UTF-8 encoding.
    pub fn from_char(pattern: char, replacement: char) -> Self {
        Self::new(encode_char(pattern), encode_char(replacement))
    }

    fn build(pattern: Bytes, replacement: Bytes, ledger: Option<Ledger>) -> Self {
        let carry = pattern.len().saturating_sub(1);
        Self {
            finder: Finder::new(&pattern).into_owned(),
            pending_output: Bytes::new(),
            pending_input: Vec::with_capacity(carry),
            window: Vec::with_capacity(carry * 2),
            source_offset: 0,
            dest_offset: 0,
            pattern,
            replacement,
            ledger,
        }
    }

    /// Returns the pattern being searched for.
    pub fn pattern(&self) -> &Bytes {
        &self.pattern
    }

    /// Returns the bytes substituted for each match.
    pub fn replacement(&self) -> &Bytes {
        &self.replacement
    }

    /// Returns the number of input bytes finalized so far.
    ///
    /// Withheld input is not counted until it is emitted or matched.
    pub fn source_offset(&self) -> u64 {
        self.source_offset
    }

    /// Returns the number of output bytes produced so far, including any
    /// replacement tail still waiting for destination space.
    pub fn dest_offset(&self) -> u64 {
        self.dest_offset
    }

    /// Returns the number of input bytes held back as a possible match prefix.
    pub fn pending_input_len(&self) -> usize {
        self.pending_input.len()
    }

    /// Returns the number of replacement bytes waiting for destination space.
    pub fn pending_output_len(&self) -> usize {
        self.pending_output.len()
    }

    /// Returns the attached ledger, if any.
    pub fn ledger(&self) -> Option<&Ledger> {
        self.ledger.as_ref()
    }

    /// Detaches and returns the ledger. Later replacements are not recorded.
    pub fn take_ledger(&mut self) -> Option<Ledger> {
        self.ledger.take()
    }

    /// Attaches a ledger, returning the previous one.
    pub fn set_ledger(&mut self, ledger: Ledger) -> Option<Ledger> {
        self.ledger.replace(ledger)
    }

    /// Copies literal input bytes, advancing both offsets.
    ///
    /// Returns false if the destination filled before all of `literal` fit.
    fn emit_literal(&mut self, out: &mut Output<'_>, literal: &[u8], pos: &mut usize) -> bool {
        let n = out.write(literal);
        *pos += n;
        self.source_offset += n as u64;
        self.dest_offset += n as u64;
        n == literal.len()
    }

    /// Records a match at the current source offset and writes the replacement.
    ///
    /// Whatever does not fit becomes `pending_output`.
    fn emit_replacement(&mut self, out: &mut Output<'_>) {
        let pattern_len = self.pattern.len() as u64;
        let replacement_len = self.replacement.len() as u64;

        self.ledger.record(
            self.source_offset,
            self.source_offset + pattern_len,
            self.dest_offset,
            self.dest_offset + replacement_len,
        );

        let n = out.write(&self.replacement);
        if n < self.replacement.len() {
            self.pending_output = self.replacement.slice(n..);
        }

        self.source_offset += pattern_len;
        self.dest_offset += replacement_len;
    }

    /// Replaces matches in `input[*pos..]`.
    ///
    /// With a `limit`, only matches starting before it are taken and the scan
    /// stops once the cursor reaches it; bytes past the limit are left for
    /// the caller. Without one, the tail is either emitted (`at_eof`) or
    /// withheld up to its overlap with the pattern.
    fn scan(
        &mut self,
        out: &mut Output<'_>,
        input: &[u8],
        pos: &mut usize,
        limit: Option<usize>,
        at_eof: bool,
    ) -> Scan {
        let end = limit.unwrap_or(input.len());

        while *pos < end || limit.is_none() {
            let rest = &input[*pos..];

            match self.finder.find(rest).filter(|&i| *pos + i < end) {
                Some(i) => {
                    if !self.emit_literal(out, &rest[..i], pos) {
                        return Scan::DstFull;
                    }
                    self.emit_replacement(out);
                    *pos += self.pattern.len();
                    if !self.pending_output.is_empty() {
                        return Scan::DstFull;
                    }
                }
                None => {
                    let withheld = match limit {
                        Some(_) => 0,
                        None if at_eof => 0,
                        None => overlap_width(rest, &self.pattern),
                    };
                    let literal_end = end - withheld;
                    if !self.emit_literal(out, &input[*pos..literal_end], pos) {
                        return Scan::DstFull;
                    }
                    return match withheld {
                        0 => Scan::Drained,
                        n => Scan::Withheld(n),
                    };
                }
            }
        }

        Scan::Drained
    }

    /// Scans a chunk with no carried input in front of it.
    fn transform_chunk(
        &mut self,
        out: &mut Output<'_>,
        src: &[u8],
        start: usize,
        at_eof: bool,
    ) -> Progress {
        let mut pos = start;
        match self.scan(out, src, &mut pos, None, at_eof) {
            Scan::Drained => Progress::done(out.written, src.len()),
            Scan::Withheld(n) => {
                self.hold(&src[src.len() - n..]);
                Progress::short_src(out.written, src.len())
            }
            Scan::DstFull => Progress::short_dst(out.written, pos),
        }
    }

    /// Replaces the input carry with `tail`.
    fn hold(&mut self, tail: &[u8]) {
        debug_assert!(tail.len() < self.pattern.len());
        tracing::trace!(withheld = tail.len(), "holding back possible match prefix");
        self.pending_input.clear();
        self.pending_input.extend_from_slice(tail);
    }

    /// Scans carried input followed by a new chunk.
    ///
    /// Only a match that starts inside the carry needs the two joined, and
    /// such a match ends within `pattern.len() - 1` bytes of the chunk. So
    /// the carry is joined with just that much of the chunk; once the cursor
    /// leaves the carry the chunk is scanned in place.
    fn transform_carried(&mut self, out: &mut Output<'_>, src: &[u8], at_eof: bool) -> Progress {
        let carried = self.pending_input.len();
        let head = src.len().min(self.pattern.len() - 1);
        let whole = head == src.len();

        let mut window = std::mem::take(&mut self.window);
        window.clear();
        window.extend_from_slice(&self.pending_input);
        window.extend_from_slice(&src[..head]);

        let mut pos = 0;
        let limit = if whole { None } else { Some(carried) };
        let scan = self.scan(out, &window, &mut pos, limit, at_eof);

        let progress = match scan {
            Scan::DstFull if pos < carried => {
                self.hold(&window[pos..carried]);
                Some(Progress::short_dst(out.written, 0))
            }
            Scan::DstFull => {
                self.pending_input.clear();
                Some(Progress::short_dst(out.written, pos - carried))
            }
            Scan::Withheld(n) => {
                self.hold(&window[window.len() - n..]);
                Some(Progress::short_src(out.written, src.len()))
            }
            Scan::Drained => {
                self.pending_input.clear();
                whole.then(|| Progress::done(out.written, src.len()))
            }
        };
        self.window = window;

        match progress {
            Some(progress) => progress,
            None => self.transform_chunk(out, src, pos - carried, at_eof),
        }
    }
}

impl Transformer for Replacer {
    /// Replaces pattern occurrences in `src`, writing into `dst`.
    ///
    /// # Processing Flow
    ///
    /// 1. Flush any replacement tail left over from the previous call
    /// 2. Scan carried input followed by `src` for the pattern
    /// 3. Copy literal bytes and replacements, recording each match
    /// 4. At the end, emit the tail (`at_eof`) or hold back the part that
    ///    could start a match
    ///
    /// `consumed` counts bytes of `src` only. Held-back bytes count as
    /// consumed: the replacer owns them now and the caller must not resend
    /// them.
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress {
        let mut out = Output {
            buf: dst,
            written: 0,
        };

        if !self.pending_output.is_empty() {
            let n = out.write(&self.pending_output);
            self.pending_output.advance(n);
            if !self.pending_output.is_empty() {
                return Progress::short_dst(out.written, 0);
            }
        }

        if self.pattern.is_empty() {
            let n = out.write(src);
            self.source_offset += n as u64;
            self.dest_offset += n as u64;
            return if n < src.len() {
                Progress::short_dst(out.written, n)
            } else {
                Progress::done(out.written, n)
            };
        }

        if self.pending_input.is_empty() {
            self.transform_chunk(&mut out, src, 0, at_eof)
        } else {
            self.transform_carried(&mut out, src, at_eof)
        }
    }

    /// Resets the replacer state for a new stream.
    ///
    /// Clears both carries and both offsets. The attached ledger, if any, is
    /// left as is; swap it with [`Replacer::take_ledger`] and
    /// [`Replacer::set_ledger`] when the old entries belong to another stream.
    fn reset(&mut self) {
        self.pending_output = Bytes::new();
        self.pending_input.clear();
        self.source_offset = 0;
        self.dest_offset = 0;
    }
}

fn encode_char(c: char) -> Bytes {
    let mut buf = [0u8; 4];
    Bytes::copy_from_slice(c.encode_utf8(&mut buf).as_bytes())
}
