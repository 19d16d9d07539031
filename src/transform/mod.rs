//! The stage interface shared by the replace engine and the rule chain.
//!
//! - [`Transformer`] - One `transform(dst, src, at_eof)` step over a byte stream
//! - [`Progress`] - What a step wrote, consumed, and whether it is blocked
//! - [`Backpressure`] - The two ways a step can ask the caller for more

use std::fmt;

/// Why a transform step stopped before finishing its input.
///
/// Neither variant is an error. Both tell the driver what to do before the
/// next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backpressure {
    /// The destination buffer is full. Drain it (or pass a fresh one) and
    /// call again with the unconsumed source.
    ShortDst,

    /// Trailing bytes might start a match. Supply more source, or call
    /// again with `at_eof = true` so they are emitted as literals.
    ShortSrc,
}

impl fmt::Display for Backpressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backpressure::ShortDst => write!(f, "short destination buffer"),
            Backpressure::ShortSrc => write!(f, "short source buffer"),
        }
    }
}

/// The outcome of one [`Transformer::transform`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Progress {
    /// Bytes written to the front of the destination buffer.
    pub written: usize,

    /// Bytes taken from the front of the source buffer. The caller must not
    /// supply these again.
    pub consumed: usize,

    /// Set when the call stopped early.
    pub backpressure: Option<Backpressure>,
}

impl Progress {
    /// A finished step: no backpressure.
    pub const fn done(written: usize, consumed: usize) -> Self {
        Self {
            written,
            consumed,
            backpressure: None,
        }
    }

    /// A step stopped because the destination is full.
    pub const fn short_dst(written: usize, consumed: usize) -> Self {
        Self {
            written,
            consumed,
            backpressure: Some(Backpressure::ShortDst),
        }
    }

    /// A step waiting on more source data.
    pub const fn short_src(written: usize, consumed: usize) -> Self {
        Self {
            written,
            consumed,
            backpressure: Some(Backpressure::ShortSrc),
        }
    }

    /// Returns true if the destination buffer ran out.
    pub fn is_short_dst(&self) -> bool {
        self.backpressure == Some(Backpressure::ShortDst)
    }

    /// Returns true if more source data is needed.
    pub fn is_short_src(&self) -> bool {
        self.backpressure == Some(Backpressure::ShortSrc)
    }
}

/// A stateful, chunk-at-a-time byte stream transform.
///
/// The caller owns the I/O loop and calls `transform` with whatever
/// destination space and source bytes it has. Implementations keep any state
/// they need across calls (carried input, unflushed output) in owned buffers,
/// so `src` and `dst` only need to live for the call.
///
/// # Contract
///
/// - `dst[..written]` holds output; nothing past `written` is meaningful.
/// - `src[..consumed]` has been taken; the rest must be offered again.
/// - `at_eof` declares that `src` is the final piece of the stream. Calling
///   again with `at_eof = true` and an empty `src` flushes everything.
///
/// A caller that keeps answering `ShortDst` with a zero-length destination
/// never makes progress; that is a caller bug, not a transformer failure.
pub trait Transformer {
    /// Transforms as much of `src` into `dst` as possible.
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress;

    /// Clears all per-stream state so the transformer can start an unrelated stream.
    fn reset(&mut self);
}

impl<T: Transformer + ?Sized> Transformer for Box<T> {
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress {
        (**self).transform(dst, src, at_eof)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<T: Transformer + ?Sized> Transformer for &mut T {
    fn transform(&mut self, dst: &mut [u8], src: &[u8], at_eof: bool) -> Progress {
        (**self).transform(dst, src, at_eof)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
