//! One-shot transformation of an in-memory buffer.

use bytes::Bytes;

use crate::transform::{Backpressure, Transformer};

/// Smallest output window handed to the transformer per call.
const MIN_WINDOW: usize = 64;

/// Runs `input` through `transformer` as one complete stream.
///
/// The input is passed with `at_eof = true`, so everything the transformer
/// was holding back is released. The transformer is not reset before or
/// after; call [`Transformer::reset`] to reuse it for another stream.
///
/// # Example
///
/// ```
/// use replacers::{transform_bytes, Replacer};
///
/// let mut replacer = Replacer::from_text("cat", "dog");
/// let out = transform_bytes(&mut replacer, b"cat scatter");
/// assert_eq!(out, &b"dog sdogter"[..]);
/// ```
pub fn transform_bytes<T: Transformer + ?Sized>(transformer: &mut T, input: &[u8]) -> Bytes {
    let mut out = Vec::with_capacity(input.len());
    let mut window = input.len().max(MIN_WINDOW);
    let mut pos = 0;

    loop {
        let start = out.len();
        out.resize(start + window, 0);
        let progress = transformer.transform(&mut out[start..], &input[pos..], true);
        out.truncate(start + progress.written);
        pos += progress.consumed;

        match progress.backpressure {
            None => break,
            Some(Backpressure::ShortDst) => window = window.saturating_mul(2),
            // Nothing more can arrive, so a stalled transformer is done.
            Some(Backpressure::ShortSrc) if progress.written == 0 && progress.consumed == 0 => {
                break;
            }
            Some(Backpressure::ShortSrc) => {}
        }
    }

    Bytes::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replacer::Replacer;

    #[test]
    fn test_empty_input() {
        let mut r = Replacer::from_text("a", "b");
        assert!(transform_bytes(&mut r, b"").is_empty());
    }

    #[test]
    fn test_growing_output() {
        let mut r = Replacer::from_text("*", "-=-=-=-=");
        let input = vec![b'*'; 1000];
        let out = transform_bytes(&mut r, &input);
        assert_eq!(out.len(), 8000);
        assert!(out.chunks(8).all(|c| c == b"-=-=-=-="));
    }

    #[test]
    fn test_dyn_transformer() {
        let mut r: Box<dyn Transformer> = Box::new(Replacer::from_text("ab", ""));
        assert_eq!(transform_bytes(&mut *r, b"aabbab"), &b"ab"[..]);
    }

    #[test]
    fn test_no_reset_between_calls() {
        let mut r = Replacer::from_text("x", "yy");
        transform_bytes(&mut r, b"x");
        assert_eq!(r.source_offset(), 1);
        assert_eq!(r.dest_offset(), 2);

        r.reset();
        assert_eq!(transform_bytes(&mut r, b"axb"), &b"ayyb"[..]);
        assert_eq!(r.source_offset(), 3);
    }
}
