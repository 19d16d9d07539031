//! Async stream adapter for transformers.
//!
//! Built on `futures_io::AsyncRead` so it runs on tokio, async-std, smol, or
//! any other futures-compatible runtime.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;
use tracing::{debug, trace};

use crate::buffer::Buffer;
use crate::config::StreamConfig;
use crate::error::TransformError;
use crate::transform::{Backpressure, Transformer};

pin_project! {
    /// A stream of transformed output pieces read from an async reader.
    ///
    /// Each item is whatever one transformer call produced, at most
    /// `dst_buffer_size` bytes. Concatenated, the items are the transformed
    /// stream. After an error the stream ends.
    pub struct TransformStream<R, T> {
        #[pin]
        reader: R,
        transformer: T,
        src: Buffer,
        dst_buffer_size: usize,
        starved: bool,
        src_eof: bool,
        finished: bool,
    }
}

impl<R, T> TransformStream<R, T> {
    /// Returns a reference to the transformer.
    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    /// Consumes the stream and returns the inner reader and transformer.
    pub fn into_inner(self) -> (R, T) {
        (self.reader, self.transformer)
    }
}

impl<R: AsyncRead, T: Transformer> Stream for TransformStream<R, T> {
    type Item = Result<Bytes, TransformError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if *this.finished {
                return Poll::Ready(None);
            }

            // Read more data using AsyncRead into the source buffer
            if *this.starved && !*this.src_eof {
                this.src.compact();
                if this.src.is_full() {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(TransformError::NoProgress {
                        buffered: this.src.len(),
                    })));
                }
                match this.reader.as_mut().poll_read(cx, this.src.spare_mut()) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Poll::Ready(Err(e)) => {
                        *this.finished = true;
                        return Poll::Ready(Some(Err(TransformError::Io(e))));
                    }
                    Poll::Ready(Ok(0)) => {
                        debug!(buffered = this.src.len(), "async source reached eof");
                        *this.src_eof = true;
                    }
                    Poll::Ready(Ok(n)) => {
                        trace!(n, "refilled async source buffer");
                        this.src.commit(n);
                    }
                }
            }

            let mut out = vec![0u8; *this.dst_buffer_size];
            let progress = this.transformer.transform(&mut out, this.src.filled(), *this.src_eof);
            this.src.consume(progress.consumed);
            out.truncate(progress.written);

            let stalled = progress.written == 0 && progress.consumed == 0;
            match progress.backpressure {
                None => {
                    *this.starved = !*this.src_eof;
                    *this.finished = *this.src_eof && this.src.is_empty();
                }
                Some(Backpressure::ShortDst) if stalled => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(TransformError::NoProgress {
                        buffered: this.src.len(),
                    })));
                }
                Some(Backpressure::ShortDst) => *this.starved = false,
                Some(Backpressure::ShortSrc) if *this.src_eof && stalled => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(TransformError::NoProgress {
                        buffered: this.src.len(),
                    })));
                }
                Some(Backpressure::ShortSrc) => *this.starved = !*this.src_eof,
            }

            if !out.is_empty() {
                return Poll::Ready(Some(Ok(Bytes::from(out))));
            }
        }
    }
}

/// Creates a stream of transformed bytes from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. Tokio
/// readers can be adapted with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use replacers::{transform_async, Replacer, StreamConfig};
///
/// let file = tokio::fs::File::open("notes.txt").await?;
/// let stream = transform_async(
///     file.compat(),
///     Replacer::from_text("TODO", "DONE"),
///     StreamConfig::default(),
/// );
/// ```
///
/// # Example
///
/// ```ignore
/// use futures_util::StreamExt;
/// use futures_io::AsyncRead;
/// use replacers::{transform_async, Replacer, StreamConfig};
///
/// async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<u8>, replacers::TransformError> {
///     let mut stream = transform_async(reader, Replacer::from_text("a", "b"), StreamConfig::default());
///     let mut out = Vec::new();
///
///     while let Some(piece) = stream.next().await {
///         out.extend_from_slice(&piece?);
///     }
///     Ok(out)
/// }
/// ```
///
/// Zero buffer sizes in `config` are raised to 1.
pub fn transform_async<R: AsyncRead, T: Transformer>(
    reader: R,
    transformer: T,
    config: StreamConfig,
) -> TransformStream<R, T> {
    TransformStream {
        reader,
        transformer,
        src: Buffer::take(config.src_buffer_size().max(1)),
        dst_buffer_size: config.dst_buffer_size().max(1),
        starved: true,
        src_eof: false,
        finished: false,
    }
}
