//! `std::io::Read` adapter - TransformReader.

use std::io::{self, Read};

use tracing::{debug, trace};

use crate::buffer::Buffer;
use crate::config::StreamConfig;
use crate::error::TransformError;
use crate::transform::{Backpressure, Transformer};

/// A reader that yields the transformed bytes of another reader.
///
/// Input is pulled from the inner reader into a source buffer, pushed through
/// the transformer into an output buffer, and handed out from there. The
/// inner reader is only read when the transformer asks for more input.
///
/// # Example
///
/// ```
/// use std::io::Read;
/// use replacers::{Replacer, TransformReader};
///
/// let input = &b"one fish, two fish"[..];
/// let mut reader = TransformReader::new(input, Replacer::from_text("fish", "cat"));
///
/// let mut out = String::new();
/// reader.read_to_string(&mut out)?;
/// assert_eq!(out, "one cat, two cat");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct TransformReader<R, T> {
    reader: R,
    transformer: T,
    src: Buffer,
    dst: Buffer,
    starved: bool,
    src_eof: bool,
    finished: bool,
    position: u64,
}

impl<R: Read, T: Transformer> TransformReader<R, T> {
    /// Creates a reader with the default buffer sizes.
    pub fn new(reader: R, transformer: T) -> Self {
        Self::build(reader, transformer, StreamConfig::default())
    }

    /// Creates a reader with buffers sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidConfig`] if a buffer size is zero.
    pub fn with_config(reader: R, transformer: T, config: StreamConfig) -> Result<Self, TransformError> {
        config.validate()?;
        Ok(Self::build(reader, transformer, config))
    }

    fn build(reader: R, transformer: T, config: StreamConfig) -> Self {
        Self {
            reader,
            transformer,
            src: Buffer::take(config.src_buffer_size()),
            dst: Buffer::take(config.dst_buffer_size()),
            starved: true,
            src_eof: false,
            finished: false,
            position: 0,
        }
    }

    /// Returns a reference to the inner reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Returns a reference to the transformer.
    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    /// Returns the number of transformed bytes handed out so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Consumes the adapter and returns the inner reader and transformer.
    ///
    /// Bytes already pulled from the reader but not yet handed out are lost.
    pub fn into_inner(self) -> (R, T) {
        (self.reader, self.transformer)
    }

    /// Pulls one read's worth of input into the source buffer.
    fn fill(&mut self) -> Result<(), TransformError> {
        self.src.compact();
        if self.src.is_full() {
            return Err(TransformError::NoProgress {
                buffered: self.src.len(),
            });
        }

        loop {
            match self.reader.read(self.src.spare_mut()) {
                Ok(0) => {
                    debug!(buffered = self.src.len(), "source reader reached eof");
                    self.src_eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    trace!(n, buffered = self.src.len() + n, "refilled source buffer");
                    self.src.commit(n);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Runs the transformer once over the source buffer into the (empty)
    /// output buffer.
    fn pump(&mut self) -> Result<(), TransformError> {
        self.dst.clear();
        let progress = self
            .transformer
            .transform(self.dst.spare_mut(), self.src.filled(), self.src_eof);
        self.src.consume(progress.consumed);
        self.dst.commit(progress.written);

        let stalled = progress.written == 0 && progress.consumed == 0;
        match progress.backpressure {
            None => {
                self.starved = !self.src_eof;
                self.finished = self.src_eof && self.src.is_empty();
            }
            Some(Backpressure::ShortDst) if stalled => {
                return Err(TransformError::NoProgress {
                    buffered: self.src.len(),
                });
            }
            Some(Backpressure::ShortDst) => self.starved = false,
            Some(Backpressure::ShortSrc) if self.src_eof && stalled => {
                return Err(TransformError::NoProgress {
                    buffered: self.src.len(),
                });
            }
            Some(Backpressure::ShortSrc) => {
                trace!(buffered = self.src.len(), "transformer needs more input");
                self.starved = !self.src_eof;
            }
        }
        Ok(())
    }
}

impl<R: Read, T: Transformer> Read for TransformReader<R, T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            if !self.dst.is_empty() {
                let n = buf.len().min(self.dst.len());
                buf[..n].copy_from_slice(&self.dst.filled()[..n]);
                self.dst.consume(n);
                self.position += n as u64;
                return Ok(n);
            }
            if self.finished {
                return Ok(0);
            }
            if self.starved && !self.src_eof {
                self.fill()?;
            }
            self.pump()?;
        }
    }
}
