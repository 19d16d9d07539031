//! replacers
//!
//! Streaming byte-sequence replacement for Rust.
//!
//! `replacers` rewrites every non-overlapping occurrence of a fixed byte
//! pattern in a stream, one chunk at a time, without ever seeing the whole
//! input. Matches split across chunk boundaries are found, output is resumable
//! when the destination buffer is small, and each replacement can be
//! recorded in a [`Ledger`] that maps source spans to destination spans.
//!
//! The crate intentionally:
//! - does NOT do regular expressions
//! - does NOT manage files or paths
//! - does NOT manage concurrency
//!
//! It only does one thing: **bytes in → rewritten bytes out**
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{self, Read};
//! use replacers::{Replacer, TransformReader};
//!
//! fn main() -> io::Result<()> {
//!     let file = File::open("notes.txt")?;
//!     let mut reader = TransformReader::new(file, Replacer::from_text("colour", "color"));
//!
//!     let mut text = String::new();
//!     reader.read_to_string(&mut text)?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```
//!
//! # Low level
//!
//! ```
//! use replacers::{Backpressure, Replacer, Transformer};
//!
//! let mut r = Replacer::from_text("abc", "X");
//! let mut dst = [0u8; 16];
//!
//! // "ab" could be the start of "abc", so it is held back.
//! let p = r.transform(&mut dst, b"zab", false);
//! assert_eq!(&dst[..p.written], b"z");
//! assert_eq!(p.backpressure, Some(Backpressure::ShortSrc));
//!
//! let p = r.transform(&mut dst, b"c", true);
//! assert_eq!(&dst[..p.written], b"X");
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use replacers::{transform_async, Replacer, StreamConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), replacers::TransformError> {
//!     let mut stream = transform_async(reader, Replacer::from_text("a", "b"), StreamConfig::default());
//!
//!     while let Some(piece) = stream.next().await {
//!         let piece = piece?;
//!         println!("{} bytes", piece.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod config;
mod driver;
mod error;
mod ledger;
mod replacer;
mod transform;

mod buffer; // internal (thread-local reuse)
mod util; // internal overlap search

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use chain::{ByteRules, Chain, CharRules, RuleTable, StringRules, replace_all, replace_all_with_config};
pub use config::{DEFAULT_DST_BUFFER_SIZE, DEFAULT_LINK_CAPACITY, DEFAULT_SRC_BUFFER_SIZE, StreamConfig};
pub use driver::{TransformReader, transform_bytes};
pub use error::TransformError;
pub use ledger::{Ledger, LedgerEntry};
pub use replacer::Replacer;
pub use transform::{Backpressure, Progress, Transformer};

#[cfg(feature = "async-io")]
pub use async_stream::{TransformStream, transform_async};
