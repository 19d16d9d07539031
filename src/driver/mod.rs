//! Synchronous drivers.
//!
//! - [`TransformReader`] - Wraps a [`std::io::Read`] and yields transformed bytes
//! - [`transform_bytes`] - Transforms an in-memory buffer in one go

mod oneshot;
mod reader;

pub use oneshot::transform_bytes;
pub use reader::TransformReader;
