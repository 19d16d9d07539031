//! Async streaming support.
//!
//! - [`transform_async`] - Creates a stream of transformed bytes from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{TransformStream, transform_async};
