//! Internal buffer management for drivers and chains.
//!
//! This module provides pooled staging buffers to minimize allocations
//! when readers and chains are created repeatedly. It is an implementation
//! detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
