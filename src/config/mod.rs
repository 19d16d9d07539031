//! Configuration for stream drivers.
//!
//! The replace engine has no tunables: its carries are sized by the
//! pattern and replacement. What can be tuned is how much the drivers
//! buffer around it.
//!
//! - [`StreamConfig`] - Buffer sizes for readers, async streams and chains
//!
//! # Example
//!
//! ```
//! use replacers::StreamConfig;
//!
//! // Custom buffer sizes
//! let config = StreamConfig::new(16 * 1024, 16 * 1024)?;
//!
//! // Bigger inter-stage buffers for long rule chains
//! let config = StreamConfig::default().with_link_capacity(64 * 1024);
//!
//! # Ok::<(), replacers::TransformError>(())
//! ```

use crate::error::TransformError;

/// Default number of source bytes read per refill (4 KiB).
pub const DEFAULT_SRC_BUFFER_SIZE: usize = 4 * 1024;

/// Default number of output bytes staged per transform call (4 KiB).
pub const DEFAULT_DST_BUFFER_SIZE: usize = 4 * 1024;

/// Default capacity of the buffer between two chained stages (4 KiB).
pub const DEFAULT_LINK_CAPACITY: usize = 4 * 1024;

/// Buffer sizing for the drivers around a [`Transformer`](crate::Transformer).
///
/// None of these sizes affect the output: the engine produces the same
/// bytes and the same ledger whatever the buffer sizes are. They only trade
/// memory for the number of `transform` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamConfig {
    src_buffer_size: usize,
    dst_buffer_size: usize,
    link_capacity: usize,
}

impl StreamConfig {
    /// Creates a new configuration.
    ///
    /// Returns error if either size is zero.
    pub fn new(src_buffer_size: usize, dst_buffer_size: usize) -> Result<Self, TransformError> {
        let config = Self {
            src_buffer_size,
            dst_buffer_size,
            link_capacity: DEFAULT_LINK_CAPACITY,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the source buffer size.
    pub fn with_src_buffer_size(mut self, size: usize) -> Self {
        self.src_buffer_size = size;
        self
    }

    /// Sets the destination buffer size.
    pub fn with_dst_buffer_size(mut self, size: usize) -> Self {
        self.dst_buffer_size = size;
        self
    }

    /// Sets the capacity of each inter-stage buffer in a chain.
    pub fn with_link_capacity(mut self, size: usize) -> Self {
        self.link_capacity = size;
        self
    }

    /// Returns the source buffer size.
    pub fn src_buffer_size(&self) -> usize {
        self.src_buffer_size
    }

    /// Returns the destination buffer size.
    pub fn dst_buffer_size(&self) -> usize {
        self.dst_buffer_size
    }

    /// Returns the inter-stage buffer capacity.
    pub fn link_capacity(&self) -> usize {
        self.link_capacity
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), TransformError> {
        if self.src_buffer_size == 0 {
            return Err(TransformError::InvalidConfig {
                message: "src_buffer_size must be non-zero",
            });
        }

        if self.dst_buffer_size == 0 {
            return Err(TransformError::InvalidConfig {
                message: "dst_buffer_size must be non-zero",
            });
        }

        if self.link_capacity == 0 {
            return Err(TransformError::InvalidConfig {
                message: "link_capacity must be non-zero",
            });
        }

        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            src_buffer_size: DEFAULT_SRC_BUFFER_SIZE,
            dst_buffer_size: DEFAULT_DST_BUFFER_SIZE,
            link_capacity: DEFAULT_LINK_CAPACITY,
        }
    }
}
