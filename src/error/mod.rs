//! Error types for replacers.
//!
//! The replace engine itself never fails: running out of destination space
//! or source data is reported through [`Backpressure`](crate::Backpressure).
//! These errors only come from the drivers that own the I/O loop.

use std::fmt;
use std::io;

/// Errors that can occur while driving a transformer over a stream.
#[derive(Debug)]
pub enum TransformError {
    /// An I/O error occurred while reading input data.
    Io(io::Error),

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The transformer stopped making progress although the driver had
    /// nothing more to give it.
    NoProgress {
        /// Source bytes still buffered in the driver.
        buffered: usize,
    },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Io(e) => write!(f, "io error: {}", e),
            TransformError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
            TransformError::NoProgress { buffered } => {
                write!(
                    f,
                    "transformer made no progress ({} source bytes buffered)",
                    buffered
                )
            }
        }
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransformError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TransformError {
    fn from(e: io::Error) -> Self {
        TransformError::Io(e)
    }
}

impl From<TransformError> for io::Error {
    fn from(e: TransformError) -> Self {
        match e {
            TransformError::Io(e) => e,
            TransformError::InvalidConfig { .. } => io::Error::new(io::ErrorKind::InvalidInput, e),
            TransformError::NoProgress { .. } => io::Error::other(e),
        }
    }
}
