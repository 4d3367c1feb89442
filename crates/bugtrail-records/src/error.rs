//! Error types for bugtrail-records operations.

use std::io;
use thiserror::Error;

/// The error type for bugtrail-records operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A record did not follow the expected layout.
    #[error("Invalid record format at line {line_number}: {message}")]
    InvalidFormat {
        /// The 1-based line number of the offending line.
        line_number: usize,
        /// What was wrong with it.
        message: String,
    },
}

impl Error {
    /// Shorthand for building an [`Error::InvalidFormat`].
    pub fn invalid_format(line_number: usize, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            line_number,
            message: message.into(),
        }
    }
}

/// A specialized Result type for bugtrail-records operations.
pub type Result<T> = std::result::Result<T, Error>;
