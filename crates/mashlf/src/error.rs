use std::io;

use thiserror::Error;

/// Rejected configuration, detected before any input is read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A line length bound was zero or negative.
    #[error("{name} must be a positive integer, got {value}")]
    NonPositiveLength {
        /// Which bound was rejected.
        name: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// A line length bound does not fit in `usize`.
    #[error("{name} is too large for this platform: {value}")]
    LengthOverflow {
        /// Which bound was rejected.
        name: &'static str,
        /// The rejected value.
        value: i64,
    },
}

/// Failure of a filter run. Streaming failures are fatal: output written
/// before the failure stays written and nothing is retried.
#[derive(Debug, Error)]
pub enum MashError {
    /// The run was rejected before any input was read.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The byte source reported an error other than end of stream.
    #[error("cannot read input: {0}")]
    Read(#[source] io::Error),
    /// The byte sink refused a write or flush.
    #[error("cannot write output: {0}")]
    Write(#[source] io::Error),
}

impl MashError {
    /// Process exit status: `1` for a rejected configuration, `2` for a run
    /// aborted mid-stream.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            MashError::Config(_) => 1,
            MashError::Read(_) | MashError::Write(_) => 2,
        }
    }
}
