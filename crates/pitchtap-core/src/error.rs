//! Error types for pitchtap-core.

use thiserror::Error;

/// Errors raised when the processing interface is used incorrectly.
///
/// Degenerate audio (silence, noise) and a minimum lag beyond the analysable
/// range are not errors; they surface as a "no pitch" result instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid sample rate: {0}. Must be between 8000 and 384000 Hz")]
    InvalidSampleRate(f64),

    #[error("Invalid channel count: {0}. Must be at least 1")]
    InvalidChannelCount(usize),

    #[error("Invalid block size: {0}. Must be at least {min}", min = crate::config::MIN_BLOCK_SIZE)]
    InvalidBlockSize(usize),

    #[error("Buffer length mismatch: expected {expected} samples, got {actual}")]
    BufferMismatch { expected: usize, actual: usize },

    #[error("Block of {frames} frames exceeds prepared capacity of {capacity}")]
    BlockTooLarge { frames: usize, capacity: usize },

    #[error("Unknown parameter id: {0}")]
    UnknownParameter(u32),

    #[error("Parameter {0} is read-only")]
    ReadOnlyParameter(u32),

    #[error("Processor has not been prepared")]
    NotPrepared,
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::BufferMismatch {
            expected: 2048,
            actual: 2047,
        };
        assert_eq!(
            err.to_string(),
            "Buffer length mismatch: expected 2048 samples, got 2047"
        );
        assert_eq!(
            Error::InvalidBlockSize(2).to_string(),
            "Invalid block size: 2. Must be at least 4"
        );
    }
}
