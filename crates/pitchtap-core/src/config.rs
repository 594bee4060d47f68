//! Stream format configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Smallest block that still leaves room for a lag search.
pub const MIN_BLOCK_SIZE: usize = 4;

/// Audio format negotiated with the host before the first block.
///
/// The sample rate is queried once here and never re-derived per block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    pub sample_rate: f64,
    pub channels: usize,
    /// Maximum frames per block. Scratch storage is sized from this.
    pub block_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            channels: 2,
            block_size: 2048,
        }
    }
}

impl StreamConfig {
    pub fn new(sample_rate: f64, channels: usize, block_size: usize) -> Self {
        Self {
            sample_rate,
            channels,
            block_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(8000.0..=384000.0).contains(&self.sample_rate) {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        if self.channels == 0 {
            return Err(Error::InvalidChannelCount(self.channels));
        }
        if self.block_size < MIN_BLOCK_SIZE {
            return Err(Error::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }

    /// Largest lag analysed for a full block (`block_size / 2`).
    #[inline]
    pub fn max_lag(&self) -> usize {
        self.block_size / 2
    }

    /// Number of interleaved samples in a full block.
    #[inline]
    pub fn interleaved_len(&self) -> usize {
        self.block_size * self.channels
    }

    /// Duration of a full block in seconds. This is the real-time budget
    /// for one analysis call.
    #[inline]
    pub fn block_duration(&self) -> f64 {
        self.block_size as f64 / self.sample_rate
    }
}
