//! Block assembly: interleaved host audio → mono analysis block.
//!
//! The host delivers one interleaved buffer per block (`[L0, R0, L1, R1, ...]`
//! for stereo). Analysis needs a single contiguous signal, so the first two
//! channels are split into their own scratch buffers and averaged. Channels
//! beyond the second are ignored for analysis.
//!
//! All scratch storage is sized up front; assembling never allocates.

use pitchtap_core::{Error, Result};

/// Collects one block of interleaved samples into per-channel buffers and a
/// mono downmix.
#[derive(Debug, Clone)]
pub struct BufferAssembler {
    channels: usize,
    capacity: usize,
    frames: usize,
    left: Vec<f32>,
    right: Vec<f32>,
    mono: Vec<f32>,
}

impl BufferAssembler {
    /// Create an assembler for `channels` channels and blocks of up to
    /// `max_frames` frames.
    pub fn new(channels: usize, max_frames: usize) -> Result<Self> {
        if channels == 0 {
            return Err(Error::InvalidChannelCount(channels));
        }

        let right_len = if channels >= 2 { max_frames } else { 0 };

        Ok(Self {
            channels,
            capacity: max_frames,
            frames: 0,
            left: vec![0.0; max_frames],
            right: vec![0.0; right_len],
            mono: vec![0.0; max_frames],
        })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Maximum frames per block.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Split `interleaved` (exactly `frames * channels` samples) and build the
    /// mono analysis block.
    pub fn assemble(&mut self, interleaved: &[f32], frames: usize) -> Result<&[f32]> {
        if frames > self.capacity {
            return Err(Error::BlockTooLarge {
                frames,
                capacity: self.capacity,
            });
        }
        let expected = frames * self.channels;
        if interleaved.len() != expected {
            return Err(Error::BufferMismatch {
                expected,
                actual: interleaved.len(),
            });
        }

        self.frames = frames;

        if self.channels == 1 {
            self.left[..frames].copy_from_slice(interleaved);
            self.mono[..frames].copy_from_slice(interleaved);
            return Ok(&self.mono[..frames]);
        }

        for (i, frame) in interleaved.chunks_exact(self.channels).enumerate() {
            self.left[i] = frame[0];
            self.right[i] = frame[1];
        }

        for ((m, &l), &r) in self.mono[..frames]
            .iter_mut()
            .zip(&self.left[..frames])
            .zip(&self.right[..frames])
        {
            *m = (l + r) / 2.0;
        }

        Ok(&self.mono[..frames])
    }

    /// First channel of the last assembled block.
    pub fn left(&self) -> &[f32] {
        &self.left[..self.frames]
    }

    /// Second channel of the last assembled block (empty for mono input).
    pub fn right(&self) -> &[f32] {
        if self.channels >= 2 {
            &self.right[..self.frames]
        } else {
            &[]
        }
    }

    /// Mono analysis block from the last call to [`assemble`](Self::assemble).
    pub fn mono(&self) -> &[f32] {
        &self.mono[..self.frames]
    }
}

/// Copy interleaved audio to the output untouched.
///
/// The analyser observes the signal but never alters it; every channel,
/// including those ignored for analysis, is forwarded as-is.
pub fn pass_through(input: &[f32], output: &mut [f32]) -> Result<()> {
    if input.len() != output.len() {
        return Err(Error::BufferMismatch {
            expected: input.len(),
            actual: output.len(),
        });
    }
    output.copy_from_slice(input);
    Ok(())
}
