//! Test helpers and fixtures for pitchtap integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (pass-through, downmix)
//! - `PROFILE_EPSILON` (1e-3): Direct vs FFT profiles
//! - `PITCH_TOLERANCE_PERCENT` (2%): Pure tone estimates

#![allow(dead_code)]

pub mod tolerances;

use pitchtap::prelude::*;

/// Default test sample rate
pub const TEST_SAMPLE_RATE: f64 = 44100.0;

/// Standard block size for deterministic testing
pub const TEST_BLOCK_SIZE: usize = 2048;

/// Create a prepared plugin with the given channel count and test defaults.
pub fn test_plugin(channels: usize) -> PitchPlugin {
    PitchTapBuilder::new()
        .sample_rate(TEST_SAMPLE_RATE)
        .channels(channels)
        .block_size(TEST_BLOCK_SIZE)
        .build()
        .expect("Failed to create test plugin")
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate silence (zero samples).
pub fn generate_silence(num_samples: usize) -> Vec<f32> {
    vec![0.0; num_samples]
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    // LCG for reproducible noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 33) as f32 / u32::MAX as f32) * 4.0 - 1.0
        })
        .collect()
}

/// Interleave per-channel buffers of equal length.
pub fn interleave(channels: &[&[f32]]) -> Vec<f32> {
    let frames = channels.first().map_or(0, |c| c.len());
    (0..frames)
        .flat_map(|i| channels.iter().map(move |c| c[i]))
        .collect()
}

/// Percentage error of `estimate` against `expected`.
pub fn percent_error(estimate: f32, expected: f32) -> f32 {
    (estimate - expected).abs() / expected * 100.0
}

/// Assert an estimate is within [`tolerances::PITCH_TOLERANCE_PERCENT`].
pub fn assert_pitch_near(estimate: f32, expected: f32) {
    let error = percent_error(estimate, expected);
    assert!(
        error <= tolerances::PITCH_TOLERANCE_PERCENT,
        "Expected ~{} Hz, got {} Hz ({:.2}% off)",
        expected,
        estimate,
        error
    );
}
