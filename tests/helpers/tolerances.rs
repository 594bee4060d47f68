//! Tolerance constants for pitch tests.

/// Exact operations (pass-through, identical downmix).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// Direct vs FFT difference profile, relative to the lag-0 energy.
pub const PROFILE_EPSILON: f32 = 1e-3;

/// Pure sine estimates must land within this percentage of the tone.
pub const PITCH_TOLERANCE_PERCENT: f32 = 2.0;
