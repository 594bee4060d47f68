//! # pitchtap Analysis
//!
//! Block-based monophonic pitch estimation for real-time audio chains.
//!
//! This crate provides:
//! - **Block assembly**: interleaved host audio → mono analysis block
//! - **Difference profile**: lagged self-dissimilarity, direct or FFT-based
//! - **CMNDF**: cumulative mean normalization of the profile
//! - **Lag selection**: first confident dip, with a running-minimum fallback
//! - **Pitch estimation**: the three stages above behind one call, with
//!   parameters shared lock-free with a control thread
//!
//! All stages operate on raw `&[f32]` buffers with scratch sized up front.
//!
//! ## Example
//!
//! ```rust
//! use pitchtap_analysis::{BufferAssembler, PitchEstimator};
//!
//! let sample_rate = 44100.0;
//! let frames = 2048;
//!
//! // Interleaved stereo A4
//! let interleaved: Vec<f32> = (0..frames)
//!     .flat_map(|i| {
//!         let s = (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin();
//!         [s, s]
//!     })
//!     .collect();
//!
//! let mut assembler = BufferAssembler::new(2, frames).unwrap();
//! let mut estimator = PitchEstimator::new(sample_rate, frames);
//!
//! let block = assembler.assemble(&interleaved, frames).unwrap();
//! let pitch = estimator.estimate_pitch(block);
//! assert!((pitch.frequency - 440.0).abs() < 8.0);
//! ```

pub mod buffer;
pub mod cmndf;
pub mod difference;
pub mod params;
pub mod pitch;
pub mod selector;

pub use buffer::{pass_through, BufferAssembler};
pub use cmndf::{cumulative_mean_normalize, CmndfNormalizer, NormalizedProfile};
pub use difference::{autocorrelation, difference, DifferenceMethod, DifferenceProfileBuilder};
pub use params::{ParameterSnapshot, PitchParameters, DEFAULT_MIN_BOUNDS, DEFAULT_THRESHOLD};
pub use pitch::{
    freq_to_midi, midi_to_freq, EstimatorSettings, PitchEstimator, PitchResult, NO_PITCH,
};
pub use selector::{LagChoice, LagSelector, Selection};
