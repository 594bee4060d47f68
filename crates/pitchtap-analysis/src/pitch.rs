//! Block pitch estimation.
//!
//! One fundamental-frequency estimate per audio block, in three stages:
//!
//! 1. **Difference profile** - `d(τ)` for every lag up to half the block
//!    ([`crate::difference`])
//! 2. **Cumulative mean normalization** - `d'(τ)` ([`crate::cmndf`])
//! 3. **Lag selection** - first dip below the threshold, else a confirmed
//!    running minimum ([`crate::selector`])
//!
//! The winning lag converts to `sample_rate / lag` Hz. Nothing carries over
//! between blocks except the two tunable parameters, so an estimate is a pure
//! function of the block, the parameters and the sample rate.

use crate::cmndf::CmndfNormalizer;
use crate::difference::{DifferenceMethod, DifferenceProfileBuilder, DEFAULT_ANCHOR};
use crate::params::{PitchParameters, DEFAULT_MIN_BOUNDS, DEFAULT_THRESHOLD};
use crate::selector::{LagChoice, LagSelector, Selection};
use std::sync::Arc;

/// Host-facing sentinel for "no periodic pitch in this block".
pub const NO_PITCH: f32 = -1.0;

/// Result of pitch estimation for a single block
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PitchResult {
    /// Detected frequency in Hz, or [`NO_PITCH`] (-1.0)
    pub frequency: f32,
    /// Winning lag in samples (0 if unvoiced)
    pub lag: usize,
    /// Normalized difference at the winning lag (lower = more periodic)
    pub aperiodicity: f32,
    /// Rule that picked the lag
    pub selection: Option<Selection>,
}

impl Default for PitchResult {
    fn default() -> Self {
        Self::NONE
    }
}

impl PitchResult {
    /// No pitch found.
    pub const NONE: Self = Self {
        frequency: NO_PITCH,
        lag: 0,
        aperiodicity: 1.0,
        selection: None,
    };

    fn from_choice(sample_rate: f64, choice: LagChoice) -> Self {
        Self {
            frequency: (sample_rate / choice.lag as f64) as f32,
            lag: choice.lag,
            aperiodicity: choice.value,
            selection: Some(choice.selection),
        }
    }

    /// Check if a periodic pitch was found
    pub fn is_voiced(&self) -> bool {
        self.frequency > 0.0
    }

    /// Frequency in Hz, `None` for the sentinel.
    pub fn frequency_hz(&self) -> Option<f32> {
        self.is_voiced().then_some(self.frequency)
    }

    /// Nearest MIDI note and cents deviation from it.
    pub fn midi_note(&self) -> Option<(u8, f32)> {
        self.frequency_hz().map(freq_to_midi)
    }

    /// Note name with sharp notation (e.g., "A4", "C#5")
    pub fn note_name(&self) -> Option<String> {
        const NAMES: [&str; 12] = [
            "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
        ];
        self.midi_note().map(|(note, _)| format_note(note, &NAMES))
    }

    /// Note name with flat notation (e.g., "A4", "Db5")
    pub fn note_name_flat(&self) -> Option<String> {
        const NAMES: [&str; 12] = [
            "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
        ];
        self.midi_note().map(|(note, _)| format_note(note, &NAMES))
    }
}

fn format_note(note: u8, names: &[&str; 12]) -> String {
    let octave = (note / 12) as i32 - 1;
    format!("{}{}", names[(note % 12) as usize], octave)
}

/// Convert frequency to MIDI note and cents offset
pub fn freq_to_midi(freq: f32) -> (u8, f32) {
    if freq <= 0.0 {
        return (0, 0.0);
    }

    let note_float = 69.0 + 12.0 * (freq / 440.0).log2();
    let note = (note_float.round() as i32).clamp(0, 127) as u8;

    let cents = 1200.0 * (freq / midi_to_freq(note)).log2();

    (note, cents)
}

/// Convert MIDI note to frequency
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * 2.0f32.powf((note as f32 - 69.0) / 12.0)
}

/// Construction-time settings for a [`PitchEstimator`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct EstimatorSettings {
    /// Initial detection threshold
    pub threshold: f32,
    /// Initial minimum lag, in samples
    pub min_bounds: f32,
    pub method: DifferenceMethod,
    /// First sample of the analysis window
    pub anchor: usize,
    /// Follow a threshold crossing to the bottom of its dip
    pub refine_dip: bool,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_bounds: DEFAULT_MIN_BOUNDS,
            method: DifferenceMethod::Direct,
            anchor: DEFAULT_ANCHOR,
            refine_dip: true,
        }
    }
}

/// Block pitch estimator.
///
/// Scratch buffers are sized for `block_size` at construction, so
/// [`estimate_pitch`](Self::estimate_pitch) does not allocate for blocks up to
/// that length. Parameters live in a shared [`PitchParameters`] store that can
/// be updated from another thread; each call reads them once at the start.
pub struct PitchEstimator {
    sample_rate: f64,
    params: Arc<PitchParameters>,
    differences: DifferenceProfileBuilder,
    normalizer: CmndfNormalizer,
    refine_dip: bool,
}

impl PitchEstimator {
    /// Create an estimator with default settings.
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `block_size` - Largest block that will be analysed
    pub fn new(sample_rate: f64, block_size: usize) -> Self {
        Self::with_settings(sample_rate, block_size, EstimatorSettings::default())
    }

    pub fn with_settings(sample_rate: f64, block_size: usize, settings: EstimatorSettings) -> Self {
        let params = Arc::new(PitchParameters::new(
            settings.threshold,
            settings.min_bounds,
        ));
        Self::with_parameters(sample_rate, block_size, settings, params)
    }

    /// Create an estimator reading from an existing parameter store.
    ///
    /// `settings.threshold` and `settings.min_bounds` are not applied; the
    /// store's current values are used.
    pub fn with_parameters(
        sample_rate: f64,
        block_size: usize,
        settings: EstimatorSettings,
        params: Arc<PitchParameters>,
    ) -> Self {
        Self {
            sample_rate,
            params,
            differences: DifferenceProfileBuilder::new(
                block_size,
                settings.method,
                settings.anchor,
            ),
            normalizer: CmndfNormalizer::new(block_size / 2),
            refine_dip: settings.refine_dip,
        }
    }

    /// Estimate the pitch of one mono block.
    pub fn estimate_pitch(&mut self, block: &[f32]) -> PitchResult {
        let params = self.params.snapshot();

        let profile = self.differences.build(block);
        let normalized = self.normalizer.normalize(profile);

        LagSelector::new(params.threshold, params.min_lag)
            .with_refine_dip(self.refine_dip)
            .select(&normalized)
            .map_or(PitchResult::NONE, |choice| {
                PitchResult::from_choice(self.sample_rate, choice)
            })
    }

    /// Takes effect on the next [`estimate_pitch`](Self::estimate_pitch).
    pub fn set_threshold(&self, threshold: f32) {
        self.params.set_threshold(threshold);
    }

    /// Minimum lag in samples. Takes effect on the next call.
    pub fn set_min_bounds(&self, min_bounds: f32) {
        self.params.set_min_bounds(min_bounds);
    }

    pub fn threshold(&self) -> f32 {
        self.params.threshold()
    }

    pub fn min_lag(&self) -> usize {
        self.params.min_lag()
    }

    /// Shared parameter store, for handing to a control thread.
    pub fn parameters(&self) -> Arc<PitchParameters> {
        self.params.clone()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn method(&self) -> DifferenceMethod {
        self.differences.method()
    }

    /// Raw difference profile of the last analysed block.
    pub fn last_profile(&self) -> &[f32] {
        self.differences.profile()
    }

    /// Size scratch storage for blocks of up to `block_size` samples.
    pub fn reserve(&mut self, block_size: usize) {
        self.differences.reserve(block_size);
        self.normalizer.reserve(block_size / 2);
    }
}
