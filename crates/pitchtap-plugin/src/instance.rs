//! Host-facing processor trait.
//!
//! The host calls `prepare` once the stream format is known, then `process`
//! once per block on its audio thread. Parameter calls may arrive from any
//! thread through a [`PitchPluginHandle`](crate::PitchPluginHandle); the
//! methods here are the audio-thread side.

use pitchtap_analysis::PitchResult;
use pitchtap_core::Result;

use crate::protocol::ParameterInfo;
use crate::PluginMetadata;

/// Interface an audio host drives an analysis processor through.
pub trait AnalysisProcessor: Send {
    fn metadata(&self) -> &PluginMetadata;

    fn parameters(&self) -> &[ParameterInfo];

    /// Configure for a stream format. May be called again to reconfigure.
    fn prepare(&mut self, sample_rate: f64, channels: usize, block_size: usize) -> Result<()>;

    /// Whether the host should call [`process`](Self::process) this cycle.
    fn should_process(&self, inputs_idle: bool) -> bool {
        !inputs_idle
    }

    /// Analyse one interleaved block and copy it to `output` unchanged.
    fn process(&mut self, input: &[f32], output: &mut [f32], frames: usize)
        -> Result<PitchResult>;

    fn reset(&mut self);

    /// Plain (denormalized) value; clamped to the parameter's range.
    fn set_parameter(&mut self, id: u32, value: f32) -> Result<()>;

    fn get_parameter(&self, id: u32) -> Result<f32>;
}
