//! Pitch estimator packaged as a pass-through analysis processor.
//!
//! Each processed block is copied unchanged to the output, downmixed to mono
//! and analysed. The latest estimate is published through a lock-free cell
//! readable as parameter 2 or through a [`PitchPluginHandle`].

use std::sync::Arc;

use pitchtap_analysis::{
    pass_through, BufferAssembler, EstimatorSettings, PitchEstimator, PitchParameters,
    PitchResult, NO_PITCH,
};
use pitchtap_core::{AtomicFloat, Error, Result, StreamConfig};

use crate::instance::AnalysisProcessor;
use crate::protocol::{parameter_table, ParameterId, ParameterInfo};
use crate::{PitchPluginHandle, PluginMetadata};

/// Per-format state, rebuilt by `prepare`.
struct Prepared {
    config: StreamConfig,
    assembler: BufferAssembler,
    estimator: PitchEstimator,
}

pub struct PitchPlugin {
    metadata: PluginMetadata,
    parameters: Vec<ParameterInfo>,
    settings: EstimatorSettings,
    params: Arc<PitchParameters>,
    current_pitch: Arc<AtomicFloat>,
    prepared: Option<Prepared>,
}

impl PitchPlugin {
    pub fn new() -> Self {
        Self::with_settings(EstimatorSettings::default())
    }

    /// Create with explicit estimator settings.
    ///
    /// Initial threshold and min bounds are clamped to their host ranges.
    pub fn with_settings(settings: EstimatorSettings) -> Self {
        let parameters = parameter_table();
        let threshold = parameters[ParameterId::Threshold as usize]
            .range
            .clamp(settings.threshold);
        let min_bounds = parameters[ParameterId::MinBounds as usize]
            .range
            .clamp(settings.min_bounds);

        Self {
            metadata: PluginMetadata::pitch_estimator(),
            parameters,
            settings,
            params: Arc::new(PitchParameters::new(threshold, min_bounds)),
            current_pitch: Arc::new(AtomicFloat::new(NO_PITCH)),
            prepared: None,
        }
    }

    /// Control-thread handle sharing this plugin's parameters.
    pub fn handle(&self) -> PitchPluginHandle {
        PitchPluginHandle::new(self.params.clone(), self.current_pitch.clone())
    }

    pub fn settings(&self) -> &EstimatorSettings {
        &self.settings
    }

    /// Stream format from the last successful `prepare`.
    pub fn stream_config(&self) -> Option<&StreamConfig> {
        self.prepared.as_ref().map(|p| &p.config)
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }

    /// Latest pitch in Hz, or -1.
    pub fn current_pitch(&self) -> f32 {
        self.current_pitch.get()
    }

    fn info(&self, id: ParameterId) -> &ParameterInfo {
        &self.parameters[id as usize]
    }
}

impl Default for PitchPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisProcessor for PitchPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    fn prepare(&mut self, sample_rate: f64, channels: usize, block_size: usize) -> Result<()> {
        let config = StreamConfig::new(sample_rate, channels, block_size);
        config.validate()?;
        if self.settings.anchor >= block_size {
            return Err(Error::InvalidConfig(format!(
                "analysis anchor {} lies outside a block of {} frames",
                self.settings.anchor, block_size
            )));
        }

        let assembler = BufferAssembler::new(channels, block_size)?;
        let estimator = PitchEstimator::with_parameters(
            sample_rate,
            block_size,
            self.settings,
            self.params.clone(),
        );

        tracing::debug!(
            "Prepared pitch estimator: {} Hz, {} channels, {} frames, {:?} difference",
            sample_rate,
            channels,
            block_size,
            self.settings.method
        );

        self.prepared = Some(Prepared {
            config,
            assembler,
            estimator,
        });
        self.current_pitch.set(NO_PITCH);
        Ok(())
    }

    fn process(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        frames: usize,
    ) -> Result<PitchResult> {
        let prepared = self.prepared.as_mut().ok_or(Error::NotPrepared)?;

        let block = prepared.assembler.assemble(input, frames)?;
        pass_through(input, output)?;

        let result = prepared.estimator.estimate_pitch(block);
        self.current_pitch.set(result.frequency);
        Ok(result)
    }

    fn reset(&mut self) {
        self.current_pitch.set(NO_PITCH);
        tracing::debug!("Pitch estimator reset");
    }

    fn set_parameter(&mut self, id: u32, value: f32) -> Result<()> {
        let param = ParameterId::try_from(id)?;
        let value = self.info(param).range.clamp(value);

        match param {
            ParameterId::Threshold => self.params.set_threshold(value),
            ParameterId::MinBounds => self.params.set_min_bounds(value),
            ParameterId::Pitch => {
                tracing::warn!("Rejected write to read-only parameter {}", id);
                return Err(Error::ReadOnlyParameter(id));
            }
        }
        Ok(())
    }

    fn get_parameter(&self, id: u32) -> Result<f32> {
        Ok(match ParameterId::try_from(id)? {
            ParameterId::Threshold => self.params.threshold(),
            ParameterId::MinBounds => self.params.min_bounds(),
            ParameterId::Pitch => self.current_pitch.get(),
        })
    }
}
