//! Builder for a prepared [`PitchPlugin`].

use pitchtap_analysis::{DifferenceMethod, EstimatorSettings, PitchEstimator};
use pitchtap_core::StreamConfig;
use pitchtap_plugin::{AnalysisProcessor, PitchPlugin};

use crate::{Error, Result};

/// Stream format and estimator settings, validated together by
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use pitchtap::prelude::*;
///
/// let plugin = PitchTapBuilder::new()
///     .sample_rate(48000.0)
///     .channels(2)
///     .block_size(1024)
///     .threshold(0.15)
///     .build()?;
///
/// assert!(plugin.is_prepared());
/// assert_eq!(plugin.get_parameter(0)?, 0.15);
/// # Ok::<(), pitchtap::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PitchTapBuilder {
    stream: StreamConfig,
    settings: EstimatorSettings,
}

impl PitchTapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default: 44100
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.stream.sample_rate = sample_rate;
        self
    }

    /// Default: 2
    pub fn channels(mut self, channels: usize) -> Self {
        self.stream.channels = channels;
        self
    }

    /// Largest block the host will deliver. Default: 2048
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.stream.block_size = block_size;
        self
    }

    pub fn stream(mut self, stream: StreamConfig) -> Self {
        self.stream = stream;
        self
    }

    /// Default: 0.1
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.settings.threshold = threshold;
        self
    }

    /// Minimum lag in samples. Default: 20
    pub fn min_bounds(mut self, min_bounds: f32) -> Self {
        self.settings.min_bounds = min_bounds;
        self
    }

    /// Default: [`DifferenceMethod::Direct`]
    pub fn method(mut self, method: DifferenceMethod) -> Self {
        self.settings.method = method;
        self
    }

    /// First sample of the analysis window. Default: 1
    pub fn anchor(mut self, anchor: usize) -> Self {
        self.settings.anchor = anchor;
        self
    }

    /// Default: true
    pub fn refine_dip(mut self, refine_dip: bool) -> Self {
        self.settings.refine_dip = refine_dip;
        self
    }

    pub fn settings(mut self, settings: EstimatorSettings) -> Self {
        self.settings = settings;
        self
    }

    fn validate(&self) -> Result<()> {
        self.stream.validate()?;

        if !self.settings.threshold.is_finite() {
            return Err(Error::Settings(format!(
                "threshold must be finite, got {}",
                self.settings.threshold
            )));
        }
        if !self.settings.min_bounds.is_finite() {
            return Err(Error::Settings(format!(
                "min bounds must be finite, got {}",
                self.settings.min_bounds
            )));
        }
        if self.settings.anchor >= self.stream.block_size {
            return Err(Error::Settings(format!(
                "anchor {} must be inside the block of {} frames",
                self.settings.anchor, self.stream.block_size
            )));
        }
        Ok(())
    }

    /// Validate and return a processor already prepared for the stream.
    pub fn build(self) -> Result<PitchPlugin> {
        self.validate()?;

        let mut plugin = PitchPlugin::with_settings(self.settings);
        plugin.prepare(
            self.stream.sample_rate,
            self.stream.channels,
            self.stream.block_size,
        )?;
        Ok(plugin)
    }

    /// Validate and return a bare estimator for mono blocks.
    ///
    /// Unlike [`build`](Self::build), threshold and min bounds are not
    /// clamped to host ranges.
    pub fn build_estimator(self) -> Result<PitchEstimator> {
        self.validate()?;

        tracing::debug!(
            "Building estimator: {} Hz, {} frames, {:?}",
            self.stream.sample_rate,
            self.stream.block_size,
            self.settings
        );
        Ok(PitchEstimator::with_settings(
            self.stream.sample_rate,
            self.stream.block_size,
            self.settings,
        ))
    }
}
