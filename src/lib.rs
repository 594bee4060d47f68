//! # pitchtap - Real-time Block Pitch Estimation
//!
//! One fundamental-frequency estimate per audio block, cheap enough to run on
//! a host's audio thread.
//!
//! ## Architecture
//!
//! pitchtap is an umbrella crate that coordinates:
//! - **pitchtap-core** - Stream config, lock-free scalars, parameter ranges, errors
//! - **pitchtap-analysis** - Downmix, difference profile, CMNDF, lag selection
//! - **pitchtap-plugin** - Host-driven pass-through processor and control handle
//!
//! ## Quick Start
//!
//! ```
//! use pitchtap::prelude::*;
//!
//! let mut plugin = PitchTapBuilder::new()
//!     .sample_rate(44100.0)
//!     .channels(1)
//!     .block_size(2048)
//!     .build()?;
//!
//! // Control side: clone the handle to another thread
//! let handle = plugin.handle();
//! handle.set_threshold(0.12);
//!
//! // Audio side: one call per block
//! let input: Vec<f32> = (0..2048)
//!     .map(|i| (2.0 * std::f32::consts::PI * 330.0 * i as f32 / 44100.0).sin())
//!     .collect();
//! let mut output = vec![0.0; 2048];
//! let pitch = plugin.process(&input, &mut output, 2048)?;
//!
//! assert!((pitch.frequency - 330.0).abs() < 330.0 * 0.02);
//! assert_eq!(handle.current_pitch(), pitch.frequency);
//! # Ok::<(), pitchtap::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serialization` - serde derives on results and settings

mod builder;
mod error;

pub use builder::PitchTapBuilder;
pub use error::{Error, Result};

/// Re-export of pitchtap-core for direct access
pub use pitchtap_core as core;

/// Block analysis stages
pub use pitchtap_analysis as analysis;

/// Host processor
pub use pitchtap_plugin as plugin;

pub use pitchtap_analysis::{
    BufferAssembler, CmndfNormalizer, DifferenceMethod, DifferenceProfileBuilder,
    EstimatorSettings, LagSelector, PitchEstimator, PitchParameters, PitchResult, Selection,
    NO_PITCH,
};
pub use pitchtap_core::{AtomicFloat, ParameterRange, StreamConfig};
pub use pitchtap_plugin::{
    AnalysisProcessor, ParameterId, ParameterInfo, PitchPlugin, PitchPluginHandle,
    PluginMetadata,
};

/// Common imports for working with pitchtap.
pub mod prelude {
    pub use crate::{Error, PitchTapBuilder, Result};

    pub use crate::{
        AnalysisProcessor, DifferenceMethod, EstimatorSettings, ParameterId, PitchEstimator,
        PitchPlugin, PitchPluginHandle, PitchResult, StreamConfig, NO_PITCH,
    };
}
