//! Pitch estimator as a host-driven analysis processor.
//!
//! [`PitchPlugin`] implements [`AnalysisProcessor`]: the host prepares it for
//! a stream format, hands it interleaved blocks, and reads the latest pitch
//! back as parameter 2. Audio passes through unchanged.
//!
//! ```
//! use pitchtap_plugin::{AnalysisProcessor, PitchPlugin};
//!
//! let mut plugin = PitchPlugin::new();
//! plugin.prepare(44100.0, 1, 1024).unwrap();
//!
//! let input: Vec<f32> = (0..1024)
//!     .map(|i| (2.0 * std::f32::consts::PI * 220.0 * i as f32 / 44100.0).sin())
//!     .collect();
//! let mut output = vec![0.0; 1024];
//!
//! let result = plugin.process(&input, &mut output, 1024).unwrap();
//! assert!((result.frequency - 220.0).abs() < 5.0);
//! assert_eq!(plugin.get_parameter(2).unwrap(), result.frequency);
//! ```

mod handle;
mod instance;
mod metadata;
mod processor;
pub mod protocol;

pub use handle::PitchPluginHandle;
pub use instance::AnalysisProcessor;
pub use metadata::{version_string, AudioIO, PluginMetadata, PLUGIN_VERSION};
pub use processor::PitchPlugin;
pub use protocol::{parameter_table, ParameterFlags, ParameterId, ParameterInfo};

pub use pitchtap_core::{Error, Result};
