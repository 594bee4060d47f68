//! Plugin metadata reported to the host.

use serde::{Deserialize, Serialize};

/// Packed version: major in the upper 16 bits, then minor and patch bytes.
pub const PLUGIN_VERSION: u32 = 0x0001_0000;

/// Audio buffer configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioIO {
    /// Number of input buffers
    pub inputs: usize,
    /// Number of output buffers
    pub outputs: usize,
}

impl Default for AudioIO {
    /// One interleaved buffer in, one out.
    fn default() -> Self {
        Self {
            inputs: 1,
            outputs: 1,
        }
    }
}

/// Identity and capabilities of the analysis processor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Unique plugin ID
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Vendor/author name
    pub vendor: String,

    /// Version string ("major.minor.patch")
    pub version: String,

    /// Packed version code
    pub version_code: u32,

    /// Audio buffer configuration
    pub audio_io: AudioIO,

    /// Latency in samples
    pub latency_samples: usize,

    /// Whether output audio differs from input
    pub modifies_audio: bool,
}

impl PluginMetadata {
    pub fn pitch_estimator() -> Self {
        Self {
            id: "com.pitchtap.pitch-estimator".to_string(),
            name: "Pitch Estimator".to_string(),
            vendor: "pitchtap".to_string(),
            version: version_string(PLUGIN_VERSION),
            version_code: PLUGIN_VERSION,
            audio_io: AudioIO::default(),
            latency_samples: 0,
            modifies_audio: false,
        }
    }
}

impl Default for PluginMetadata {
    fn default() -> Self {
        Self::pitch_estimator()
    }
}

/// Unpack a version code into "major.minor.patch".
pub fn version_string(code: u32) -> String {
    format!(
        "{}.{}.{}",
        code >> 16,
        (code >> 8) & 0xff,
        code & 0xff
    )
}
