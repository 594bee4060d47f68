//! Host-visible parameter descriptors.
//!
//! | id | name | range | default |
//! |----|------|-------|---------|
//! | 0 | Threshold | 0.01 – 1.0 | 0.1 |
//! | 1 | Min Bounds | 1 – 200 (whole samples) | 20 |
//! | 2 | Pitch | read-only, Hz or -1 | -1 |
//!
//! "Min Bounds" is a minimum lag counted in samples, not a frequency.

use pitchtap_analysis::{DEFAULT_MIN_BOUNDS, DEFAULT_THRESHOLD, NO_PITCH};
use pitchtap_core::{Error, ParameterRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ParameterId {
    Threshold = 0,
    MinBounds = 1,
    Pitch = 2,
}

impl ParameterId {
    pub const ALL: [ParameterId; 3] = [Self::Threshold, Self::MinBounds, Self::Pitch];

    pub fn index(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for ParameterId {
    type Error = Error;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Threshold),
            1 => Ok(Self::MinBounds),
            2 => Ok(Self::Pitch),
            _ => Err(Error::UnknownParameter(id)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParameterFlags {
    pub automatable: bool,
    pub read_only: bool,
}

/// Parameter metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    pub id: ParameterId,
    pub name: String,
    pub unit: String,
    pub range: ParameterRange,
    pub flags: ParameterFlags,
}

impl ParameterInfo {
    pub fn threshold() -> Self {
        Self {
            id: ParameterId::Threshold,
            name: "Threshold".to_string(),
            unit: String::new(),
            range: ParameterRange::linear(0.01, 1.0, DEFAULT_THRESHOLD),
            flags: ParameterFlags {
                automatable: true,
                read_only: false,
            },
        }
    }

    pub fn min_bounds() -> Self {
        Self {
            id: ParameterId::MinBounds,
            name: "Min Bounds".to_string(),
            unit: "samples".to_string(),
            range: ParameterRange::integer(1, 200, DEFAULT_MIN_BOUNDS as i32),
            flags: ParameterFlags {
                automatable: true,
                read_only: false,
            },
        }
    }

    pub fn pitch() -> Self {
        Self {
            id: ParameterId::Pitch,
            name: "Pitch".to_string(),
            unit: "Hz".to_string(),
            range: ParameterRange::linear(NO_PITCH, 192000.0, NO_PITCH),
            flags: ParameterFlags {
                automatable: false,
                read_only: true,
            },
        }
    }

    pub fn for_id(id: ParameterId) -> Self {
        match id {
            ParameterId::Threshold => Self::threshold(),
            ParameterId::MinBounds => Self::min_bounds(),
            ParameterId::Pitch => Self::pitch(),
        }
    }
}

/// All parameters, ordered by id.
pub fn parameter_table() -> Vec<ParameterInfo> {
    ParameterId::ALL
        .into_iter()
        .map(ParameterInfo::for_id)
        .collect()
}
