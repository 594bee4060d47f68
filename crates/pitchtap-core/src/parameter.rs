//! Host-visible parameter ranges.
//!
//! Hosts drive parameters either with real values or with normalized
//! (0.0-1.0) automation values. A [`ParameterRange`] converts between the two
//! and clamps incoming values before they reach the estimator.
//!
//! # Example
//!
//! ```
//! use pitchtap_core::ParameterRange;
//!
//! // Minimum lag bound: whole samples from 1 to 200
//! let min_bounds = ParameterRange::integer(1, 200, 20);
//!
//! assert_eq!(min_bounds.clamp(512.0), 200.0);
//! assert_eq!(min_bounds.denormalize(0.0), 1.0);
//! assert_eq!(min_bounds.snap(19.6), 20.0);
//! ```

/// How a parameter value is scaled between normalized (0-1) and real values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterScale {
    /// `real = min + normalized * (max - min)`
    #[default]
    Linear,

    /// Linear, quantized to whole numbers.
    Integer,
}

/// Parameter range with scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub scale: ParameterScale,
}

impl ParameterRange {
    /// Create a new parameter range. `default` is clamped into `[min, max]`.
    pub fn new(min: f32, max: f32, default: f32, scale: ParameterScale) -> Self {
        debug_assert!(max > min, "max must be greater than min");

        Self {
            min,
            max,
            default: default.clamp(min, max),
            scale,
        }
    }

    pub fn linear(min: f32, max: f32, default: f32) -> Self {
        Self::new(min, max, default, ParameterScale::Linear)
    }

    pub fn integer(min: i32, max: i32, default: i32) -> Self {
        Self::new(
            min as f32,
            max as f32,
            default as f32,
            ParameterScale::Integer,
        )
    }

    /// Round to the parameter's resolution without clamping.
    #[inline]
    pub fn snap(&self, value: f32) -> f32 {
        match self.scale {
            ParameterScale::Linear => value,
            ParameterScale::Integer => value.round(),
        }
    }

    /// Clamp a real value to this range (and its resolution).
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        self.snap(value.clamp(self.min, self.max))
    }

    /// Convert a real value to normalized (0.0-1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.span();
        if range <= 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / range
    }

    /// Convert a normalized value (0.0-1.0) to a real value.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let continuous = self.min + normalized.clamp(0.0, 1.0) * self.span();
        self.snap(continuous)
    }

    #[inline]
    pub fn default_normalized(&self) -> f32 {
        self.normalize(self.default)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}
