//! Shared estimator parameters.
//!
//! The control thread (UI, host automation) writes; the audio thread reads a
//! [`ParameterSnapshot`] by value at the start of every analysis call. Both
//! sides go through [`AtomicFloat`], so neither ever waits on the other.

use pitchtap_core::AtomicFloat;

/// Default detection threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// Default minimum lag, in samples.
pub const DEFAULT_MIN_BOUNDS: f32 = 20.0;

/// Parameters read by the estimator, written from any thread.
#[derive(Debug)]
pub struct PitchParameters {
    threshold: AtomicFloat,
    /// Minimum lag in samples, stored already rounded.
    min_bounds: AtomicFloat,
}

/// Parameter values frozen for one analysis call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot {
    pub threshold: f32,
    pub min_lag: usize,
}

impl Default for PitchParameters {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_MIN_BOUNDS)
    }
}

impl PitchParameters {
    pub fn new(threshold: f32, min_bounds: f32) -> Self {
        let params = Self {
            threshold: AtomicFloat::new(DEFAULT_THRESHOLD),
            min_bounds: AtomicFloat::new(DEFAULT_MIN_BOUNDS),
        };
        params.set_threshold(threshold);
        params.set_min_bounds(min_bounds);
        params
    }

    /// Store a new detection threshold.
    ///
    /// Values outside (0, 1] are kept as given: at or above 1 every scanned
    /// lag passes, at or below 0 none does. Non-finite values are ignored.
    pub fn set_threshold(&self, threshold: f32) {
        if !threshold.is_finite() {
            tracing::warn!("Ignoring non-finite threshold {}", threshold);
            return;
        }
        self.threshold.set(threshold);
    }

    /// Store a new minimum lag bound.
    ///
    /// The value counts samples of lag. It is rounded to the nearest whole
    /// sample and floored at 1. Non-finite values are ignored.
    pub fn set_min_bounds(&self, min_bounds: f32) {
        if !min_bounds.is_finite() {
            tracing::warn!("Ignoring non-finite min bounds {}", min_bounds);
            return;
        }
        self.min_bounds.set(min_bounds.round().max(1.0));
    }

    pub fn threshold(&self) -> f32 {
        self.threshold.get()
    }

    /// Minimum lag as stored (whole samples, ≥ 1).
    pub fn min_bounds(&self) -> f32 {
        self.min_bounds.get()
    }

    pub fn min_lag(&self) -> usize {
        self.min_bounds.get() as usize
    }

    /// Read both parameters once for an analysis call.
    #[inline]
    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot {
            threshold: self.threshold.get(),
            min_lag: self.min_lag(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_defaults() {
        let params = PitchParameters::default();
        assert_eq!(
            params.snapshot(),
            ParameterSnapshot {
                threshold: 0.1,
                min_lag: 20
            }
        );
    }

    #[test]
    fn test_min_bounds_rounding() {
        let params = PitchParameters::default();
        params.set_min_bounds(33.4);
        assert_eq!(params.min_lag(), 33);
        params.set_min_bounds(33.6);
        assert_eq!(params.min_lag(), 34);
        params.set_min_bounds(-5.0);
        assert_eq!(params.min_lag(), 1);
    }

    #[test]
    fn test_out_of_range_threshold_is_kept() {
        let params = PitchParameters::default();
        params.set_threshold(1.5);
        assert_eq!(params.threshold(), 1.5);
        params.set_threshold(-0.2);
        assert_eq!(params.threshold(), -0.2);
    }

    #[test]
    fn test_non_finite_values_ignored() {
        let params = PitchParameters::new(0.2, 40.0);
        params.set_threshold(f32::NAN);
        params.set_min_bounds(f32::INFINITY);
        assert_eq!(params.threshold(), 0.2);
        assert_eq!(params.min_lag(), 40);
    }

    #[test]
    fn test_update_from_control_thread() {
        let params = Arc::new(PitchParameters::default());
        let control = params.clone();

        std::thread::spawn(move || {
            control.set_threshold(0.25);
            control.set_min_bounds(64.0);
        })
        .join()
        .unwrap();

        assert_eq!(
            params.snapshot(),
            ParameterSnapshot {
                threshold: 0.25,
                min_lag: 64
            }
        );
    }
}
