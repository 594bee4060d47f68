//! Cumulative mean normalized difference (CMNDF).
//!
//! ```text
//! d'(0) = 1
//! d'(τ) = d(τ) · τ / Σ_{k=1}^{τ} d(k)     τ ≥ 1
//! ```
//!
//! Dividing by the running mean makes the profile dimensionless, so a single
//! threshold means the same thing at every lag and every signal level.

/// A normalized profile together with the lags where it is defined.
///
/// `d'(τ)` is undefined while the running sum is still zero (a silent or
/// exactly-constant start of the profile). Since `d(τ) ≥ 0` the running sum
/// never decreases, so the undefined lags always form a prefix `1..first_defined`.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedProfile<'a> {
    values: &'a [f32],
    first_defined: usize,
}

impl<'a> NormalizedProfile<'a> {
    /// Wrap pre-computed values. Lags below `first_defined` (other than 0)
    /// are treated as undefined.
    pub fn new(values: &'a [f32], first_defined: usize) -> Self {
        Self {
            values,
            first_defined: first_defined.max(1),
        }
    }

    /// All values, index = lag. Undefined lags hold 1.0.
    pub fn values(&self) -> &'a [f32] {
        self.values
    }

    /// `d'(lag)`, or `None` if the lag is out of range or undefined.
    pub fn get(&self, lag: usize) -> Option<f32> {
        match lag {
            0 => self.values.first().copied(),
            l if l < self.first_defined => None,
            l => self.values.get(l).copied(),
        }
    }

    /// Smallest lag ≥ 1 with a defined value.
    pub fn first_defined(&self) -> usize {
        self.first_defined
    }

    /// Largest lag in the profile.
    pub fn max_lag(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// True when no lag ≥ 1 is defined (zero-energy profile).
    pub fn is_degenerate(&self) -> bool {
        self.first_defined >= self.values.len()
    }
}

/// Normalize `profile` into `out` and return the first defined lag.
///
/// `out` must be at least as long as `profile`. `profile` must be
/// non-negative.
pub fn cumulative_mean_normalize(profile: &[f32], out: &mut [f32]) -> usize {
    debug_assert!(out.len() >= profile.len());

    let len = profile.len();
    if len == 0 {
        return 1;
    }

    out[0] = 1.0;
    let mut first_defined = len;
    let mut running_sum = 0.0f64;

    for lag in 1..len {
        let d = profile[lag] as f64;
        debug_assert!(d >= 0.0, "difference profile must be non-negative");
        running_sum += d;

        if running_sum > 0.0 {
            out[lag] = (d * lag as f64 / running_sum) as f32;
            if first_defined == len {
                first_defined = lag;
            }
        } else {
            out[lag] = 1.0;
        }
    }

    first_defined
}

/// Owns the normalized-profile scratch buffer.
#[derive(Debug, Clone)]
pub struct CmndfNormalizer {
    normalized: Vec<f32>,
}

impl CmndfNormalizer {
    /// Create a normalizer for profiles of up to `max_lag + 1` values.
    pub fn new(max_lag: usize) -> Self {
        Self {
            normalized: vec![0.0; max_lag + 1],
        }
    }

    pub fn reserve(&mut self, max_lag: usize) {
        if self.normalized.len() < max_lag + 1 {
            self.normalized.resize(max_lag + 1, 0.0);
        }
    }

    pub fn normalize(&mut self, profile: &[f32]) -> NormalizedProfile<'_> {
        self.reserve(profile.len().saturating_sub(1));
        let out = &mut self.normalized[..profile.len()];
        let first_defined = cumulative_mean_normalize(profile, out);
        NormalizedProfile::new(&self.normalized[..profile.len()], first_defined)
    }
}
