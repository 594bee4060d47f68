//! Difference function over lags.
//!
//! For a block `x` of `N` samples and a fixed anchor `t`:
//!
//! ```text
//! r(t, τ) = Σ_{i=t}^{N-τ-1} x[i]·x[i+τ]
//! d(t, τ) = r(t, 0) + r(t+τ, 0) - 2·r(t, τ)
//! ```
//!
//! The profile holds `d(t, τ)` for every `τ` in `0..=N/2`. It is close to zero
//! where the block lines up with a lagged copy of itself.
//!
//! ## Performance
//!
//! Both energy terms come from one suffix-energy table per block, so the cost
//! is dominated by `r(t, τ)`:
//!
//! - [`DifferenceMethod::Direct`]: O(N × N/2) multiply-adds, no planning.
//! - [`DifferenceMethod::Fft`]: all lags at once via the Wiener-Khinchin
//!   theorem, `r = IFFT(|FFT(x)|²)`, zero-padded so the circular correlation
//!   equals the linear one over the analysed lags. O(N log N).

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Default analysis anchor (first sample of the analysis window).
pub const DEFAULT_ANCHOR: usize = 1;

/// How lagged products are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum DifferenceMethod {
    /// Sum products lag by lag.
    #[default]
    Direct,
    /// FFT-based autocorrelation.
    Fft,
}

/// `r(t, lag)`, summed in `f64`.
pub fn autocorrelation(block: &[f32], t: usize, lag: usize) -> f64 {
    let end = block.len().saturating_sub(lag);
    (t..end)
        .map(|i| block[i] as f64 * block[i + lag] as f64)
        .sum()
}

/// `d(t, lag)` straight from the definition.
pub fn difference(block: &[f32], t: usize, lag: usize) -> f64 {
    autocorrelation(block, t, 0) + autocorrelation(block, t.saturating_add(lag), 0)
        - 2.0 * autocorrelation(block, t, lag)
}

/// Pre-planned FFT autocorrelation for blocks up to a fixed length.
struct FftCorrelator {
    len: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    buffer: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl FftCorrelator {
    fn new(max_block: usize) -> Self {
        // Signal length plus the largest lag (N/2) must fit without wrapping.
        let len = (2 * max_block).next_power_of_two().max(2);

        let mut planner = FftPlanner::<f64>::new();
        let forward = planner.plan_fft_forward(len);
        let inverse = planner.plan_fft_inverse(len);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());

        tracing::debug!("Planned {}-point FFT for blocks up to {}", len, max_block);

        Self {
            len,
            forward,
            inverse,
            buffer: vec![Complex::new(0.0, 0.0); len],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        }
    }

    /// Write `r(t, lag)` for `lag` in `0..out.len()`.
    fn correlate(&mut self, block: &[f32], t: usize, out: &mut [f64]) {
        let window = block.get(t..).unwrap_or(&[]);

        for (slot, &x) in self.buffer.iter_mut().zip(window) {
            *slot = Complex::new(x as f64, 0.0);
        }
        for slot in &mut self.buffer[window.len()..] {
            *slot = Complex::new(0.0, 0.0);
        }

        self.forward
            .process_with_scratch(&mut self.buffer, &mut self.scratch);
        for bin in &mut self.buffer {
            *bin = Complex::new(bin.norm_sqr(), 0.0);
        }
        self.inverse
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        let scale = 1.0 / self.len as f64;
        for (r, bin) in out.iter_mut().zip(&self.buffer) {
            *r = bin.re * scale;
        }
    }
}

/// Builds the raw difference profile for one block.
///
/// Scratch storage is sized for a maximum block length at construction.
/// Longer blocks grow the storage (and re-plan the FFT) once; callers on the
/// audio thread should size the builder for the host's block size up front.
pub struct DifferenceProfileBuilder {
    method: DifferenceMethod,
    anchor: usize,
    capacity: usize,
    lags: usize,
    suffix_energy: Vec<f64>,
    correlation: Vec<f64>,
    profile: Vec<f32>,
    fft: Option<FftCorrelator>,
}

impl DifferenceProfileBuilder {
    pub fn new(max_block: usize, method: DifferenceMethod, anchor: usize) -> Self {
        let mut builder = Self {
            method,
            anchor,
            capacity: 0,
            lags: 0,
            suffix_energy: Vec::new(),
            correlation: Vec::new(),
            profile: Vec::new(),
            fft: None,
        };
        builder.reserve(max_block);
        builder
    }

    pub fn method(&self) -> DifferenceMethod {
        self.method
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Largest block length that can be analysed without allocating.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size scratch storage for blocks of up to `max_block` samples.
    pub fn reserve(&mut self, max_block: usize) {
        if max_block <= self.capacity && !self.profile.is_empty() {
            return;
        }

        let lags = max_block / 2 + 1;
        self.capacity = max_block;
        self.lags = 0;
        self.suffix_energy = vec![0.0; max_block + 1];
        self.correlation = vec![0.0; lags];
        self.profile = vec![0.0; lags];
        self.fft = match self.method {
            DifferenceMethod::Direct => None,
            DifferenceMethod::Fft => Some(FftCorrelator::new(max_block)),
        };
    }

    /// Compute the profile for `block`, returning `maxLag + 1` values.
    pub fn build(&mut self, block: &[f32]) -> &[f32] {
        let n = block.len();
        let max_lag = n / 2;
        if n > self.capacity {
            tracing::debug!(
                "Growing difference scratch from {} to {} samples",
                self.capacity,
                n
            );
            self.reserve(n);
        }

        self.suffix_energy[n] = 0.0;
        for i in (0..n).rev() {
            let x = block[i] as f64;
            self.suffix_energy[i] = self.suffix_energy[i + 1] + x * x;
        }

        let t = self.anchor;
        let correlation = &mut self.correlation[..=max_lag];
        match self.fft.as_mut() {
            Some(fft) => fft.correlate(block, t, correlation),
            None => {
                for (lag, r) in correlation.iter_mut().enumerate() {
                    *r = autocorrelation(block, t, lag);
                }
            }
        }

        // Entries past `n` are stale from longer blocks.
        let energy_at = |i: usize| if i <= n { self.suffix_energy[i] } else { 0.0 };
        let e_anchor = energy_at(t);
        for (lag, d) in self.profile[..=max_lag].iter_mut().enumerate() {
            let lagged = energy_at(t.saturating_add(lag));
            let value = e_anchor + lagged - 2.0 * self.correlation[lag];
            // Rounding can push a perfect match just below zero.
            *d = value.max(0.0) as f32;
        }

        self.lags = max_lag + 1;
        &self.profile[..self.lags]
    }

    /// Profile from the most recent [`build`](Self::build).
    pub fn profile(&self) -> &[f32] {
        &self.profile[..self.lags]
    }
}
