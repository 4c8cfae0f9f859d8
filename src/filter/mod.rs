//! # Bandpass Conditioner
//!
//! Butterworth bandpass design and causal filtering for ECG conditioning.
//!
//! The passband (10–60 Hz at 360 Hz by default) removes baseline wander and
//! high-frequency noise before peak detection. Filtering is a single forward
//! pass of the recursive difference equation with zero initial state, so the
//! output is delayed but has exactly the input length.
//!
//! ```rust
//! use ecg_analysis::filter::BandpassDesign;
//!
//! let design = BandpassDesign::new(6, 10.0, 60.0, 360.0);
//! let coeffs = design.coefficients()?;
//! assert_eq!(coeffs.feedforward().len(), 13);
//!
//! let filtered = coeffs.apply(&[0.0, 1.0, 0.0, 0.0]);
//! assert_eq!(filtered.len(), 4);
//! # Ok::<(), ecg_analysis::filter::FilterError>(())
//! ```

mod design;
mod error;

pub use error::FilterError;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Transfer-function coefficients of a digital filter.
///
/// Immutable once built; `a[0]` is never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCoefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl FilterCoefficients {
    /// Create coefficients from feedforward `b` and feedback `a` vectors
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Result<Self, FilterError> {
        if b.is_empty() || a.is_empty() {
            return Err(FilterError::InvalidCoefficients(
                "coefficient vectors must not be empty".to_string(),
            ));
        }
        if a[0] == 0.0 || !a[0].is_finite() {
            return Err(FilterError::InvalidCoefficients(format!(
                "leading feedback coefficient must be non-zero, got {}",
                a[0]
            )));
        }
        Ok(Self { b, a })
    }

    /// Feedforward (numerator) coefficients
    pub fn feedforward(&self) -> &[f64] {
        &self.b
    }

    /// Feedback (denominator) coefficients
    pub fn feedback(&self) -> &[f64] {
        &self.a
    }

    /// Run the filter over `input` with zero initial state.
    ///
    /// Transposed direct form II, normalized by `a[0]`.
    pub fn apply(&self, input: &[f64]) -> Vec<f64> {
        let n = self.a.len().max(self.b.len());
        let a0 = self.a[0];
        let b: Vec<f64> = (0..n).map(|i| self.b.get(i).copied().unwrap_or(0.0) / a0).collect();
        let a: Vec<f64> = (0..n).map(|i| self.a.get(i).copied().unwrap_or(0.0) / a0).collect();

        let mut state = vec![0.0; n.saturating_sub(1)];
        let mut output = Vec::with_capacity(input.len());

        for &x in input {
            let y = b[0] * x + state.first().copied().unwrap_or(0.0);
            for i in 0..state.len() {
                let carry = state.get(i + 1).copied().unwrap_or(0.0);
                state[i] = b[i + 1] * x + carry - a[i + 1] * y;
            }
            output.push(y);
        }

        output
    }

    /// Magnitude of the frequency response at `freq_hz`
    pub fn magnitude_at(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / sample_rate;
        let eval = |coeffs: &[f64]| -> Complex64 {
            coeffs
                .iter()
                .enumerate()
                .map(|(k, &c)| Complex64::from_polar(c, -omega * k as f64))
                .sum()
        };
        (eval(&self.b) / eval(&self.a)).norm()
    }

    /// True when every pole lies strictly inside the unit circle.
    ///
    /// Checked with the Jury/Schur-Cohn step-down recursion on `a`.
    pub fn is_stable(&self) -> bool {
        let mut poly: Vec<f64> = self.a.iter().map(|c| c / self.a[0]).collect();
        while poly.len() > 1 {
            let m = poly.len() - 1;
            let k = poly[m];
            if k.abs() >= 1.0 {
                return false;
            }
            let scale = 1.0 - k * k;
            poly = (0..m).map(|i| (poly[i] - k * poly[m - i]) / scale).collect();
        }
        true
    }
}

/// Parameters of a Butterworth bandpass filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandpassDesign {
    /// Prototype order (the bandpass has twice as many poles)
    pub order: usize,
    /// Lower cutoff in Hz
    pub low_hz: f64,
    /// Upper cutoff in Hz
    pub high_hz: f64,
    /// Sample rate in Hz
    pub sample_rate: f64,
}

impl BandpassDesign {
    /// Describe a bandpass filter
    pub fn new(order: usize, low_hz: f64, high_hz: f64, sample_rate: f64) -> Self {
        Self {
            order,
            low_hz,
            high_hz,
            sample_rate,
        }
    }

    /// Half the sample rate
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate
    }

    /// Cutoffs divided by the Nyquist frequency
    pub fn normalized_cutoffs(&self) -> Result<(f64, f64), FilterError> {
        if self.order == 0 {
            return Err(FilterError::InvalidOrder(self.order));
        }
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(FilterError::InvalidSampleRate(self.sample_rate));
        }

        let nyquist = self.nyquist();
        if !(0.0 < self.low_hz && self.low_hz < self.high_hz && self.high_hz < nyquist) {
            return Err(FilterError::InvalidCutoff {
                low: self.low_hz,
                high: self.high_hz,
                nyquist,
            });
        }

        Ok((self.low_hz / nyquist, self.high_hz / nyquist))
    }

    /// Compute the filter coefficients
    pub fn coefficients(&self) -> Result<FilterCoefficients, FilterError> {
        let (low, high) = self.normalized_cutoffs()?;
        let (b, a) = design::butterworth_bandpass(self.order, low, high);
        FilterCoefficients::new(b, a)
    }

    /// Design the filter and run it over `signal`
    pub fn filter(&self, signal: &[f64]) -> Result<Vec<f64>, FilterError> {
        Ok(self.coefficients()?.apply(signal))
    }
}
