//! Digital Butterworth bandpass design.
//!
//! Analog prototype poles are moved to the band with the lowpass-to-bandpass
//! transform, mapped to the z-plane with the bilinear transform, and expanded
//! into transfer-function polynomials. Frequencies are normalized so that the
//! Nyquist frequency is 1.

use num_complex::Complex64;
use std::f64::consts::PI;

/// Normalized sample rate used during design (Nyquist = 1).
const DESIGN_FS: f64 = 2.0;

/// Zeros, poles and gain of a filter.
#[derive(Debug, Clone)]
struct Zpk {
    zeros: Vec<Complex64>,
    poles: Vec<Complex64>,
    gain: f64,
}

impl Zpk {
    /// Excess of poles over zeros
    fn degree(&self) -> usize {
        self.poles.len() - self.zeros.len()
    }
}

/// Analog Butterworth lowpass prototype with unit cutoff.
fn butterworth_prototype(order: usize) -> Zpk {
    let n = order as f64;
    let poles = (0..order)
        .map(|k| {
            let m = (2 * k) as f64 - n + 1.0;
            -Complex64::from_polar(1.0, PI * m / (2.0 * n))
        })
        .collect();

    Zpk {
        zeros: Vec::new(),
        poles,
        gain: 1.0,
    }
}

/// Lowpass-to-bandpass transform around `center` with width `bandwidth` (rad/s).
fn lowpass_to_bandpass(proto: Zpk, center: f64, bandwidth: f64) -> Zpk {
    let degree = proto.degree();
    let wo2 = Complex64::new(center * center, 0.0);

    let split = |roots: &[Complex64]| -> Vec<Complex64> {
        let scaled: Vec<Complex64> = roots.iter().map(|&r| r * (bandwidth / 2.0)).collect();
        let upper = scaled.iter().map(|&r| r + (r * r - wo2).sqrt());
        let lower = scaled.iter().map(|&r| r - (r * r - wo2).sqrt());
        upper.chain(lower).collect()
    };

    let mut zeros = split(&proto.zeros);
    zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));

    Zpk {
        zeros,
        poles: split(&proto.poles),
        gain: proto.gain * bandwidth.powi(degree as i32),
    }
}

/// Bilinear transform of an analog zpk system at sample rate `fs`.
fn bilinear(analog: Zpk, fs: f64) -> Zpk {
    let degree = analog.degree();
    let fs2 = Complex64::new(2.0 * fs, 0.0);

    let map = |&r: &Complex64| (fs2 + r) / (fs2 - r);

    let mut zeros: Vec<Complex64> = analog.zeros.iter().map(map).collect();
    zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(degree));

    let num: Complex64 = analog.zeros.iter().map(|&z| fs2 - z).product();
    let den: Complex64 = analog.poles.iter().map(|&p| fs2 - p).product();

    Zpk {
        zeros,
        poles: analog.poles.iter().map(map).collect(),
        gain: analog.gain * (num / den).re,
    }
}

/// Expand roots into monic polynomial coefficients, highest power first.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for root in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= *root * prev;
        }
    }
    coeffs
}

/// Design a digital Butterworth bandpass.
///
/// `low` and `high` are normalized to Nyquist (`0 < low < high < 1`); the caller
/// validates them. Returns `(b, a)` with `2 * order + 1` coefficients each.
pub(super) fn butterworth_bandpass(order: usize, low: f64, high: f64) -> (Vec<f64>, Vec<f64>) {
    // pre-warp band edges
    let w1 = 2.0 * DESIGN_FS * (PI * low / DESIGN_FS).tan();
    let w2 = 2.0 * DESIGN_FS * (PI * high / DESIGN_FS).tan();

    let analog = lowpass_to_bandpass(butterworth_prototype(order), (w1 * w2).sqrt(), w2 - w1);
    let digital = bilinear(analog, DESIGN_FS);

    let b = poly(&digital.zeros).iter().map(|c| c.re * digital.gain).collect();
    let a = poly(&digital.poles).iter().map(|c| c.re).collect();

    (b, a)
}
