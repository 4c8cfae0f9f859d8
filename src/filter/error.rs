/// Errors that can occur while designing or applying a filter
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Filter order must be at least 1
    #[error("Invalid filter order: {0}")]
    InvalidOrder(usize),

    /// Sample rate must be positive and finite
    #[error("Invalid sampling rate: {0}")]
    InvalidSampleRate(f64),

    /// Cutoffs must satisfy 0 < low < high < nyquist
    #[error("Invalid cutoffs: low {low} Hz, high {high} Hz (nyquist {nyquist} Hz)")]
    InvalidCutoff {
        /// Low cutoff in Hz
        low: f64,
        /// High cutoff in Hz
        high: f64,
        /// Nyquist frequency in Hz
        nyquist: f64,
    },

    /// Coefficient vectors are empty or the leading feedback term is zero
    #[error("Invalid coefficients: {0}")]
    InvalidCoefficients(String),
}
