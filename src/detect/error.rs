/// Errors that can occur during beat detection
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// Too few preliminary peaks to pick a detection regime
    #[error("Insufficient peaks: found {found}, need more than {required}")]
    InsufficientPeaks {
        /// Peaks found on the raw signal
        found: usize,
        /// Count that must be exceeded
        required: usize,
    },

    /// Filtered signal does not line up with the recording
    #[error("Filtered signal length {filtered} does not match recording length {recording}")]
    LengthMismatch {
        /// Recording length
        recording: usize,
        /// Filtered signal length
        filtered: usize,
    },

    /// Peak separation must be at least one sample
    #[error("Invalid peak separation: {0}")]
    InvalidSeparation(usize),
}
