/// Errors that can occur while aggregating metrics
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Sequence needed for the computation is empty
    #[error("Empty {0} sequence")]
    Empty(&'static str),

    /// Duration must be positive to compute a rate
    #[error("Non-positive duration: {0} s")]
    NonPositiveDuration(f64),

    /// Beat count and beat times disagree
    #[error("Beat count {count} does not match {times} beat times")]
    BeatCountMismatch {
        /// Declared number of beats
        count: usize,
        /// Number of beat times
        times: usize,
    },

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
