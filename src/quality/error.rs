use crate::signal::SignalError;

/// Errors raised by the quality gate
#[derive(Debug, thiserror::Error)]
pub enum QualityError {
    /// Voltage beyond the safe limit; the run must stop
    #[error("Voltage {value} at row {index} exceeds the {limit} limit, stop measuring")]
    VoltageOverflow {
        /// Row index of the first offending sample
        index: usize,
        /// Offending voltage
        value: f64,
        /// Configured voltage limit
        limit: f64,
    },

    /// Safety limit that cannot gate anything
    #[error("Voltage limit must be finite and positive, got {0}")]
    InvalidVoltageLimit(f64),

    /// Missing values cannot be interpolated without at least one valid sample
    #[error("Cannot interpolate {axis} channel: no valid samples")]
    NoValidSamples {
        /// Channel name ("time" or "voltage")
        axis: &'static str,
    },

    /// Repaired channels do not form a valid recording
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),
}
