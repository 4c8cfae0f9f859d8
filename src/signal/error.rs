/// Errors that can occur while loading or assembling a recording
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// I/O error reading a recording file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The recording holds no samples
    #[error("Recording contains no samples")]
    Empty,

    /// Time and voltage channels differ in length
    #[error("Channel length mismatch: {time} time samples, {voltage} voltage samples")]
    LengthMismatch {
        /// Number of time samples
        time: usize,
        /// Number of voltage samples
        voltage: usize,
    },

    /// A channel still holds a token that is not a finite number
    #[error("Non-numeric {axis} sample at row {index}")]
    NonNumeric {
        /// Channel name ("time" or "voltage")
        axis: &'static str,
        /// Row index of the offending sample
        index: usize,
    },

    /// Time values go backwards
    #[error("Time decreases at row {index}: {previous} -> {current}")]
    NonMonotonicTime {
        /// Row index where time decreased
        index: usize,
        /// Time value at the previous row
        previous: f64,
        /// Time value at this row
        current: f64,
    },
}
