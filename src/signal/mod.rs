//! # Signal Module
//!
//! Sample sequences for a single-lead ECG recording.
//!
//! Loading happens in two steps. Every CSV cell is first classified into a
//! [`Token`] (valid number, missing marker, invalid text or blank), giving a
//! [`RawRecording`]. After the quality gate has repaired the raw channels, they
//! are converted into a numeric [`Recording`], which guarantees:
//!
//! - time and voltage have the same, non-zero length
//! - every sample is finite
//! - time never decreases

mod error;
mod loader;
mod token;


pub use error::SignalError;
pub use loader::RawRecording;
pub use token::{Token, BAD_DATA_SENTINEL, MISSING_MARKER};

/// Numeric, index-aligned time and voltage channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    time: Vec<f64>,
    voltage: Vec<f64>,
}

impl Recording {
    /// Create a recording, enforcing the channel invariants
    pub fn new(time: Vec<f64>, voltage: Vec<f64>) -> Result<Self, SignalError> {
        if time.len() != voltage.len() {
            return Err(SignalError::LengthMismatch {
                time: time.len(),
                voltage: voltage.len(),
            });
        }
        if time.is_empty() {
            return Err(SignalError::Empty);
        }
        if let Some(index) = time.iter().position(|t| !t.is_finite()) {
            return Err(SignalError::NonNumeric { axis: "time", index });
        }
        if let Some(index) = voltage.iter().position(|v| !v.is_finite()) {
            return Err(SignalError::NonNumeric { axis: "voltage", index });
        }
        if let Some(index) = (1..time.len()).find(|&i| time[i] < time[i - 1]) {
            return Err(SignalError::NonMonotonicTime {
                index,
                previous: time[index - 1],
                current: time[index],
            });
        }

        Ok(Self { time, voltage })
    }

    /// Time channel in seconds
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Voltage channel
    pub fn voltage(&self) -> &[f64] {
        &self.voltage
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True when there are no samples
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Split into (time, voltage)
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.time, self.voltage)
    }
}
