//! # Metrics Aggregator
//!
//! Duration, voltage extremes, mean heart rate and the per-recording
//! [`PatientSummary`].

mod error;

pub use error::MetricsError;

use serde::{Deserialize, Serialize};

/// Elapsed time between the first and last sample
pub fn duration(time: &[f64]) -> Result<f64, MetricsError> {
    match (time.first(), time.last()) {
        (Some(first), Some(last)) => Ok(last - first),
        _ => Err(MetricsError::Empty("time")),
    }
}

/// Maximum and minimum voltage, in that order
pub fn voltage_extremes(voltage: &[f64]) -> Result<(f64, f64), MetricsError> {
    let (&first, rest) = voltage.split_first().ok_or(MetricsError::Empty("voltage"))?;
    Ok(rest
        .iter()
        .fold((first, first), |(max, min), &v| (max.max(v), min.min(v))))
}

/// Mean heart rate in beats per minute, rounded half-up
pub fn mean_heart_rate(duration: f64, beats: usize) -> Result<u32, MetricsError> {
    if duration.is_nan() || duration <= 0.0 {
        return Err(MetricsError::NonPositiveDuration(duration));
    }
    Ok((beats as f64 * 60.0 / duration).round() as u32)
}

/// Summary of one analyzed recording
///
/// Serialized with the keys used by existing consumers of the report format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    #[serde(rename = "Duration")]
    duration: f64,
    #[serde(rename = "Maximum Lead Voltage")]
    max_voltage: f64,
    #[serde(rename = "Minimum Lead Voltage")]
    min_voltage: f64,
    #[serde(rename = "Number of Detected Beats")]
    beat_count: usize,
    #[serde(rename = "Average Heart Rate")]
    mean_heart_rate: u32,
    #[serde(rename = "Array of Beat Occurances")]
    beat_times: Vec<f64>,
}

impl PatientSummary {
    /// Build a summary, computing the mean heart rate from the beat count
    pub fn assemble(
        duration: f64,
        (max_voltage, min_voltage): (f64, f64),
        beat_times: Vec<f64>,
    ) -> Result<Self, MetricsError> {
        let beat_count = beat_times.len();
        let mean_heart_rate = mean_heart_rate(duration, beat_count)?;

        Ok(Self {
            duration,
            max_voltage,
            min_voltage,
            beat_count,
            mean_heart_rate,
            beat_times,
        })
    }

    /// Build a summary from already computed fields
    pub fn from_parts(
        duration: f64,
        max_voltage: f64,
        min_voltage: f64,
        beat_count: usize,
        mean_heart_rate: u32,
        beat_times: Vec<f64>,
    ) -> Result<Self, MetricsError> {
        if beat_count != beat_times.len() {
            return Err(MetricsError::BeatCountMismatch {
                count: beat_count,
                times: beat_times.len(),
            });
        }
        Ok(Self {
            duration,
            max_voltage,
            min_voltage,
            beat_count,
            mean_heart_rate,
            beat_times,
        })
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Maximum lead voltage
    pub fn max_voltage(&self) -> f64 {
        self.max_voltage
    }

    /// Minimum lead voltage
    pub fn min_voltage(&self) -> f64 {
        self.min_voltage
    }

    /// Number of detected beats
    pub fn beat_count(&self) -> usize {
        self.beat_count
    }

    /// Mean heart rate (bpm)
    pub fn mean_heart_rate(&self) -> u32 {
        self.mean_heart_rate
    }

    /// Beat time offsets (s)
    pub fn beat_times(&self) -> &[f64] {
        &self.beat_times
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, MetricsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a summary from JSON
    pub fn from_json(json: &str) -> Result<Self, MetricsError> {
        let summary: Self = serde_json::from_str(json)?;
        if summary.beat_count != summary.beat_times.len() {
            return Err(MetricsError::BeatCountMismatch {
                count: summary.beat_count,
                times: summary.beat_times.len(),
            });
        }
        Ok(summary)
    }
}

impl std::fmt::Display for PatientSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Duration:           {:.3} s", self.duration)?;
        writeln!(f, "Max lead voltage:   {}", self.max_voltage)?;
        writeln!(f, "Min lead voltage:   {}", self.min_voltage)?;
        writeln!(f, "Detected beats:     {}", self.beat_count)?;
        write!(f, "Average heart rate: {} bpm", self.mean_heart_rate)
    }
}
