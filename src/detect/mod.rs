//! # Beat Detector
//!
//! Density-adaptive peak picking.
//!
//! A preliminary pass counts peaks on the raw voltage with the wide separation.
//! That count and the recording duration select a [`Regime`]: which signal to
//! search (raw or bandpassed) and how far apart beats must be. The second pass
//! under that regime yields the final [`BeatSet`].
//!
//! | Preliminary peaks `p` | Duration | Signal | Separation |
//! |---|---|---|---|
//! | `p <= 5` | any | error | - |
//! | `5 < p < 20` | any | raw | wide (250) |
//! | `p >= 20` | `< 35 s` | filtered | wide (250) |
//! | `p >= 20` | `>= 35 s` | filtered | narrow (120) |

mod error;
mod peaks;

pub use error::DetectError;
pub use peaks::{find_peaks, local_maxima};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::signal::Recording;

/// Default separation used for the preliminary pass and sparse recordings
pub const DEFAULT_WIDE_SEPARATION: usize = 250;

/// Default separation for long, dense recordings
pub const DEFAULT_NARROW_SEPARATION: usize = 120;

/// Default duration (s) from which a recording counts as long
pub const DEFAULT_LONG_RECORDING_SECS: f64 = 35.0;

/// Default number of preliminary peaks that must be exceeded
pub const DEFAULT_MIN_PRELIMINARY_PEAKS: usize = 5;

/// Default preliminary peak count from which the filtered signal is used
pub const DEFAULT_DENSE_PEAK_THRESHOLD: usize = 20;

/// Which voltage sequence a detection pass searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalSource {
    /// Unfiltered voltage
    Raw,
    /// Bandpassed voltage
    Filtered,
}

impl fmt::Display for SignalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalSource::Raw => f.write_str("raw"),
            SignalSource::Filtered => f.write_str("filtered"),
        }
    }
}

/// Signal choice and minimum peak spacing for the final detection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Regime {
    /// Signal to search
    pub source: SignalSource,
    /// Minimum spacing between beats, in samples
    pub separation: usize,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} signal, {} sample separation", self.source, self.separation)
    }
}

/// Thresholds of the regime table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Separation for the preliminary pass and sparse or short recordings
    pub wide_separation: usize,
    /// Separation for long, dense recordings
    pub narrow_separation: usize,
    /// Duration (s) from which a recording counts as long
    pub long_recording_secs: f64,
    /// Preliminary peak count that must be exceeded
    pub min_preliminary_peaks: usize,
    /// Preliminary peak count from which the filtered signal is used
    pub dense_peak_threshold: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            wide_separation: DEFAULT_WIDE_SEPARATION,
            narrow_separation: DEFAULT_NARROW_SEPARATION,
            long_recording_secs: DEFAULT_LONG_RECORDING_SECS,
            min_preliminary_peaks: DEFAULT_MIN_PRELIMINARY_PEAKS,
            dense_peak_threshold: DEFAULT_DENSE_PEAK_THRESHOLD,
        }
    }
}

impl DetectionConfig {
    /// Pick the regime for `peaks` preliminary peaks over `duration` seconds
    pub fn select_regime(&self, peaks: usize, duration: f64) -> Result<Regime, DetectError> {
        if peaks <= self.min_preliminary_peaks {
            return Err(DetectError::InsufficientPeaks {
                found: peaks,
                required: self.min_preliminary_peaks,
            });
        }

        let regime = if peaks < self.dense_peak_threshold {
            Regime {
                source: SignalSource::Raw,
                separation: self.wide_separation,
            }
        } else if duration < self.long_recording_secs {
            Regime {
                source: SignalSource::Filtered,
                separation: self.wide_separation,
            }
        } else {
            Regime {
                source: SignalSource::Filtered,
                separation: self.narrow_separation,
            }
        };

        Ok(regime)
    }

    fn validate(&self) -> Result<(), DetectError> {
        for separation in [self.wide_separation, self.narrow_separation] {
            if separation == 0 {
                return Err(DetectError::InvalidSeparation(separation));
            }
        }
        Ok(())
    }
}

/// Detected beats, ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatSet {
    /// Beat time offsets (s)
    pub times: Vec<f64>,
    /// Sample indices of the beats
    pub indices: Vec<usize>,
}

impl BeatSet {
    /// Build a beat set from sample indices into `time`
    pub fn from_indices(time: &[f64], indices: Vec<usize>) -> Self {
        let times = indices.iter().filter_map(|&i| time.get(i).copied()).collect();
        Self { times, indices }
    }

    /// Number of beats
    pub fn count(&self) -> usize {
        self.indices.len()
    }

    /// True when no beat was found
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Outcome of a detection run
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Regime used for the final pass
    pub regime: Regime,
    /// Peaks found by the preliminary pass
    pub preliminary_peaks: usize,
    /// Final beats
    pub beats: BeatSet,
}

/// Runs the two-pass detection
#[derive(Debug, Clone, Copy, Default)]
pub struct BeatDetector {
    config: DetectionConfig,
}

impl BeatDetector {
    /// Create a detector with the given thresholds
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use
    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect beats in `recording`, using `filtered` when the regime asks for it
    pub fn detect(&self, recording: &Recording, filtered: &[f64]) -> Result<Detection, DetectError> {
        self.config.validate()?;
        if filtered.len() != recording.len() {
            return Err(DetectError::LengthMismatch {
                recording: recording.len(),
                filtered: filtered.len(),
            });
        }

        let time = recording.time();
        let duration = match (time.first(), time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        };

        let preliminary_peaks = find_peaks(recording.voltage(), self.config.wide_separation).len();
        debug!("Preliminary pass: {} peaks over {:.3} s", preliminary_peaks, duration);

        let regime = self.config.select_regime(preliminary_peaks, duration)?;
        let signal = match regime.source {
            SignalSource::Raw => recording.voltage(),
            SignalSource::Filtered => filtered,
        };

        let indices = find_peaks(signal, regime.separation);
        let beats = BeatSet::from_indices(time, indices);
        info!("Detected {} beats ({})", beats.count(), regime);

        Ok(Detection {
            regime,
            preliminary_peaks,
            beats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regime(source: SignalSource, separation: usize) -> Regime {
        Regime { source, separation }
    }

    #[test]
    fn test_regime_table() {
        let config = DetectionConfig::default();

        assert_eq!(config.select_regime(6, 13.9).unwrap(), regime(SignalSource::Raw, 250));
        assert_eq!(config.select_regime(19, 34.9).unwrap(), regime(SignalSource::Raw, 250));
        assert_eq!(config.select_regime(20, 34.9).unwrap(), regime(SignalSource::Filtered, 250));
        assert_eq!(config.select_regime(20, 35.0).unwrap(), regime(SignalSource::Filtered, 120));
        assert_eq!(config.select_regime(80, 60.0).unwrap(), regime(SignalSource::Filtered, 120));
    }

    #[test]
    fn test_sparse_long_recording_uses_raw() {
        let config = DetectionConfig::default();
        assert_eq!(config.select_regime(10, 60.0).unwrap(), regime(SignalSource::Raw, 250));
    }

    #[test]
    fn test_too_few_peaks() {
        let config = DetectionConfig::default();
        for p in 0..=5 {
            assert!(matches!(
                config.select_regime(p, 20.0),
                Err(DetectError::InsufficientPeaks { found, required: 5 }) if found == p
            ));
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let config = DetectionConfig {
            wide_separation: 100,
            narrow_separation: 40,
            long_recording_secs: 10.0,
            min_preliminary_peaks: 1,
            dense_peak_threshold: 4,
        };
        assert_eq!(config.select_regime(2, 5.0).unwrap(), regime(SignalSource::Raw, 100));
        assert_eq!(config.select_regime(4, 5.0).unwrap(), regime(SignalSource::Filtered, 100));
        assert_eq!(config.select_regime(4, 10.0).unwrap(), regime(SignalSource::Filtered, 40));
    }

    #[test]
    fn test_beat_set_times_follow_indices() {
        let time = [0.0, 0.5, 1.0, 1.5, 2.0];
        let beats = BeatSet::from_indices(&time, vec![1, 3]);
        assert_eq!(beats.times, vec![0.5, 1.5]);
        assert_eq!(beats.count(), 2);
    }

    #[test]
    fn test_length_mismatch() {
        let recording = Recording::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap();
        let err = BeatDetector::default().detect(&recording, &[0.0]).unwrap_err();
        assert!(matches!(err, DetectError::LengthMismatch { recording: 3, filtered: 1 }));
    }

    #[test]
    fn test_zero_separation_rejected() {
        let recording = Recording::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap();
        let detector = BeatDetector::new(DetectionConfig {
            narrow_separation: 0,
            ..DetectionConfig::default()
        });
        let err = detector.detect(&recording, &[0.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, DetectError::InvalidSeparation(0)));
    }

    #[test]
    fn test_sparse_recording_detects_on_raw() {
        // 19 pulses, 270 samples apart, at 360 Hz
        let n = 5000;
        let time: Vec<f64> = (0..n).map(|i| i as f64 / 360.0).collect();
        let mut voltage = vec![0.0; n];
        let apexes: Vec<usize> = (0..19).map(|k| 15 + 270 * k).collect();
        for &apex in &apexes {
            voltage[apex - 1] = 0.5;
            voltage[apex] = 1.0;
            voltage[apex + 1] = 0.5;
        }
        let recording = Recording::new(time.clone(), voltage).unwrap();
        let filtered = vec![0.0; n];

        let detection = BeatDetector::default().detect(&recording, &filtered).unwrap();

        assert_eq!(detection.preliminary_peaks, 19);
        assert_eq!(detection.regime, regime(SignalSource::Raw, 250));
        assert_eq!(detection.beats.indices, apexes);
        let expected_times: Vec<f64> = apexes.iter().map(|&i| time[i]).collect();
        assert_eq!(detection.beats.times, expected_times);
    }

    #[test]
    fn test_dense_recording_detects_on_filtered() {
        // 25 raw pulses trigger the filtered regime; the filtered signal has its own peaks
        let n = 9000;
        let time: Vec<f64> = (0..n).map(|i| i as f64 / 360.0).collect();
        let mut voltage = vec![0.0; n];
        for k in 0..25 {
            voltage[100 + 300 * k] = 1.0;
        }
        let mut filtered = vec![0.0; n];
        for k in 0..10 {
            filtered[200 + 800 * k] = 2.0;
        }
        let recording = Recording::new(time, voltage).unwrap();

        let detection = BeatDetector::default().detect(&recording, &filtered).unwrap();

        assert_eq!(detection.preliminary_peaks, 25);
        assert_eq!(detection.regime, regime(SignalSource::Filtered, 250));
        assert_eq!(detection.beats.count(), 10);
        assert_eq!(detection.beats.indices[0], 200);
    }

    #[test]
    fn test_flat_recording_has_insufficient_peaks() {
        let n = 1000;
        let time: Vec<f64> = (0..n).map(|i| i as f64 / 360.0).collect();
        let recording = Recording::new(time, vec![0.1; n]).unwrap();
        let err = BeatDetector::default().detect(&recording, &vec![0.0; n]).unwrap_err();
        assert!(matches!(err, DetectError::InsufficientPeaks { found: 0, .. }));
    }
}
