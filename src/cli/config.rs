//! TOML configuration file support.
//!
//! Every key is optional and overrides the built-in default:
//!
//! ```toml
//! # ecg.toml
//! [analysis]
//! sample_rate = 360.0
//! low_cut_hz = 10.0
//! high_cut_hz = 60.0
//! filter_order = 6
//! voltage_limit = 300.0
//! wide_separation = 250
//! narrow_separation = 120
//! long_recording_secs = 35.0
//! min_preliminary_peaks = 5
//! dense_peak_threshold = 20
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use ecg_analysis::pipeline::AnalysisConfig;
use ecg_analysis::quality::QualityGate;

/// Root configuration structure for ecg.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisOverrides,
}

/// Optional overrides of [`AnalysisConfig`] fields.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisOverrides {
    /// Sample rate (Hz).
    pub sample_rate: Option<f64>,

    /// Lower passband edge (Hz).
    pub low_cut_hz: Option<f64>,

    /// Upper passband edge (Hz).
    pub high_cut_hz: Option<f64>,

    /// Order of the applied bandpass.
    pub filter_order: Option<usize>,

    /// Voltage magnitude treated as unsafe.
    pub voltage_limit: Option<f64>,

    /// Separation for the preliminary pass and sparse recordings (samples).
    pub wide_separation: Option<usize>,

    /// Separation for long, dense recordings (samples).
    pub narrow_separation: Option<usize>,

    /// Duration from which a recording counts as long (s).
    pub long_recording_secs: Option<f64>,

    /// Preliminary peak count that must be exceeded.
    pub min_preliminary_peaks: Option<usize>,

    /// Preliminary peak count from which the filtered signal is used.
    pub dense_peak_threshold: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the file when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Defaults with every present key applied.
    ///
    /// Fails when `voltage_limit` is not finite and positive.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = AnalysisConfig::default();
        let o = &self.analysis;

        if let Some(v) = o.sample_rate {
            config.sample_rate = v;
        }
        if let Some(v) = o.low_cut_hz {
            config.low_cut_hz = v;
        }
        if let Some(v) = o.high_cut_hz {
            config.high_cut_hz = v;
        }
        if let Some(v) = o.filter_order {
            config.filter_order = v;
        }
        if let Some(v) = o.voltage_limit {
            config.voltage_limit = v;
        }
        if let Some(v) = o.wide_separation {
            config.detection.wide_separation = v;
        }
        if let Some(v) = o.narrow_separation {
            config.detection.narrow_separation = v;
        }
        if let Some(v) = o.long_recording_secs {
            config.detection.long_recording_secs = v;
        }
        if let Some(v) = o.min_preliminary_peaks {
            config.detection.min_preliminary_peaks = v;
        }
        if let Some(v) = o.dense_peak_threshold {
            config.detection.dense_peak_threshold = v;
        }

        QualityGate::new(config.voltage_limit).context("Invalid [analysis] voltage_limit")?;
        Ok(config)
    }
}
