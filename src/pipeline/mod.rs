//! # Analysis Pipeline
//!
//! [`EcgAnalyzer`] runs one recording through every stage:
//!
//! 1. quality gate (repair or halt)
//! 2. duration and voltage extremes
//! 3. bandpass conditioning
//! 4. beat detection
//! 5. summary assembly
//!
//! ```rust
//! use ecg_analysis::pipeline::{AnalysisConfig, EcgAnalyzer};
//! use ecg_analysis::signal::RawRecording;
//!
//! let time: Vec<f64> = (0..4000).map(|i| i as f64 / 360.0).collect();
//! let voltage: Vec<f64> = (0..4000).map(|i| if i % 300 == 150 { 1.0 } else { 0.0 }).collect();
//! let raw = RawRecording::from_samples(&time, &voltage)?;
//!
//! let analysis = EcgAnalyzer::new(AnalysisConfig::default()).analyze(raw)?;
//! assert_eq!(analysis.summary.beat_count(), 13);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;


pub use config::{
    AnalysisConfig, DEFAULT_FILTER_ORDER, DEFAULT_HIGH_CUT_HZ, DEFAULT_LOW_CUT_HZ, DEFAULT_SAMPLE_RATE,
    DIAGNOSTIC_ORDERS,
};
pub use error::AnalysisError;

use log::{debug, info};
use std::path::Path;

use crate::detect::{BeatDetector, Regime};
use crate::metrics::{self, MetricsError, PatientSummary};
use crate::quality::{Diagnosis, QualityGate};
use crate::signal::RawRecording;

/// Result of analyzing one recording
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Summary record
    pub summary: PatientSummary,
    /// Repairs the quality gate applied, in order
    pub repairs: Vec<Diagnosis>,
    /// Detection regime used
    pub regime: Regime,
    /// Peaks found by the preliminary pass
    pub preliminary_peaks: usize,
}

/// Single-recording ECG analyzer
#[derive(Debug, Clone, Default)]
pub struct EcgAnalyzer {
    config: AnalysisConfig,
}

impl EcgAnalyzer {
    /// Create an analyzer
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load a CSV recording and analyze it
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<Analysis, AnalysisError> {
        let path = path.as_ref();
        info!("Starting new analysis of {}", path.display());
        let raw = RawRecording::from_csv_file(path)?;
        self.analyze(raw)
    }

    /// Analyze a raw recording
    pub fn analyze(&self, raw: RawRecording) -> Result<Analysis, AnalysisError> {
        let screened = QualityGate::new(self.config.voltage_limit)?.screen(raw)?;
        let recording = screened.recording;

        info!("Calculating signal duration.");
        let duration = metrics::duration(recording.time())?;
        if duration.is_nan() || duration <= 0.0 {
            return Err(MetricsError::NonPositiveDuration(duration).into());
        }

        info!("Finding voltage extremes.");
        let extremes = metrics::voltage_extremes(recording.voltage())?;

        for &order in &self.config.diagnostic_orders {
            let coeffs = self.config.bandpass_of_order(order).coefficients()?;
            debug!(
                "Order {} bandpass: {} coefficients, stable: {}",
                order,
                coeffs.feedforward().len(),
                coeffs.is_stable()
            );
        }

        info!("Filtering signal.");
        let filtered = self.config.bandpass().filter(recording.voltage())?;

        info!("Detecting beats.");
        let detection = BeatDetector::new(self.config.detection).detect(&recording, &filtered)?;

        info!("Calculating average heart rate.");
        let summary = PatientSummary::assemble(duration, extremes, detection.beats.times)?;
        info!(
            "Analysis complete: {} beats, {} bpm",
            summary.beat_count(),
            summary.mean_heart_rate()
        );

        Ok(Analysis {
            summary,
            repairs: screened.repairs,
            regime: detection.regime,
            preliminary_peaks: detection.preliminary_peaks,
        })
    }
}
