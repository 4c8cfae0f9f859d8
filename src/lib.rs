//! # ecg-analysis - Single-Lead ECG Summary Metrics
//!
//! `ecg_analysis` turns a single-lead electrocardiogram recording (paired time and
//! voltage samples) into a summary: duration, voltage extremes, beat count, mean
//! heart rate and the time of every detected beat.
//!
//! ## Key Features
//!
//! - **Quality Triage**: Malformed cells (missing markers, non-numeric text, blank
//!   cells) are classified and repaired before analysis. Unsafe voltages halt the run.
//!
//! - **Butterworth Conditioning**: A bilinear-transform Butterworth bandpass removes
//!   baseline wander and high-frequency noise.
//!
//! - **Density-Adaptive Detection**: A preliminary peak count and the recording
//!   length pick which signal to search and how far apart beats must be.
//!
//! - **Stable Report Format**: Summaries serialize to JSON with fixed keys.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecg_analysis::prelude::*;
//!
//! let analyzer = EcgAnalyzer::new(AnalysisConfig::default());
//! let analysis = analyzer.analyze_file("test_data1.csv")?;
//!
//! println!("{}", analysis.summary);
//!
//! let mut sink = JsonFileSink::new("test_data1.json");
//! sink.write_summary(&analysis.summary)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`signal`]: Tokenized raw recordings, CSV loading, validated numeric recordings
//! - [`quality`]: Defect classification, repair strategies and quality reports
//! - [`filter`]: Butterworth bandpass design and causal filtering
//! - [`detect`]: Peak finding and the detection regime table
//! - [`metrics`]: Duration, extremes, heart rate and the summary record
//! - [`report`]: JSON report sinks
//! - [`pipeline`]: The end-to-end analyzer and its configuration
//!
//! ## Input Format
//!
//! Headerless CSV, one sample per row:
//!
//! ```text
//! 0,-0.145
//! 0.003,-0.145
//! 0.006,-0.145
//! ```
//!
//! ## Output Format
//!
//! ```text
//! {"Duration":27.775,"Maximum Lead Voltage":1.05,"Minimum Lead Voltage":-0.68,
//!  "Number of Detected Beats":33,"Average Heart Rate":71,
//!  "Array of Beat Occurances":[0.214,1.028,...]}
//! ```

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod detect;
pub mod filter;
pub mod metrics;
pub mod pipeline;
pub mod quality;
pub mod report;
pub mod signal;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::detect::{BeatDetector, BeatSet, DetectError, DetectionConfig, Regime, SignalSource};
    pub use crate::filter::{BandpassDesign, FilterCoefficients, FilterError};
    pub use crate::metrics::{MetricsError, PatientSummary};
    pub use crate::pipeline::{Analysis, AnalysisConfig, AnalysisError, EcgAnalyzer};
    pub use crate::quality::{Diagnosis, QualityError, QualityGate, QualityReport, RepairStrategy};
    pub use crate::report::{JsonFileSink, JsonSink, ReportError, ReportSink};
    pub use crate::signal::{RawRecording, Recording, SignalError, Token};
}
