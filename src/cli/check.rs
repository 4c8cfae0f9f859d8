use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use ecg_analysis::quality::QualityGate;
use ecg_analysis::signal::RawRecording;

use super::Config;

/// Print the quality report for a recording
pub fn run(input: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let analysis_config = Config::load(config.as_deref())?.analysis_config()?;

    info!("ECG Quality Check");
    info!("File: {}", input.display());

    let raw = RawRecording::from_csv_file(&input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let report = QualityGate::new(analysis_config.voltage_limit)?.inspect(&raw, input.display().to_string());

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
