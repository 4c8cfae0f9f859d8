use anyhow::{Context, Result};
use log::{error, info};
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use ecg_analysis::pipeline::{AnalysisError, EcgAnalyzer};
use ecg_analysis::report::{JsonFileSink, ReportError, ReportSink};

use super::Config;

/// Per-file failure in a batch run
#[derive(Debug, thiserror::Error)]
enum BatchError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Destination of the summary for `input` inside `out_dir`
fn summary_path(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    out_dir.join(format!("{}.json", stem))
}

fn analyze_one(analyzer: &EcgAnalyzer, input: &Path, out_dir: &Path) -> Result<PathBuf, BatchError> {
    let analysis = analyzer.analyze_file(input)?;
    let output = summary_path(input, out_dir);
    JsonFileSink::new(&output).write_summary(&analysis.summary)?;
    Ok(output)
}

/// Analyze each recording independently
pub fn run(inputs: Vec<PathBuf>, out_dir: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let analyzer = EcgAnalyzer::new(Config::load(config.as_deref())?.analysis_config()?);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    info!("Analyzing {} recordings into {}", inputs.len(), out_dir.display());

    #[cfg(feature = "parallel")]
    let results: Vec<_> = inputs
        .par_iter()
        .map(|input| analyze_one(&analyzer, input, &out_dir))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = inputs
        .iter()
        .map(|input| analyze_one(&analyzer, input, &out_dir))
        .collect();

    let mut failed = 0;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(output) => println!("[OK]   {} -> {}", input.display(), output.display()),
            Err(e) => {
                failed += 1;
                error!("{}: {}", input.display(), e);
                println!("[FAIL] {}: {}", input.display(), e);
            }
        }
    }

    println!("{} of {} recordings analyzed", inputs.len() - failed, inputs.len());

    if failed > 0 {
        anyhow::bail!("{} recordings failed", failed);
    }
    Ok(())
}
