use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use ecg_analysis::pipeline::EcgAnalyzer;
use ecg_analysis::report::{default_output_path, JsonFileSink, ReportSink};

use super::{Config, SAFETY_HALT_EXIT_CODE};

/// Analyze one recording and write its summary
pub fn run(input: PathBuf, output: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let output = output.unwrap_or_else(|| default_output_path(&input));
    let analysis_config = Config::load(config.as_deref())?.analysis_config()?;

    info!("ECG Analysis");
    info!("============");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());

    let analyzer = EcgAnalyzer::new(analysis_config);
    let analysis = match analyzer.analyze_file(&input) {
        Ok(analysis) => analysis,
        Err(e) if e.is_safety_halt() => {
            eprintln!("Analysis halted: {}", e);
            std::process::exit(SAFETY_HALT_EXIT_CODE);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to analyze {}", input.display()));
        }
    };

    for repair in &analysis.repairs {
        warn!("Repaired {} in {}", repair, input.display());
    }
    info!("Regime: {}", analysis.regime);

    println!("{}", analysis.summary);

    JsonFileSink::new(&output)
        .write_summary(&analysis.summary)
        .with_context(|| format!("Failed to write summary to {}", output.display()))?;
    println!("Summary written to {}", output.display());

    Ok(())
}
