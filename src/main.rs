//! # ECG Analyzer
//!
//! Command-line front end for single-lead ECG summary analysis.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze one recording, writing test_data1.json next to it
//! ecg-analyze analyze test_data1.csv
//!
//! # Inspect data quality without analyzing
//! ecg-analyze check test_data1.csv
//!
//! # Analyze many recordings
//! ecg-analyze batch data/*.csv --out-dir summaries
//!
//! # Show the bandpass coefficients
//! ecg-analyze design --order 6
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
