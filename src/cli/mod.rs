use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod analyze;
mod batch;
mod check;
mod config;
mod design;

pub use config::Config;

/// ecg-analyze - single-lead ECG summary metrics
#[derive(Parser)]
#[command(name = "ecg-analyze")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one recording and write its JSON summary
    Analyze {
        /// Input CSV recording (time,voltage per row)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output JSON path (defaults to the input path with a .json extension)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Load analysis settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the data-quality report for a recording
    Check {
        /// Input CSV recording
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Load analysis settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Analyze several recordings, one JSON summary each
    Batch {
        /// Input CSV recordings
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving the JSON summaries
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        /// Load analysis settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print Butterworth bandpass coefficients
    Design {
        /// Filter order (defaults to the diagnostic orders 3, 6 and 9)
        #[arg(long)]
        order: Option<usize>,

        /// Lower cutoff (Hz)
        #[arg(long, default_value_t = ecg_analysis::pipeline::DEFAULT_LOW_CUT_HZ)]
        low: f64,

        /// Upper cutoff (Hz)
        #[arg(long, default_value_t = ecg_analysis::pipeline::DEFAULT_HIGH_CUT_HZ)]
        high: f64,

        /// Sample rate (Hz)
        #[arg(long, default_value_t = ecg_analysis::pipeline::DEFAULT_SAMPLE_RATE)]
        rate: f64,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze { input, output, config } => analyze::run(input, output, config),
        Commands::Check { input, config } => check::run(input, config),
        Commands::Batch {
            inputs,
            out_dir,
            config,
        } => batch::run(inputs, out_dir, config),
        Commands::Design { order, low, high, rate } => design::run(order, low, high, rate),
    }
}

/// Exit status for a run halted on an unsafe voltage
pub const SAFETY_HALT_EXIT_CODE: i32 = 2;
