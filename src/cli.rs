//! CLI argument parsing for simcheck

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "simcheck")]
#[command(version)]
#[command(about = "Compare machine-tool simulation results against bench measurements", long_about = None)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Load analysis settings from a TOML file (simcheck.toml)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare simulated parameter values against measured ones
    Compare {
        /// Simulation samples (CSV or JSON)
        #[arg(long = "sim", value_name = "FILE")]
        sim: PathBuf,

        /// Measured samples (CSV or JSON)
        #[arg(long = "test", value_name = "FILE")]
        test: PathBuf,

        /// Relative error tolerance in percent (overrides config)
        #[arg(short = 't', long = "tolerance", value_name = "PCT")]
        tolerance: Option<f64>,
    },

    /// Estimate per-parameter linear trends over time-ordered samples
    Trend {
        /// Samples to analyze (CSV or JSON)
        #[arg(short = 'i', long = "input", value_name = "FILE")]
        input: PathBuf,

        /// Number of samples to forecast past the end of each series
        #[arg(long = "forecast", value_name = "N")]
        forecast: Option<usize>,
    },

    /// Summary statistics and histograms per parameter
    Stats {
        /// Samples to analyze (CSV or JSON)
        #[arg(short = 'i', long = "input", value_name = "FILE")]
        input: PathBuf,

        /// Number of histogram bins (overrides config)
        #[arg(short = 'b', long = "bins", value_name = "N")]
        bins: Option<usize>,
    },
}
