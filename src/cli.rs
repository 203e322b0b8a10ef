//! CLI argument parsing for Tasar

use crate::aggregate::CiMethod;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the single-run analysis file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// CSV for spreadsheet analysis (default)
    Csv,
    /// JSON for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "tasar")]
#[command(version)]
#[command(about = "Real-time fitness analyzer for cycle-count benchmark reports", long_about = None)]
pub struct Cli {
    /// Benchmark report files, one per run. A single file runs the scoring
    /// pipeline; two or more run cross-run aggregation, in the given order.
    #[arg(required = true, value_name = "REPORT")]
    pub inputs: Vec<PathBuf>,

    /// Name of the analysis file written into the experiment directory
    #[arg(short, long, default_value = "rt_analysis.csv", value_name = "FILE")]
    pub output: PathBuf,

    /// Base directory for experiment folders
    #[arg(long = "result-dir", default_value = "result", value_name = "DIR")]
    pub result_dir: PathBuf,

    /// Analysis file format (single-run only; aggregation always emits CSV)
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Skip the HTML report
    #[arg(long = "no-html")]
    pub no_html: bool,

    /// Do not archive raw report files into the experiment directory
    #[arg(long = "no-archive")]
    pub no_archive: bool,

    /// Confidence interval method for aggregation (default: auto-detect)
    #[arg(long = "ci-method", value_enum, value_name = "METHOD")]
    pub ci_method: Option<CiMethod>,

    /// Enable debug logging to stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// CI method to use: the explicit flag, or auto-detection
    pub fn resolve_ci_method(&self) -> CiMethod {
        self.ci_method.unwrap_or_else(CiMethod::detect)
    }
}
