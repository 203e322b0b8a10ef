//! Error taxonomy for the analysis pipeline
//!
//! Four hard-error kinds; partial run coverage is never an error, it is
//! surfaced as a reduced sample count plus a WARN log (see `aggregate`).

use thiserror::Error;

/// Errors produced by the extraction, scoring, and aggregation stages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The report text contained no well-formed benchmark blocks
    #[error("no benchmark blocks found in report text")]
    NoBlocksFound,

    /// The scorer was handed an empty record set
    #[error("cannot score an empty record set")]
    InsufficientData,

    /// A normalization series has maximum zero (all values zero), so the
    /// min-max sub-scores are undefined
    #[error("degenerate benchmark data: every record has {series} = 0")]
    DegenerateSeries { series: &'static str },

    /// The aggregator was handed zero runs
    #[error("aggregation requires at least one run")]
    NoRuns,
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
