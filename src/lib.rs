//! Tasar - Real-time fitness analyzer for cycle-count benchmark reports
//!
//! This library parses the textual reports produced by the timing harness,
//! derives a normalized composite real-time score per test case, and
//! aggregates per-run statistics across independent runs with confidence
//! intervals.
//!
//! Scores are min-max normalized against the same run's worst performer:
//! they rank test cases within one report and are not comparable across
//! reports or machines.

pub mod aggregate;
pub mod cli;
pub mod csv_output;
pub mod error;
pub mod experiment;
pub mod html_output;
pub mod json_output;
pub mod platform;
pub mod report;
pub mod score;
