//! Benchmark report extraction
//!
//! Converts the raw text emitted by the timing harness into per-test-case
//! metric records. A report is a sequence of self-delimited blocks:
//!
//! ```text
//! === Pure Computation ===
//! Min: 1000, Max: 1200, Avg: 1050
//! Jitter: 200, Std Dev: 42.5
//! 95th percentile: 1150, 99th percentile: 1190
//! Coefficient of Variation: 0.0405
//! ```
//!
//! Field order is fixed; whitespace between lines is insignificant.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// The six canonical test cases produced by the timing harness, in report
/// order. This list drives row ordering in the emitters; the extractor
/// itself keys records by the name exactly as captured.
pub const CANONICAL_TEST_CASES: [&str; 6] = [
    "Pure Computation",
    "Regular Branch Pattern",
    "Pseudo-Random Branch Pattern",
    "Nested Branch Pattern",
    "Memory + Branch Mixed",
    "High-Frequency Branches",
];

/// Latency/jitter metrics for one test case within a single run
///
/// Values are recovered verbatim from the report text. Cycle counts are
/// integers; `std_dev` and `cv` are floats. `jitter` is max - min as
/// reported by the harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Minimum observed cycle count
    pub min: u64,
    /// Maximum observed cycle count
    pub max: u64,
    /// Average cycle count
    pub avg: u64,
    /// Max - min, in cycles
    pub jitter: u64,
    /// Standard deviation of the sample, in cycles
    pub std_dev: f64,
    /// 95th percentile cycle count
    pub p95: u64,
    /// 99th percentile cycle count
    pub p99: u64,
    /// Coefficient of variation (std_dev / avg)
    pub cv: f64,
}

impl MetricRecord {
    /// Worst-case inflation: max / avg
    pub fn max_avg_ratio(&self) -> f64 {
        self.max as f64 / self.avg as f64
    }

    /// Tail inflation: p99 / avg
    pub fn p99_avg_ratio(&self) -> f64 {
        self.p99 as f64 / self.avg as f64
    }

    /// Value of one metric field as f64 (the aggregator's access path)
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Min => self.min as f64,
            Metric::Max => self.max as f64,
            Metric::Avg => self.avg as f64,
            Metric::Jitter => self.jitter as f64,
            Metric::StdDev => self.std_dev,
            Metric::P95 => self.p95 as f64,
            Metric::P99 => self.p99 as f64,
            Metric::Cv => self.cv,
        }
    }
}

/// The eight metric fields of a `MetricRecord`, used as the per-metric join
/// key across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Min,
    Max,
    Avg,
    Jitter,
    StdDev,
    P95,
    P99,
    Cv,
}

impl Metric {
    /// All metrics, in record field order
    pub const ALL: [Metric; 8] = [
        Metric::Min,
        Metric::Max,
        Metric::Avg,
        Metric::Jitter,
        Metric::StdDev,
        Metric::P95,
        Metric::P99,
        Metric::Cv,
    ];

    /// Column label used by the emitters
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Min => "min",
            Metric::Max => "max",
            Metric::Avg => "avg",
            Metric::Jitter => "jitter",
            Metric::StdDev => "std_dev",
            Metric::P95 => "p95",
            Metric::P99 => "p99",
            Metric::Cv => "cv",
        }
    }
}

fn block_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex::Regex::new(
            r"=== (.+?) ===\s+Min: (\d+), Max: (\d+), Avg: (\d+)\s+Jitter: (\d+), Std Dev: ([\d.]+)\s+95th percentile: (\d+), 99th percentile: (\d+)\s+Coefficient of Variation: ([\d.]+)",
        )
        .expect("block pattern is a valid regex")
    })
}

/// Extract all well-formed metric blocks from report text
///
/// Blocks with malformed numeric fields are skipped without creating a
/// partial record. If the same test case appears in multiple blocks the
/// later block wins; each overwrite is logged at WARN so a harness that
/// re-emits a test case mid-report is visible. An empty result means no
/// block matched; callers treat that as `AnalysisError::NoBlocksFound`.
pub fn extract_records(text: &str) -> HashMap<String, MetricRecord> {
    let mut records = HashMap::new();

    for caps in block_pattern().captures_iter(text) {
        let name = caps[1].to_string();
        let Some(record) = record_from_captures(&caps) else {
            tracing::debug!(test_case = %name, "skipping block with malformed numeric field");
            continue;
        };
        if records.insert(name.clone(), record).is_some() {
            tracing::warn!(
                test_case = %name,
                "duplicate benchmark block, keeping the later one"
            );
        }
    }

    records
}

fn record_from_captures(caps: &regex::Captures<'_>) -> Option<MetricRecord> {
    Some(MetricRecord {
        min: caps[2].parse().ok()?,
        max: caps[3].parse().ok()?,
        avg: caps[4].parse().ok()?,
        jitter: caps[5].parse().ok()?,
        std_dev: caps[6].parse().ok()?,
        p95: caps[7].parse().ok()?,
        p99: caps[8].parse().ok()?,
        cv: caps[9].parse().ok()?,
    })
}
