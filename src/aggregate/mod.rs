// Cross-run aggregation of benchmark metrics
//
// Given N independently extracted record sets (one per run), computes
// per-(test case, metric) descriptive statistics and a 95% confidence
// interval on the mean. Uses trueno's SIMD vector primitives for the basic
// moments and aprender's DescriptiveStats for quantiles (R-7, the same
// interpolation the upstream tooling used) - no custom statistics code.
//
// Coverage policy: the test cases of the FIRST run define what gets
// aggregated; test cases appearing only in later runs are excluded. Runs
// that omit a test case contribute no sample, so sample counts are honest
// per test case and sub-total coverage is logged at WARN.

mod ci;

pub use ci::CiMethod;

use crate::error::{AnalysisError, Result};
use crate::report::{Metric, MetricRecord};
use aprender::stats::DescriptiveStats;
use std::collections::HashMap;
use trueno::Vector;

/// Descriptive statistics for one (test case, metric) pair across runs
///
/// `ci` is None when fewer than two runs contributed a sample; callers must
/// distinguish "no CI" from a zero-width CI.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStat {
    pub mean: f32,
    /// Population standard deviation (divide by n, matching trueno)
    pub std: f32,
    pub min: f32,
    pub max: f32,
    pub median: f32,
    pub q25: f32,
    pub q75: f32,
    /// Number of runs that contributed a sample
    pub count: usize,
    /// Two-sided 95% confidence interval on the mean
    pub ci: Option<(f32, f32)>,
}

impl AggregateStat {
    /// Build the stat block from the gathered per-run values
    fn from_samples(samples: &[f32], method: CiMethod) -> Self {
        let v = Vector::from_slice(samples);

        // Samples are never empty here (first-run presence guarantees at
        // least one), so the fallbacks are unreachable in practice
        let mean = v.mean().unwrap_or(0.0);
        let std = v.stddev().unwrap_or(0.0);
        let min = v.min().unwrap_or(0.0);
        let max = v.max().unwrap_or(0.0);

        let stats = DescriptiveStats::new(&v);
        let median = stats.quantile(0.5).unwrap_or(mean);
        let q25 = stats.quantile(0.25).unwrap_or(mean);
        let q75 = stats.quantile(0.75).unwrap_or(mean);

        Self {
            mean,
            std,
            min,
            max,
            median,
            q25,
            q75,
            count: samples.len(),
            ci: method.interval(mean, std, samples.len()),
        }
    }

    /// Cross-run coefficient of variation (std / mean), 0 for a zero mean
    pub fn cv(&self) -> f32 {
        if self.mean == 0.0 {
            0.0
        } else {
            self.std / self.mean
        }
    }
}

/// Aggregate an ordered sequence of runs into per-(test case, metric) stats
///
/// The input order matters only for the coverage policy: the first run's
/// test cases define the output set. Callers should supply runs in a
/// stable order (e.g. lexicographic by filename) for deterministic
/// coverage. Input runs are not mutated.
pub fn aggregate_runs(
    runs: &[HashMap<String, MetricRecord>],
    method: CiMethod,
) -> Result<HashMap<String, HashMap<Metric, AggregateStat>>> {
    let first = runs.first().ok_or(AnalysisError::NoRuns)?;

    let mut aggregated = HashMap::with_capacity(first.len());
    for test_case in first.keys() {
        let present = runs.iter().filter(|run| run.contains_key(test_case)).count();
        if present < runs.len() {
            tracing::warn!(
                test_case = %test_case,
                present,
                total = runs.len(),
                "test case missing from some runs, aggregating reduced sample"
            );
        }

        let mut per_metric = HashMap::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            let samples: Vec<f32> = runs
                .iter()
                .filter_map(|run| run.get(test_case))
                .map(|record| record.metric(metric) as f32)
                .collect();
            per_metric.insert(metric, AggregateStat::from_samples(&samples, method));
        }
        aggregated.insert(test_case.clone(), per_metric);
    }

    Ok(aggregated)
}
