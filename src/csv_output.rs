//! CSV output for analysis results
//!
//! Two formats: one row per canonical test case for a single-run analysis,
//! and one row per (test case, metric) pair for a multi-run aggregation.

use crate::aggregate::{AggregateStat, CiMethod};
use crate::report::{Metric, MetricRecord, CANONICAL_TEST_CASES};
use crate::score::ScoreRecord;
use std::collections::HashMap;

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Single-run analysis CSV: raw metrics, derived ratios, sub-scores,
/// composite score, and grade for each canonical test case present
#[derive(Debug)]
pub struct ScoreCsvOutput<'a> {
    records: &'a HashMap<String, MetricRecord>,
    scores: &'a HashMap<String, ScoreRecord>,
}

impl<'a> ScoreCsvOutput<'a> {
    pub fn new(
        records: &'a HashMap<String, MetricRecord>,
        scores: &'a HashMap<String, ScoreRecord>,
    ) -> Self {
        Self { records, scores }
    }

    fn header() -> &'static str {
        "Test_Case,Min_Cycles,Max_Cycles,Avg_Cycles,Jitter_Cycles,Std_Dev,CV,\
         P95_Cycles,P99_Cycles,Max_Avg_Ratio,P99_Avg_Ratio,Jitter_Score,\
         StdDev_Score,CV_Score,Ratio_Score,P99_Score,Overall_RT_Score,RT_Grade"
    }

    fn format_row(name: &str, record: &MetricRecord, score: &ScoreRecord) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{:.3},{:.3},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
            escape_field(name),
            record.min,
            record.max,
            record.avg,
            record.jitter,
            record.std_dev,
            record.cv,
            record.p95,
            record.p99,
            score.max_avg_ratio,
            score.p99_avg_ratio,
            score.jitter_score,
            score.std_dev_score,
            score.cv_score,
            score.ratio_score,
            score.p99_score,
            score.overall_score,
            score.rt_grade.label(),
        )
    }

    /// Generate CSV output as string, rows in canonical test-case order
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(Self::header());
        output.push('\n');

        for name in CANONICAL_TEST_CASES {
            let (Some(record), Some(score)) = (self.records.get(name), self.scores.get(name))
            else {
                continue;
            };
            output.push_str(&Self::format_row(name, record, score));
            output.push('\n');
        }

        output
    }
}

/// Multi-run aggregation CSV: cross-run descriptive statistics per
/// (test case, metric), tagged with the CI method that produced the bounds
#[derive(Debug)]
pub struct AggregateCsvOutput<'a> {
    aggregated: &'a HashMap<String, HashMap<Metric, AggregateStat>>,
    method: CiMethod,
}

impl<'a> AggregateCsvOutput<'a> {
    pub fn new(
        aggregated: &'a HashMap<String, HashMap<Metric, AggregateStat>>,
        method: CiMethod,
    ) -> Self {
        Self { aggregated, method }
    }

    fn header() -> &'static str {
        "Test_Case,Metric,Mean,Std,Min,Max,Median,Q25,Q75,CI_Lower,CI_Upper,\
         Sample_Count,CV,CI_Method"
    }

    fn format_row(&self, name: &str, metric: Metric, stat: &AggregateStat) -> String {
        // Omitted CI bounds stay empty, never zero
        let (ci_lower, ci_upper) = match stat.ci {
            Some((lower, upper)) => (format!("{:.2}", lower), format!("{:.2}", upper)),
            None => (String::new(), String::new()),
        };

        format!(
            "{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{},{},{},{:.4},{}",
            escape_field(name),
            metric.name(),
            stat.mean,
            stat.std,
            stat.min,
            stat.max,
            stat.median,
            stat.q25,
            stat.q75,
            ci_lower,
            ci_upper,
            stat.count,
            stat.cv(),
            self.method.label(),
        )
    }

    /// Generate CSV output as string, canonical test cases first, metrics
    /// in record field order
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(Self::header());
        output.push('\n');

        let mut names: Vec<&String> = self.aggregated.keys().collect();
        names.sort_by_key(|name| {
            CANONICAL_TEST_CASES
                .iter()
                .position(|c| c == name)
                .unwrap_or(CANONICAL_TEST_CASES.len())
        });

        for name in names {
            let per_metric = &self.aggregated[name];
            for metric in Metric::ALL {
                if let Some(stat) = per_metric.get(&metric) {
                    output.push_str(&self.format_row(name, metric, stat));
                    output.push('\n');
                }
            }
        }

        output
    }
}
