//! JSON output for machine consumption of a single-run analysis

use crate::report::{MetricRecord, CANONICAL_TEST_CASES};
use crate::score::{RtGrade, ScoreRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One analyzed test case: raw metrics plus derived scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTestCase {
    pub name: String,
    #[serde(flatten)]
    pub metrics: MetricRecord,
    pub max_avg_ratio: f64,
    pub p99_avg_ratio: f64,
    pub jitter_score: f64,
    pub std_dev_score: f64,
    pub cv_score: f64,
    pub ratio_score: f64,
    pub p99_score: f64,
    pub overall_score: f64,
    pub rt_grade: RtGrade,
}

/// Top-level single-run analysis document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonAnalysis {
    /// CPU model label, "Unknown" when discovery failed
    pub platform: String,
    pub tests: Vec<JsonTestCase>,
}

impl JsonAnalysis {
    /// Build the document, test cases in canonical order
    pub fn new(
        platform: String,
        records: &HashMap<String, MetricRecord>,
        scores: &HashMap<String, ScoreRecord>,
    ) -> Self {
        let tests = CANONICAL_TEST_CASES
            .iter()
            .filter_map(|name| {
                let record = records.get(*name)?;
                let score = scores.get(*name)?;
                Some(JsonTestCase {
                    name: name.to_string(),
                    metrics: record.clone(),
                    max_avg_ratio: score.max_avg_ratio,
                    p99_avg_ratio: score.p99_avg_ratio,
                    jitter_score: score.jitter_score,
                    std_dev_score: score.std_dev_score,
                    cv_score: score.cv_score,
                    ratio_score: score.ratio_score,
                    p99_score: score.p99_score,
                    overall_score: score.overall_score,
                    rt_grade: score.rt_grade,
                })
            })
            .collect();

        Self { platform, tests }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
