//! Real-time fitness scoring
//!
//! Derives a normalized composite score per test case from the full record
//! set of one run. Each of five "badness" series (jitter, std dev, CV,
//! max/avg, p99/avg) is min-max normalized against the worst performer in
//! the same run, so scores are only meaningful for relative ranking within
//! one report. They must not be compared across reports or machines.

use crate::error::{AnalysisError, Result};
use crate::report::MetricRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Composite weights; they encode the relative importance of worst-case
/// latency vs variability vs tail behavior and must sum to exactly 1.0.
pub const JITTER_WEIGHT: f64 = 0.20;
pub const STD_DEV_WEIGHT: f64 = 0.20;
pub const CV_WEIGHT: f64 = 0.25;
pub const RATIO_WEIGHT: f64 = 0.15;
pub const P99_WEIGHT: f64 = 0.20;

/// Ordinal real-time suitability grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RtGrade {
    VeryPoor,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl RtGrade {
    /// Grade for a composite score, inclusive lower bounds
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            RtGrade::Excellent
        } else if score >= 75.0 {
            RtGrade::Good
        } else if score >= 60.0 {
            RtGrade::Fair
        } else if score >= 40.0 {
            RtGrade::Poor
        } else {
            RtGrade::VeryPoor
        }
    }

    /// Human-readable label, as emitted in CSV and reports
    pub fn label(&self) -> &'static str {
        match self {
            RtGrade::Excellent => "Excellent",
            RtGrade::Good => "Good",
            RtGrade::Fair => "Fair",
            RtGrade::Poor => "Poor",
            RtGrade::VeryPoor => "Very Poor",
        }
    }
}

impl std::fmt::Display for RtGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-test-case scoring result for a single run
///
/// Sub-scores are in [0, 100]; the overall score is their weighted
/// combination and stays in [0, 100] by construction. Values are kept at
/// full precision; emitters round for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub jitter_score: f64,
    pub std_dev_score: f64,
    pub cv_score: f64,
    pub ratio_score: f64,
    pub p99_score: f64,
    pub overall_score: f64,
    pub rt_grade: RtGrade,
    /// max / avg, carried for the emitters
    pub max_avg_ratio: f64,
    /// p99 / avg, carried for the emitters
    pub p99_avg_ratio: f64,
}

/// Series maxima used for normalization, computed over the whole record set
struct SeriesMaxima {
    jitter: f64,
    std_dev: f64,
    cv: f64,
    ratio: f64,
    p99_ratio: f64,
}

impl SeriesMaxima {
    fn compute(records: &HashMap<String, MetricRecord>) -> Result<Self> {
        // The two ratio series divide by avg; a zero avg makes them undefined
        if records.values().any(|r| r.avg == 0) {
            return Err(AnalysisError::DegenerateSeries { series: "avg" });
        }

        let fold = |f: fn(&MetricRecord) -> f64| {
            records.values().map(f).fold(f64::MIN, f64::max)
        };

        let maxima = Self {
            jitter: fold(|r| r.jitter as f64),
            std_dev: fold(|r| r.std_dev),
            cv: fold(|r| r.cv),
            ratio: fold(MetricRecord::max_avg_ratio),
            p99_ratio: fold(MetricRecord::p99_avg_ratio),
        };

        for (series, max) in [
            ("jitter", maxima.jitter),
            ("std_dev", maxima.std_dev),
            ("cv", maxima.cv),
            ("max_avg_ratio", maxima.ratio),
            ("p99_avg_ratio", maxima.p99_ratio),
        ] {
            if max == 0.0 {
                return Err(AnalysisError::DegenerateSeries { series });
            }
        }

        Ok(maxima)
    }
}

/// Sub-score against the series maximum: 100 for zero badness, 0 for the
/// worst performer
fn sub_score(value: f64, series_max: f64) -> f64 {
    (100.0 * (1.0 - value / series_max)).max(0.0)
}

/// Score every record of one run against the run's own worst performers
///
/// Fails with `InsufficientData` on an empty record set and with
/// `DegenerateSeries` when a normalization series is all zeros (broken
/// benchmark data), rather than silently defaulting.
pub fn score_records(
    records: &HashMap<String, MetricRecord>,
) -> Result<HashMap<String, ScoreRecord>> {
    if records.is_empty() {
        return Err(AnalysisError::InsufficientData);
    }

    let maxima = SeriesMaxima::compute(records)?;

    let mut scores = HashMap::with_capacity(records.len());
    for (name, record) in records {
        let jitter_score = sub_score(record.jitter as f64, maxima.jitter);
        let std_dev_score = sub_score(record.std_dev, maxima.std_dev);
        let cv_score = sub_score(record.cv, maxima.cv);
        let ratio_score = sub_score(record.max_avg_ratio(), maxima.ratio);
        let p99_score = sub_score(record.p99_avg_ratio(), maxima.p99_ratio);

        let overall_score = JITTER_WEIGHT * jitter_score
            + STD_DEV_WEIGHT * std_dev_score
            + CV_WEIGHT * cv_score
            + RATIO_WEIGHT * ratio_score
            + P99_WEIGHT * p99_score;

        scores.insert(
            name.clone(),
            ScoreRecord {
                jitter_score,
                std_dev_score,
                cv_score,
                ratio_score,
                p99_score,
                overall_score,
                rt_grade: RtGrade::from_score(overall_score),
                max_avg_ratio: record.max_avg_ratio(),
                p99_avg_ratio: record.p99_avg_ratio(),
            },
        );
    }

    Ok(scores)
}

/// Render the ranked analysis summary printed after a single-run analysis
pub fn render_summary(
    records: &HashMap<String, MetricRecord>,
    scores: &HashMap<String, ScoreRecord>,
) -> String {
    let mut ranked: Vec<(&String, &ScoreRecord)> = scores.iter().collect();
    ranked.sort_by(|a, b| {
        b.1.overall_score
            .partial_cmp(&a.1.overall_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = String::new();
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str("              Real-time analysis summary\n");
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str(&format!(
        "{:<4} {:<28} {:<14} {:<12} {:<10}\n",
        "Rank", "Test Case", "Overall Score", "Grade", "CV"
    ));
    out.push_str(&format!("{}\n", "-".repeat(80)));

    for (rank, (name, score)) in ranked.iter().enumerate() {
        let cv = records.get(*name).map_or(0.0, |r| r.cv);
        out.push_str(&format!(
            "{:<4} {:<28} {:<14.1} {:<12} {:<10.4}\n",
            rank + 1,
            name,
            score.overall_score,
            score.rt_grade.label(),
            cv
        ));
    }

    out
}
