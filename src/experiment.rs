//! Experiment directory bookkeeping
//!
//! Each analysis gets a timestamped folder under the result directory that
//! archives the raw report(s), the generated analysis files, and an info
//! file describing the experiment.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// A timestamped experiment directory
#[derive(Debug, Clone)]
pub struct ExperimentDir {
    path: PathBuf,
    timestamp: String,
}

impl ExperimentDir {
    /// Create `<base>/experiment_<YYYYmmdd_HHMMSS>/`
    pub fn create(base: &Path) -> Result<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self::create_with_timestamp(base, timestamp)
    }

    fn create_with_timestamp(base: &Path, timestamp: String) -> Result<Self> {
        let path = base.join(format!("experiment_{timestamp}"));
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create experiment directory {}", path.display()))?;
        Ok(Self { path, timestamp })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Resolve a file name inside the experiment directory
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Archive a raw report as `benchmark_raw_<ts>[_<index>].txt`
    ///
    /// The index disambiguates multi-run inputs archived into the same
    /// experiment.
    pub fn archive_raw_input(&self, source: &Path, index: Option<usize>) -> Result<PathBuf> {
        let name = match index {
            Some(i) => format!("benchmark_raw_{}_{}.txt", self.timestamp, i + 1),
            None => format!("benchmark_raw_{}.txt", self.timestamp),
        };
        let dest = self.path.join(&name);
        fs::copy(source, &dest)
            .with_context(|| format!("failed to archive {}", source.display()))?;
        Ok(dest)
    }

    /// Write `experiment_info.txt` describing inputs and generated files
    pub fn write_info(
        &self,
        inputs: &[PathBuf],
        test_case_count: usize,
        generated: &[String],
    ) -> Result<PathBuf> {
        let mut info = String::new();
        info.push_str("Real-time Analysis Experiment\n");
        info.push_str(&format!("{}\n", "=".repeat(50)));
        info.push_str(&format!("Date: {}\n", Local::now().format("%Y-%m-%d")));
        info.push_str(&format!("Timestamp: {}\n", self.timestamp));
        for input in inputs {
            info.push_str(&format!("Input File: {}\n", input.display()));
        }
        info.push_str(&format!("Test Cases: {test_case_count}\n"));
        info.push_str("Generated Files:\n");
        for name in generated {
            info.push_str(&format!("  - {name}\n"));
        }
        info.push_str(&format!("\nExperiment Directory: {}\n", self.path.display()));

        let dest = self.path.join("experiment_info.txt");
        fs::write(&dest, info)
            .with_context(|| format!("failed to write {}", dest.display()))?;
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_experiment_dir() {
        let base = TempDir::new().unwrap();
        let experiment =
            ExperimentDir::create_with_timestamp(base.path(), "20260101_120000".to_string())
                .unwrap();

        assert!(experiment.path().is_dir());
        assert!(experiment
            .path()
            .ends_with("experiment_20260101_120000"));
        assert_eq!(experiment.timestamp(), "20260101_120000");
    }

    #[test]
    fn test_archive_raw_input() {
        let base = TempDir::new().unwrap();
        let report = base.path().join("bench.txt");
        fs::write(&report, "=== Pure Computation ===\n").unwrap();

        let experiment =
            ExperimentDir::create_with_timestamp(base.path(), "20260101_120000".to_string())
                .unwrap();

        let archived = experiment.archive_raw_input(&report, None).unwrap();
        assert!(archived.ends_with("benchmark_raw_20260101_120000.txt"));
        assert_eq!(fs::read_to_string(archived).unwrap(), "=== Pure Computation ===\n");

        let indexed = experiment.archive_raw_input(&report, Some(1)).unwrap();
        assert!(indexed.ends_with("benchmark_raw_20260101_120000_2.txt"));
    }

    #[test]
    fn test_write_info_lists_generated_files() {
        let base = TempDir::new().unwrap();
        let experiment =
            ExperimentDir::create_with_timestamp(base.path(), "20260101_120000".to_string())
                .unwrap();

        let info_path = experiment
            .write_info(
                &[PathBuf::from("bench.txt")],
                6,
                &["rt_analysis.csv".to_string(), "rt_analysis.html".to_string()],
            )
            .unwrap();

        let info = fs::read_to_string(info_path).unwrap();
        assert!(info.contains("Input File: bench.txt"));
        assert!(info.contains("Test Cases: 6"));
        assert!(info.contains("  - rt_analysis.csv"));
        assert!(info.contains("  - rt_analysis.html"));
    }
}
