// Confidence-interval strategy for cross-run aggregation
//
// Two implementations of the two-sided 95% interval on the mean:
// - StudentT: critical value from the t distribution at count-1 degrees of
//   freedom. Correct for the small run counts (2-10) this tool sees, where
//   the normal approximation badly understates the interval (dof 1 uses
//   12.706, not 1.96).
// - Normal: z = 1.96 approximation, for builds without the `student-t`
//   feature.
//
// Selection happens once via CiMethod::detect() and is logged and tagged in
// the emitter output, never decided per call site.

use clap::ValueEnum;

/// Two-sided 95% critical values of the t distribution, dof 1..=30
const T_CRITICAL_95: [f32; 30] = [
    12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228, 2.201, 2.179, 2.160,
    2.145, 2.131, 2.120, 2.110, 2.101, 2.093, 2.086, 2.080, 2.074, 2.069, 2.064, 2.060, 2.056,
    2.052, 2.048, 2.045, 2.042,
];

/// z critical value for a two-sided 95% interval
const Z_CRITICAL_95: f32 = 1.96;

/// Method used to compute confidence bounds on cross-run means
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CiMethod {
    /// Student-t critical value at count-1 degrees of freedom
    StudentT,
    /// Normal approximation (z = 1.96)
    Normal,
}

impl CiMethod {
    /// Select the preferred method available in this build and log the
    /// choice so report consumers know which method produced the bounds
    pub fn detect() -> Self {
        let method = if cfg!(feature = "student-t") {
            CiMethod::StudentT
        } else {
            CiMethod::Normal
        };
        tracing::info!(method = method.label(), "confidence interval method selected");
        method
    }

    /// Label used in CSV/JSON output tagging
    pub fn label(&self) -> &'static str {
        match self {
            CiMethod::StudentT => "student-t",
            CiMethod::Normal => "normal-approx",
        }
    }

    /// Critical value for a two-sided 95% interval at `dof` degrees of
    /// freedom. Beyond dof 30 the t distribution is close enough to normal
    /// that the standard table bands (40, 60, 120, asymptote) apply.
    fn critical_value(&self, dof: usize) -> f32 {
        match self {
            CiMethod::Normal => Z_CRITICAL_95,
            CiMethod::StudentT => match dof {
                0 => f32::INFINITY,
                1..=30 => T_CRITICAL_95[dof - 1],
                31..=40 => 2.021,
                41..=60 => 2.000,
                61..=120 => 1.980,
                _ => Z_CRITICAL_95,
            },
        }
    }

    /// Two-sided 95% confidence interval on the mean of `count` samples
    /// with population standard deviation `std`
    ///
    /// Returns None for count <= 1: a single sample has no interval, and
    /// callers must be able to distinguish "no CI" from a zero-width CI.
    pub fn interval(&self, mean: f32, std: f32, count: usize) -> Option<(f32, f32)> {
        if count <= 1 {
            return None;
        }
        let margin = self.critical_value(count - 1) * std / (count as f32).sqrt();
        Some((mean - margin, mean + margin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_t_critical_values() {
        let method = CiMethod::StudentT;
        assert_eq!(method.critical_value(1), 12.706);
        assert_eq!(method.critical_value(2), 4.303);
        assert_eq!(method.critical_value(30), 2.042);
        assert_eq!(method.critical_value(35), 2.021);
        assert_eq!(method.critical_value(1000), 1.96);
    }

    #[test]
    fn test_normal_critical_value_is_constant() {
        let method = CiMethod::Normal;
        assert_eq!(method.critical_value(1), 1.96);
        assert_eq!(method.critical_value(100), 1.96);
    }

    #[test]
    fn test_interval_single_sample_omitted() {
        assert_eq!(CiMethod::StudentT.interval(100.0, 5.0, 1), None);
        assert_eq!(CiMethod::Normal.interval(100.0, 5.0, 0), None);
    }

    #[test]
    fn test_interval_zero_std_collapses_to_mean() {
        let (lower, upper) = CiMethod::StudentT.interval(42.0, 0.0, 5).unwrap();
        assert_eq!(lower, 42.0);
        assert_eq!(upper, 42.0);
    }

    #[test]
    fn test_small_sample_inflates_t_interval() {
        // Two runs, std 50: t margin 12.706 * 50 / sqrt(2) ~ 449.2,
        // z margin 1.96 * 50 / sqrt(2) ~ 69.3
        let (t_lower, t_upper) = CiMethod::StudentT.interval(1050.0, 50.0, 2).unwrap();
        let (z_lower, z_upper) = CiMethod::Normal.interval(1050.0, 50.0, 2).unwrap();

        let t_margin = (t_upper - t_lower) / 2.0;
        let z_margin = (z_upper - z_lower) / 2.0;

        assert!((t_margin - 449.23).abs() < 0.1, "t margin was {t_margin}");
        assert!((z_margin - 69.296).abs() < 0.01, "z margin was {z_margin}");
        assert!(t_margin > 6.0 * z_margin);
    }

    #[test]
    fn test_detect_is_deterministic() {
        let first = CiMethod::detect();
        let second = CiMethod::detect();
        assert_eq!(first, second);
    }

    #[cfg(feature = "student-t")]
    #[test]
    fn test_detect_prefers_student_t() {
        assert_eq!(CiMethod::detect(), CiMethod::StudentT);
    }

    #[cfg(not(feature = "student-t"))]
    #[test]
    fn test_detect_falls_back_to_normal() {
        assert_eq!(CiMethod::detect(), CiMethod::Normal);
    }

    #[test]
    fn test_labels() {
        assert_eq!(CiMethod::StudentT.label(), "student-t");
        assert_eq!(CiMethod::Normal.label(), "normal-approx");
    }
}
