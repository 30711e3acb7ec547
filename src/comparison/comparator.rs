// Per-parameter error computation and session-level aggregation
//
// A zero simulation value makes the relative error undefined. Such records
// carry `None` and are left out of the error aggregates so that no NaN or
// infinity ever reaches the summary.

use crate::align::AlignedPair;
use crate::comparison::config::ComparisonConfig;
use crate::comparison::recommendation::{recommend, Recommendation};
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Comparison of one simulated parameter against its measured value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub parameter_name: String,
    pub simulation_value: f64,
    pub test_value: f64,
    pub unit: String,
    /// |test - simulation|
    pub absolute_error: f64,
    /// |test - simulation| / |simulation| * 100, `None` when simulation is zero
    pub relative_error_percent: Option<f64>,
    pub tolerance_met: bool,
}

impl ComparisonRecord {
    /// Compare one aligned pair against a tolerance in percent
    pub fn from_pair(pair: &AlignedPair, tolerance_percent: f64) -> Self {
        let absolute_error = (pair.test_value - pair.simulation_value).abs();

        let relative_error_percent = if pair.simulation_value == 0.0 {
            None
        } else {
            Some(absolute_error / pair.simulation_value.abs() * 100.0)
        };

        let tolerance_met = match relative_error_percent {
            Some(rel) => rel <= tolerance_percent,
            // Only an exact match passes when the ratio is undefined
            None => absolute_error == 0.0,
        };

        Self {
            parameter_name: pair.parameter_name.clone(),
            simulation_value: pair.simulation_value,
            test_value: pair.test_value,
            unit: pair.unit.clone(),
            absolute_error,
            relative_error_percent,
            tolerance_met,
        }
    }

    /// Relative error in percent, or `UndefinedRatio` for a zero simulation value
    pub fn relative_error(&self) -> Result<f64> {
        self.relative_error_percent
            .ok_or_else(|| AnalysisError::UndefinedRatio {
                parameter: self.parameter_name.clone(),
            })
    }

    pub fn is_computable(&self) -> bool {
        self.relative_error_percent.is_some()
    }
}

/// Aggregate figures over all comparisons of a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_parameters: usize,
    pub within_tolerance: usize,
    /// Records whose relative error could not be computed
    pub not_computable: usize,
    /// Mean relative error (percent) over computable records, 0 if none
    pub average_error: f64,
    pub max_error: f64,
    pub min_error: f64,
}

impl ComparisonSummary {
    pub fn from_records(records: &[ComparisonRecord]) -> Self {
        let errors: Vec<f64> = records
            .iter()
            .filter_map(|r| r.relative_error_percent)
            .collect();

        let (average_error, max_error, min_error) = if errors.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                errors.iter().sum::<f64>() / errors.len() as f64,
                errors.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                errors.iter().copied().fold(f64::INFINITY, f64::min),
            )
        };

        Self {
            total_parameters: records.len(),
            within_tolerance: records.iter().filter(|r| r.tolerance_met).count(),
            not_computable: records.len() - errors.len(),
            average_error,
            max_error,
            min_error,
        }
    }

    /// Share of parameters within tolerance, `None` for an empty session
    pub fn pass_ratio(&self) -> Option<f64> {
        if self.total_parameters == 0 {
            None
        } else {
            Some(self.within_tolerance as f64 / self.total_parameters as f64)
        }
    }
}

/// Full comparison result: per-parameter records, summary and advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonAnalysis {
    pub comparisons: Vec<ComparisonRecord>,
    pub summary: ComparisonSummary,
    pub recommendations: Vec<Recommendation>,
}

impl ComparisonAnalysis {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let s = &self.summary;

        report.push_str("=== Simulation vs. Measurement ===\n\n");
        report.push_str(&format!(
            "Parameters compared: {} ({} within tolerance",
            s.total_parameters, s.within_tolerance
        ));
        if s.not_computable > 0 {
            report.push_str(&format!(", {} not computable", s.not_computable));
        }
        report.push_str(")\n");
        report.push_str(&format!(
            "Relative error: avg={:.2}% max={:.2}% min={:.2}%\n",
            s.average_error, s.max_error, s.min_error
        ));

        if !self.comparisons.is_empty() {
            report.push_str(&format!(
                "\n{:<24} {:>12} {:>12} {:>10} {:>10}  {}\n",
                "parameter", "simulation", "measured", "abs err", "rel err", "status"
            ));
            for r in &self.comparisons {
                let rel = match r.relative_error_percent {
                    Some(rel) => format!("{:.2}%", rel),
                    None => "n/a".to_string(),
                };
                report.push_str(&format!(
                    "{:<24} {:>12.4} {:>12.4} {:>10.4} {:>10}  {}\n",
                    r.parameter_name,
                    r.simulation_value,
                    r.test_value,
                    r.absolute_error,
                    rel,
                    if r.tolerance_met { "PASS" } else { "FAIL" }
                ));
            }
        }

        if !self.recommendations.is_empty() {
            report.push_str("\nRecommendations:\n");
            for rec in &self.recommendations {
                report.push_str(&format!("  - {}\n", rec));
            }
        }

        report
    }
}

/// Compare aligned pairs against the configured tolerance
///
/// An empty input yields an all-zero summary; only an invalid configuration
/// is an error.
///
/// # Example
/// ```
/// use simcheck::align::AlignedPair;
/// use simcheck::comparison::{compare, ComparisonConfig};
///
/// let pairs = vec![AlignedPair {
///     parameter_name: "clamping_force".to_string(),
///     simulation_value: 100.0,
///     test_value: 105.0,
///     unit: "kN".to_string(),
/// }];
///
/// let analysis = compare(&pairs, &ComparisonConfig::default()).unwrap();
/// assert_eq!(analysis.comparisons[0].absolute_error, 5.0);
/// assert!(analysis.comparisons[0].tolerance_met);
/// ```
pub fn compare(pairs: &[AlignedPair], config: &ComparisonConfig) -> Result<ComparisonAnalysis> {
    config.validate()?;

    let comparisons: Vec<ComparisonRecord> = pairs
        .iter()
        .map(|pair| ComparisonRecord::from_pair(pair, config.tolerance_percent))
        .collect();

    for record in comparisons.iter().filter(|r| !r.is_computable()) {
        tracing::debug!(
            "Relative error for '{}' not computable (simulation value is zero)",
            record.parameter_name
        );
    }

    let summary = ComparisonSummary::from_records(&comparisons);
    let recommendations = recommend(&summary, &comparisons, config);

    Ok(ComparisonAnalysis {
        comparisons,
        summary,
        recommendations,
    })
}
