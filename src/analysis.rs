//! Session-level analysis over an injected sample store
//!
//! An [`Analyzer`] pulls a session's simulation and measurement samples from
//! a [`SessionStore`] and runs one of three analyses over them. The acting
//! analyst is always passed in by the caller.

use crate::align::align_parameters_with;
use crate::comparison::{compare, ComparisonAnalysis};
use crate::config::AnalysisConfig;
use crate::sample::{group_by_parameter, sort_by_timestamp, ParameterSample};
use crate::stats::{histogram, summarize_statistics, Histogram, StatSummary};
use crate::trend::{estimate_trend_with, forecast, ForecastPoint, TrendResult};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Confidence attached to trend analyses
const TREND_CONFIDENCE: f64 = 0.8;
/// Confidence attached to statistical analyses
const STATISTICAL_CONFIDENCE: f64 = 0.9;

/// Source of recorded samples for a test session
pub trait SessionStore {
    fn simulation_samples(&self, session_id: &str) -> Result<Vec<ParameterSample>>;
    fn measurement_samples(&self, session_id: &str) -> Result<Vec<ParameterSample>>;
}

/// Store backed by in-process maps
#[derive(Debug, Default)]
pub struct InMemoryStore {
    simulation: HashMap<String, Vec<ParameterSample>>,
    measurement: HashMap<String, Vec<ParameterSample>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_simulation(&mut self, session_id: &str, samples: Vec<ParameterSample>) {
        self.simulation
            .entry(session_id.to_string())
            .or_default()
            .extend(samples);
    }

    pub fn insert_measurement(&mut self, session_id: &str, samples: Vec<ParameterSample>) {
        self.measurement
            .entry(session_id.to_string())
            .or_default()
            .extend(samples);
    }
}

impl SessionStore for InMemoryStore {
    fn simulation_samples(&self, session_id: &str) -> Result<Vec<ParameterSample>> {
        Ok(self.simulation.get(session_id).cloned().unwrap_or_default())
    }

    fn measurement_samples(&self, session_id: &str) -> Result<Vec<ParameterSample>> {
        Ok(self.measurement.get(session_id).cloned().unwrap_or_default())
    }
}

/// Kind of analysis performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisKind {
    Comparison,
    Trend,
    Statistical,
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalysisKind::Comparison => "comparison",
            AnalysisKind::Trend => "trend",
            AnalysisKind::Statistical => "statistical",
        };
        f.write_str(s)
    }
}

/// Trend of one parameter, with an optional forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterTrend {
    pub parameter: String,
    #[serde(flatten)]
    pub trend: TrendResult,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub trends: Vec<ParameterTrend>,
}

impl TrendAnalysis {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::from("=== Trend Analysis ===\n\n");

        if self.trends.is_empty() {
            report.push_str("No parameters to analyze\n");
            return report;
        }

        report.push_str(&format!(
            "{:<24} {:>11} {:>12} {:>12}\n",
            "parameter", "direction", "slope", "correlation"
        ));
        for t in &self.trends {
            report.push_str(&format!(
                "{:<24} {:>11} {:>12.4} {:>12.4}\n",
                t.parameter,
                t.trend.direction.to_string(),
                t.trend.slope,
                t.trend.correlation
            ));
        }

        for t in self.trends.iter().filter(|t| !t.forecast.is_empty()) {
            let values: Vec<String> = t
                .forecast
                .iter()
                .map(|p| format!("[{}]={:.3}", p.index, p.value))
                .collect();
            report.push_str(&format!("\nForecast {}: {}", t.parameter, values.join(" ")));
        }
        if self.trends.iter().any(|t| !t.forecast.is_empty()) {
            report.push('\n');
        }

        report
    }
}

/// Summary statistics of one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterStatistics {
    pub parameter: String,
    #[serde(flatten)]
    pub summary: StatSummary,
}

/// Value distribution of one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDistribution {
    pub parameter: String,
    pub histogram: Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalAnalysis {
    pub statistics: Vec<ParameterStatistics>,
    pub distribution: Vec<ParameterDistribution>,
}

impl StatisticalAnalysis {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::from("=== Statistical Analysis ===\n\n");

        if self.statistics.is_empty() {
            report.push_str("No parameters to analyze\n");
            return report;
        }

        report.push_str(&format!(
            "{:<24} {:>6} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
            "parameter", "count", "mean", "median", "stddev", "min", "max"
        ));
        for p in &self.statistics {
            let s = &p.summary;
            report.push_str(&format!(
                "{:<24} {:>6} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}\n",
                p.parameter, s.count, s.mean, s.median, s.std_dev, s.min, s.max
            ));
        }

        for d in &self.distribution {
            report.push_str(&format!("\nDistribution of {}:\n", d.parameter));
            for bin in &d.histogram.bins {
                report.push_str(&format!(
                    "  {:>24} {:>6} {}\n",
                    bin.range,
                    bin.count,
                    "#".repeat(bin.count.min(50))
                ));
            }
        }

        report
    }
}

/// Result payload of an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Comparison(ComparisonAnalysis),
    Trend(TrendAnalysis),
    Statistical(StatisticalAnalysis),
}

impl AnalysisOutcome {
    pub fn to_report_string(&self) -> String {
        match self {
            AnalysisOutcome::Comparison(c) => c.to_report_string(),
            AnalysisOutcome::Trend(t) => t.to_report_string(),
            AnalysisOutcome::Statistical(s) => s.to_report_string(),
        }
    }
}

/// A completed analysis, ready to persist or report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub session_id: String,
    /// Analyst who requested the run, if known
    pub analyst: Option<String>,
    pub kind: AnalysisKind,
    pub confidence_level: f64,
    pub created_at: DateTime<Utc>,
    pub result: AnalysisOutcome,
}

/// Runs analyses for sessions held in a store
pub struct Analyzer<'a, S: SessionStore> {
    store: &'a S,
    config: AnalysisConfig,
}

impl<'a, S: SessionStore> Analyzer<'a, S> {
    /// Create an analyzer after validating its configuration
    pub fn new(store: &'a S, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Compare simulated and measured values of a session
    ///
    /// Confidence is the share of parameters within tolerance.
    pub fn comparison(&self, session_id: &str, analyst: Option<&str>) -> Result<AnalysisRecord> {
        let sim = self.store.simulation_samples(session_id)?;
        let test = self.store.measurement_samples(session_id)?;

        let analysis = compare_samples(&sim, &test, &self.config)
            .with_context(|| format!("Comparison failed for session {}", session_id))?;
        let confidence = analysis.summary.pass_ratio().unwrap_or(0.0);

        tracing::debug!(
            "Session {}: {} of {} parameters within tolerance",
            session_id,
            analysis.summary.within_tolerance,
            analysis.summary.total_parameters
        );

        Ok(self.record(
            session_id,
            analyst,
            AnalysisKind::Comparison,
            confidence,
            AnalysisOutcome::Comparison(analysis),
        ))
    }

    /// Estimate per-parameter trends over measurement then simulation samples
    pub fn trend(&self, session_id: &str, analyst: Option<&str>) -> Result<AnalysisRecord> {
        let mut test = self.store.measurement_samples(session_id)?;
        let mut sim = self.store.simulation_samples(session_id)?;
        sort_by_timestamp(&mut test);
        sort_by_timestamp(&mut sim);

        let samples: Vec<ParameterSample> = test.into_iter().chain(sim).collect();
        let analysis = trend_of_samples(&samples, &self.config)
            .with_context(|| format!("Trend analysis failed for session {}", session_id))?;

        Ok(self.record(
            session_id,
            analyst,
            AnalysisKind::Trend,
            TREND_CONFIDENCE,
            AnalysisOutcome::Trend(analysis),
        ))
    }

    /// Summarize and bin all values of each parameter in a session
    pub fn statistical(&self, session_id: &str, analyst: Option<&str>) -> Result<AnalysisRecord> {
        let test = self.store.measurement_samples(session_id)?;
        let sim = self.store.simulation_samples(session_id)?;

        let samples: Vec<ParameterSample> = test.into_iter().chain(sim).collect();
        let analysis = statistics_of_samples(&samples, &self.config)
            .with_context(|| format!("Statistical analysis failed for session {}", session_id))?;

        Ok(self.record(
            session_id,
            analyst,
            AnalysisKind::Statistical,
            STATISTICAL_CONFIDENCE,
            AnalysisOutcome::Statistical(analysis),
        ))
    }

    /// Run the analysis of the given kind
    pub fn run(
        &self,
        kind: AnalysisKind,
        session_id: &str,
        analyst: Option<&str>,
    ) -> Result<AnalysisRecord> {
        match kind {
            AnalysisKind::Comparison => self.comparison(session_id, analyst),
            AnalysisKind::Trend => self.trend(session_id, analyst),
            AnalysisKind::Statistical => self.statistical(session_id, analyst),
        }
    }

    fn record(
        &self,
        session_id: &str,
        analyst: Option<&str>,
        kind: AnalysisKind,
        confidence_level: f64,
        result: AnalysisOutcome,
    ) -> AnalysisRecord {
        AnalysisRecord {
            session_id: session_id.to_string(),
            analyst: analyst.map(str::to_string),
            kind,
            confidence_level,
            created_at: Utc::now(),
            result,
        }
    }
}

/// Align and compare two sample series with the configured policy and tolerance
pub fn compare_samples(
    sim: &[ParameterSample],
    test: &[ParameterSample],
    config: &AnalysisConfig,
) -> crate::Result<ComparisonAnalysis> {
    let pairs = align_parameters_with(sim, test, config.duplicate_policy);
    compare(&pairs, &config.comparison)
}

/// Per-parameter trends over samples already in time order
pub fn trend_of_samples(
    samples: &[ParameterSample],
    config: &AnalysisConfig,
) -> crate::Result<TrendAnalysis> {
    let mut trends = Vec::new();

    for (parameter, group) in group_by_parameter(samples) {
        let values: Vec<f64> = group.iter().map(|s| s.value).collect();
        let trend = estimate_trend_with(&values, config.trend.stable_slope_threshold)?;

        let forecast = if config.trend.forecast_steps > 0 && values.len() >= 2 {
            forecast(&values, config.trend.forecast_steps)?
        } else {
            Vec::new()
        };

        trends.push(ParameterTrend {
            parameter,
            trend,
            forecast,
        });
    }

    Ok(TrendAnalysis { trends })
}

/// Per-parameter summary statistics and histograms
pub fn statistics_of_samples(
    samples: &[ParameterSample],
    config: &AnalysisConfig,
) -> crate::Result<StatisticalAnalysis> {
    let mut statistics = Vec::new();
    let mut distribution = Vec::new();

    for (parameter, group) in group_by_parameter(samples) {
        let values: Vec<f64> = group.iter().map(|s| s.value).collect();

        statistics.push(ParameterStatistics {
            parameter: parameter.clone(),
            summary: summarize_statistics(&values)?,
        });
        distribution.push(ParameterDistribution {
            parameter,
            histogram: histogram(&values, config.statistics.histogram_bins)?,
        });
    }

    Ok(StatisticalAnalysis {
        statistics,
        distribution,
    })
}
