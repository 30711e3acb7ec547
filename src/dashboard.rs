//! Dashboard aggregation over historical comparison results
//!
//! Figures are rounded for display: overall rates to one decimal, daily
//! averages to two.

use crate::analysis::AnalysisKind;
use crate::comparison::ComparisonRecord;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A relative error observed at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObservation {
    pub recorded_at: DateTime<Utc>,
    /// `None` when the error was not computable
    pub relative_error_percent: Option<f64>,
}

/// Average error of one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyError {
    pub date: NaiveDate,
    pub average_error: f64,
    pub sample_count: usize,
}

/// Accuracy (100 - average error, floored at 0) of one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAccuracy {
    pub date: NaiveDate,
    pub accuracy: f64,
}

/// Count and share of one analysis kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTypeShare {
    pub kind: AnalysisKind,
    pub count: usize,
    /// Percent of all analyses
    pub percentage: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Mean relative error over all computable comparisons, one decimal, 0 if none
pub fn average_error_rate(records: &[ComparisonRecord]) -> f64 {
    let errors: Vec<f64> = records
        .iter()
        .filter_map(|r| r.relative_error_percent)
        .collect();
    mean(&errors).map_or(0.0, |m| round_to(m, 1))
}

/// Computable errors bucketed by UTC date, in date order
fn errors_by_day(observations: &[ErrorObservation]) -> BTreeMap<NaiveDate, Vec<f64>> {
    let mut days: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for obs in observations {
        if let Some(err) = obs.relative_error_percent {
            days.entry(obs.recorded_at.date_naive()).or_default().push(err);
        }
    }
    days
}

/// Daily average relative error, sorted by date
pub fn daily_error_trend(observations: &[ErrorObservation]) -> Vec<DailyError> {
    errors_by_day(observations)
        .into_iter()
        .filter_map(|(date, errors)| {
            mean(&errors).map(|avg| DailyError {
                date,
                average_error: round_to(avg, 2),
                sample_count: errors.len(),
            })
        })
        .collect()
}

/// Daily accuracy as 100 minus the average relative error, never below 0
pub fn daily_accuracy(observations: &[ErrorObservation]) -> Vec<DailyAccuracy> {
    errors_by_day(observations)
        .into_iter()
        .filter_map(|(date, errors)| {
            mean(&errors).map(|avg| DailyAccuracy {
                date,
                accuracy: (100.0 - avg).max(0.0),
            })
        })
        .collect()
}

/// Count analyses per kind with their share of the total
pub fn analysis_type_breakdown(kinds: &[AnalysisKind]) -> Vec<AnalysisTypeShare> {
    let mut counts: BTreeMap<AnalysisKind, usize> = BTreeMap::new();
    for kind in kinds {
        *counts.entry(*kind).or_default() += 1;
    }

    let total = kinds.len();
    counts
        .into_iter()
        .map(|(kind, count)| AnalysisTypeShare {
            kind,
            count,
            percentage: if total > 0 {
                round_to(count as f64 / total as f64 * 100.0, 1)
            } else {
                0.0
            },
        })
        .collect()
}
