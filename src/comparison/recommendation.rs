// Advice derived from a comparison summary
//
// Rules, in order:
// - average relative error above `high_average_error_percent`: review the simulation model
// - pass ratio below `min_pass_ratio`: recalibrate the test equipment
// - any parameter above `attention_error_percent`: list it
// - nothing fired: results agree, proceed to the next test phase

use crate::comparison::comparator::{ComparisonRecord, ComparisonSummary};
use crate::comparison::config::ComparisonConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Advice attached to a comparison analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    /// Average error exceeds the configured bound
    HighAverageError { average_error: f64 },

    /// Too many parameters outside tolerance
    LowPassRate { pass_ratio: f64 },

    /// Parameters whose individual error needs attention
    AttentionRequired { parameters: Vec<String> },

    /// Simulation and measurement agree
    GoodAgreement,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::HighAverageError { average_error } => write!(
                f,
                "Average error is high ({:.2}%); review the simulation model parameters",
                average_error
            ),
            Recommendation::LowPassRate { pass_ratio } => write!(
                f,
                "Only {:.0}% of parameters are within tolerance; recalibrate the test equipment",
                pass_ratio * 100.0
            ),
            Recommendation::AttentionRequired { parameters } => write!(
                f,
                "Large errors need attention: {}",
                parameters.join(", ")
            ),
            Recommendation::GoodAgreement => write!(
                f,
                "Test results match the simulation; proceed to the next test phase"
            ),
        }
    }
}

/// Derive recommendations for a comparison
pub fn recommend(
    summary: &ComparisonSummary,
    records: &[ComparisonRecord],
    config: &ComparisonConfig,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if summary.average_error > config.high_average_error_percent {
        recommendations.push(Recommendation::HighAverageError {
            average_error: summary.average_error,
        });
    }

    if let Some(pass_ratio) = summary.pass_ratio() {
        if pass_ratio < config.min_pass_ratio {
            recommendations.push(Recommendation::LowPassRate { pass_ratio });
        }
    }

    let flagged: Vec<String> = records
        .iter()
        .filter(|r| {
            r.relative_error_percent
                .is_some_and(|rel| rel > config.attention_error_percent)
        })
        .map(|r| r.parameter_name.clone())
        .collect();
    if !flagged.is_empty() {
        recommendations.push(Recommendation::AttentionRequired {
            parameters: flagged,
        });
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation::GoodAgreement);
    }

    recommendations
}
