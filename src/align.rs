//! Parameter alignment between simulation and measurement series
//!
//! A comparison needs both values to mean anything, so a parameter present on
//! only one side is skipped rather than compared against a placeholder.

use crate::sample::ParameterSample;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which sample wins when a parameter name occurs more than once in a series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Use the first occurrence (matches how sessions were recorded historically)
    #[default]
    First,
    /// Use the most recent occurrence
    Last,
}

/// A parameter present in both series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub parameter_name: String,
    pub simulation_value: f64,
    pub test_value: f64,
    /// Unit as recorded on the simulation side
    pub unit: String,
}

/// Match simulation and test samples by parameter name using first-occurrence tie-break
///
/// # Example
/// ```
/// use simcheck::align::align_parameters;
/// use simcheck::sample::ParameterSample;
///
/// let sim = vec![ParameterSample::new("max_speed", 4000.0, "rpm")];
/// let test = vec![ParameterSample::new("max_speed", 3950.0, "rpm")];
///
/// let pairs = align_parameters(&sim, &test);
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].test_value, 3950.0);
/// ```
pub fn align_parameters(sim: &[ParameterSample], test: &[ParameterSample]) -> Vec<AlignedPair> {
    align_parameters_with(sim, test, DuplicatePolicy::First)
}

/// Match simulation and test samples by parameter name
///
/// Names are visited in first-appearance order across the union of both
/// series (simulation side first). Only names present on both sides produce
/// a pair.
pub fn align_parameters_with(
    sim: &[ParameterSample],
    test: &[ParameterSample],
    policy: DuplicatePolicy,
) -> Vec<AlignedPair> {
    let mut seen = HashSet::new();
    let mut pairs = Vec::new();

    for name in sim.iter().chain(test).map(|s| s.parameter_name.as_str()) {
        if !seen.insert(name) {
            continue;
        }

        let (Some(sim_sample), Some(test_sample)) =
            (pick(sim, name, policy), pick(test, name, policy))
        else {
            tracing::debug!("Skipping '{}': not present in both series", name);
            continue;
        };

        if !sim_sample.unit.is_empty()
            && !test_sample.unit.is_empty()
            && sim_sample.unit != test_sample.unit
        {
            tracing::warn!(
                "Unit mismatch for '{}': simulation={} test={}",
                name,
                sim_sample.unit,
                test_sample.unit
            );
        }

        pairs.push(AlignedPair {
            parameter_name: name.to_string(),
            simulation_value: sim_sample.value,
            test_value: test_sample.value,
            unit: sim_sample.unit.clone(),
        });
    }

    pairs
}

fn pick<'a>(
    series: &'a [ParameterSample],
    name: &str,
    policy: DuplicatePolicy,
) -> Option<&'a ParameterSample> {
    let mut matches = series.iter().filter(|s| s.parameter_name == name);
    match policy {
        DuplicatePolicy::First => matches.next(),
        DuplicatePolicy::Last => matches.last(),
    }
}
