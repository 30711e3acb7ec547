//! Parameter samples produced by simulation runs and bench measurements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded parameter value
///
/// Samples are immutable once recorded; the same type is used for both
/// simulation output and measured test data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSample {
    /// Parameter name (e.g., "max_spindle_speed", "static_stiffness")
    pub parameter_name: String,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    /// Measurement or simulation time, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ParameterSample {
    pub fn new(parameter_name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            value,
            unit: unit.into(),
            timestamp: None,
        }
    }

    /// Attach a timestamp to the sample
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Group samples by parameter name, keeping first-appearance order of names
/// and input order within each group
pub fn group_by_parameter<'a, I>(samples: I) -> Vec<(String, Vec<&'a ParameterSample>)>
where
    I: IntoIterator<Item = &'a ParameterSample>,
{
    let mut groups: Vec<(String, Vec<&'a ParameterSample>)> = Vec::new();

    for sample in samples {
        match groups
            .iter_mut()
            .find(|(name, _)| *name == sample.parameter_name)
        {
            Some((_, group)) => group.push(sample),
            None => groups.push((sample.parameter_name.clone(), vec![sample])),
        }
    }

    groups
}

/// Sort samples by timestamp; untimed samples keep their relative order and sort first
pub fn sort_by_timestamp(samples: &mut [ParameterSample]) {
    samples.sort_by_key(|s| s.timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_group_preserves_first_appearance_order() {
        let samples = vec![
            ParameterSample::new("temperature", 42.5, "°C"),
            ParameterSample::new("noise", 68.2, "dB"),
            ParameterSample::new("temperature", 43.0, "°C"),
        ];

        let groups = group_by_parameter(&samples);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "temperature");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].value, 43.0);
        assert_eq!(groups[1].0, "noise");
    }

    #[test]
    fn test_group_empty() {
        let samples: Vec<ParameterSample> = vec![];
        assert!(group_by_parameter(&samples).is_empty());
    }

    #[test]
    fn test_sort_by_timestamp_is_stable_for_untimed() {
        let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let t0 = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let mut samples = vec![
            ParameterSample::new("a", 3.0, "").at(t1),
            ParameterSample::new("a", 1.0, ""),
            ParameterSample::new("a", 2.0, "").at(t0),
            ParameterSample::new("a", 0.5, ""),
        ];

        sort_by_timestamp(&mut samples);

        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![1.0, 0.5, 2.0, 3.0]);
    }

    #[test]
    fn test_sample_json_shape() {
        let json = r#"{"parameter_name":"damping_ratio","value":0.032}"#;
        let sample: ParameterSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.parameter_name, "damping_ratio");
        assert_eq!(sample.unit, "");
        assert!(sample.timestamp.is_none());
    }
}
