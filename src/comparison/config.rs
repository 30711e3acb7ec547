// Configuration for simulation-versus-measurement comparison
//
// Tolerance is a relative error in percent against the simulation value.
// The recommendation thresholds decide which advice accompanies a comparison.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for tolerance checks and comparison recommendations
///
/// # Example
/// ```
/// use simcheck::comparison::ComparisonConfig;
///
/// let config = ComparisonConfig::default();
/// assert_eq!(config.tolerance_percent, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Maximum relative error (percent) for a parameter to pass
    ///
    /// - 10.0 (default): general acceptance for component bench tests
    /// - 5.0: precision components (positioning accuracy, runout)
    /// - 20.0: early prototypes where models are still being calibrated
    pub tolerance_percent: f64,

    /// Average relative error (percent) above which the simulation model
    /// parameters should be reviewed
    ///
    /// Default: 10.0
    pub high_average_error_percent: f64,

    /// Minimum share of parameters within tolerance before recalibrating
    /// the test equipment is advised
    ///
    /// Default: 0.8 (80% pass rate)
    pub min_pass_ratio: f64,

    /// Relative error (percent) above which a parameter is singled out
    ///
    /// Default: 15.0
    pub attention_error_percent: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            tolerance_percent: 10.0,
            high_average_error_percent: 10.0,
            min_pass_ratio: 0.8,
            attention_error_percent: 15.0,
        }
    }
}

impl ComparisonConfig {
    /// Default configuration with a custom tolerance
    pub fn with_tolerance(tolerance_percent: f64) -> Self {
        Self {
            tolerance_percent,
            ..Self::default()
        }
    }

    /// Create a strict configuration for precision components
    pub fn strict() -> Self {
        Self {
            tolerance_percent: 5.0,
            high_average_error_percent: 5.0,
            min_pass_ratio: 0.9,
            attention_error_percent: 8.0,
        }
    }

    /// Create a permissive configuration for models still under calibration
    pub fn permissive() -> Self {
        Self {
            tolerance_percent: 20.0,
            high_average_error_percent: 20.0,
            min_pass_ratio: 0.6,
            attention_error_percent: 30.0,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let percents = [
            ("tolerance_percent", self.tolerance_percent),
            ("high_average_error_percent", self.high_average_error_percent),
            ("attention_error_percent", self.attention_error_percent),
        ];

        for (name, value) in percents {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.min_pass_ratio) {
            return Err(AnalysisError::InvalidConfig(format!(
                "min_pass_ratio must be in [0, 1], got {}",
                self.min_pass_ratio
            )));
        }

        Ok(())
    }
}
