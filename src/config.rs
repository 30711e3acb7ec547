//! Analysis configuration loaded from `simcheck.toml`
//!
//! # Example simcheck.toml
//!
//! ```toml
//! duplicate_policy = "first"
//!
//! [comparison]
//! tolerance_percent = 10.0
//! attention_error_percent = 15.0
//!
//! [trend]
//! stable_slope_threshold = 0.01
//! forecast_steps = 5
//!
//! [statistics]
//! histogram_bins = 10
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use crate::align::DuplicatePolicy;
use crate::comparison::ComparisonConfig;
use crate::error::AnalysisError;
use crate::stats::{DEFAULT_HISTOGRAM_BINS, MAX_HISTOGRAM_BINS};
use crate::trend::{DEFAULT_STABLE_SLOPE, MAX_FORECAST_STEPS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Trend estimation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Slope magnitude below which a series is reported as stable
    pub stable_slope_threshold: f64,
    /// Samples to extrapolate past the end of each series (0 disables forecasts)
    pub forecast_steps: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            stable_slope_threshold: DEFAULT_STABLE_SLOPE,
            forecast_steps: 0,
        }
    }
}

/// Distribution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    pub histogram_bins: usize,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

/// Root configuration for simcheck.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub duplicate_policy: DuplicatePolicy,
    pub comparison: ComparisonConfig,
    pub trend: TrendConfig,
    pub statistics: StatisticsConfig,
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    ///
    /// ```no_run
    /// use simcheck::config::AnalysisConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = AnalysisConfig::from_file("simcheck.toml")?;
    /// println!("tolerance: {}%", config.comparison.tolerance_percent);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Load configuration from a TOML string and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.comparison.validate()?;

        let threshold = self.trend.stable_slope_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "stable_slope_threshold must be a non-negative number, got {}",
                threshold
            )));
        }

        if self.trend.forecast_steps > MAX_FORECAST_STEPS {
            return Err(AnalysisError::InvalidConfig(format!(
                "forecast_steps must be <= {}, got {}",
                MAX_FORECAST_STEPS, self.trend.forecast_steps
            )));
        }

        let bins = self.statistics.histogram_bins;
        if bins == 0 || bins > MAX_HISTOGRAM_BINS {
            return Err(AnalysisError::InvalidConfig(format!(
                "histogram_bins must be between 1 and {}, got {}",
                MAX_HISTOGRAM_BINS, bins
            )));
        }

        Ok(())
    }
}
