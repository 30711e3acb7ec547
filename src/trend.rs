//! Linear trend estimation over index-ordered series
//!
//! The x-axis is the position of a value in time order, not wall-clock time:
//! samples are assumed evenly spaced. Slope comes from ordinary least squares
//! and strength from the Pearson correlation coefficient.

use crate::error::{ensure_all_finite, AnalysisError, Result};
use crate::stats::mean;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slope magnitude below which a series counts as stable
pub const DEFAULT_STABLE_SLOPE: f64 = 0.01;

/// Direction of a fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        };
        f.write_str(s)
    }
}

/// Fitted trend of one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// Change in value per sample
    pub slope: f64,
    /// Pearson r in [-1, 1]; 0 when either axis has no variance
    pub correlation: f64,
}

impl TrendResult {
    /// Result for series too short to fit
    pub fn degenerate() -> Self {
        Self {
            direction: TrendDirection::Stable,
            slope: 0.0,
            correlation: 0.0,
        }
    }
}

/// One extrapolated point past the end of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Sample index the value is predicted for (continues after the last input)
    pub index: usize,
    pub value: f64,
}

/// Upper bound on forecast length
pub const MAX_FORECAST_STEPS: usize = 10_000;

/// Least-squares fit over x = 0..n-1 with both axes centered on their means
///
/// Deviations in y are scaled by their largest magnitude before squaring, so
/// series near the f64 limits keep a finite correlation.
struct LineFit {
    slope: f64,
    intercept: f64,
    correlation: f64,
}

impl LineFit {
    /// Fit a line through at least two finite values
    fn new(values: &[f64]) -> Result<Self> {
        let x_mean = (values.len() - 1) as f64 / 2.0;
        let y_mean = mean(values);

        let scale = values
            .iter()
            .map(|y| (y - y_mean).abs())
            .fold(0.0, f64::max);
        if !scale.is_finite() {
            return Err(AnalysisError::InvalidInput(
                "series spread exceeds the f64 range".to_string(),
            ));
        }
        if scale == 0.0 {
            return Ok(Self {
                slope: 0.0,
                intercept: y_mean,
                correlation: 0.0,
            });
        }

        let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            let dy = (y - y_mean) / scale;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }

        // n >= 2 keeps sxx strictly positive
        let slope = scale * (sxy / sxx);
        if !slope.is_finite() {
            return Err(AnalysisError::InvalidInput(
                "trend slope exceeds the f64 range".to_string(),
            ));
        }

        // Rounding can push |r| a hair past 1 on perfectly linear input
        let correlation = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);

        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
            correlation,
        })
    }
}

/// Estimate the trend of an ordered series with the default stability threshold
///
/// # Example
/// ```
/// use simcheck::trend::{estimate_trend, TrendDirection};
///
/// let trend = estimate_trend(&[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(trend.direction, TrendDirection::Increasing);
/// assert!((trend.slope - 1.0).abs() < 1e-12);
/// ```
pub fn estimate_trend(values: &[f64]) -> Result<TrendResult> {
    estimate_trend_with(values, DEFAULT_STABLE_SLOPE)
}

/// Estimate the trend of an ordered series
///
/// Fewer than two points yield a stable, zero-slope, zero-correlation result.
/// Any NaN or infinite value is rejected.
pub fn estimate_trend_with(values: &[f64], stable_slope_threshold: f64) -> Result<TrendResult> {
    ensure_all_finite(values)?;

    if values.len() < 2 {
        tracing::debug!("Trend over {} point(s) is degenerate", values.len());
        return Ok(TrendResult::degenerate());
    }

    let fit = LineFit::new(values)?;

    let direction = if fit.slope == 0.0 || fit.slope.abs() < stable_slope_threshold {
        TrendDirection::Stable
    } else if fit.slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    Ok(TrendResult {
        direction,
        slope: fit.slope,
        correlation: fit.correlation,
    })
}

/// Extrapolate the least-squares line `steps` samples past the end of the series
pub fn forecast(values: &[f64], steps: usize) -> Result<Vec<ForecastPoint>> {
    if values.len() < 2 {
        return Err(AnalysisError::DegenerateSeries {
            required: 2,
            actual: values.len(),
        });
    }
    ensure_all_finite(values)?;

    if steps > MAX_FORECAST_STEPS {
        return Err(AnalysisError::InvalidInput(format!(
            "forecast steps must be at most {}, got {}",
            MAX_FORECAST_STEPS, steps
        )));
    }
    let end = values
        .len()
        .checked_add(steps)
        .ok_or_else(|| AnalysisError::InvalidInput("forecast index overflows".to_string()))?;

    let fit = LineFit::new(values)?;

    Ok((values.len()..end)
        .map(|index| ForecastPoint {
            index,
            value: fit.intercept + fit.slope * index as f64,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_increasing_line() {
        let trend = estimate_trend(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert!((trend.slope - 1.0).abs() < 1e-12);
        assert!((trend.correlation - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_decreasing_line() {
        let trend = estimate_trend(&[10.0, 8.0, 6.0, 4.0, 2.0]).unwrap();
        assert_eq!(trend.direction, TrendDirection::Decreasing);
        assert!((trend.slope + 2.0).abs() < 1e-12);
        assert!((trend.correlation + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_point_degenerate() {
        let trend = estimate_trend(&[5.0]).unwrap();
        assert_eq!(trend, TrendResult::degenerate());
    }

    #[test]
    fn test_empty_degenerate() {
        assert_eq!(estimate_trend(&[]).unwrap(), TrendResult::degenerate());
    }

    #[test]
    fn test_constant_series_zero_correlation() {
        let trend = estimate_trend(&[3.0, 3.0, 3.0, 3.0]).unwrap();
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.slope, 0.0);
        assert_eq!(trend.correlation, 0.0);

        let zero_threshold = estimate_trend_with(&[3.0, 3.0], 0.0).unwrap();
        assert_eq!(zero_threshold.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_small_slope_is_stable() {
        let trend = estimate_trend(&[100.0, 100.005, 100.01]).unwrap();
        assert!(trend.slope > 0.0);
        assert_eq!(trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_custom_stable_threshold() {
        let values = [1.0, 1.5, 2.0];
        assert_eq!(estimate_trend(&values).unwrap().direction, TrendDirection::Increasing);
        assert_eq!(
            estimate_trend_with(&values, 1.0).unwrap().direction,
            TrendDirection::Stable
        );
    }

    #[test]
    fn test_noisy_upward_series() {
        let trend = estimate_trend(&[1.0, 3.0, 2.0, 4.0, 3.5, 5.0]).unwrap();
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert!(trend.correlation > 0.8 && trend.correlation < 1.0);
    }

    #[test]
    fn test_forecast_extends_line() {
        let points = forecast(&[2.0, 4.0, 6.0], 2).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].index, 3);
        assert!((points[0].value - 8.0).abs() < 1e-12);
        assert!((points[1].value - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_forecast_zero_steps() {
        assert!(forecast(&[1.0, 2.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_forecast_degenerate() {
        let err = forecast(&[1.0], 3).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::DegenerateSeries {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(matches!(
            estimate_trend(&[1.0, f64::NAN, 3.0]),
            Err(AnalysisError::NonFiniteValue { index: 1, .. })
        ));
        assert!(matches!(
            estimate_trend(&[f64::INFINITY]),
            Err(AnalysisError::NonFiniteValue { index: 0, .. })
        ));
        assert!(matches!(
            forecast(&[1.0, 2.0, f64::NEG_INFINITY], 2),
            Err(AnalysisError::NonFiniteValue { index: 2, .. })
        ));
    }

    #[test]
    fn test_forecast_step_cap() {
        assert!(matches!(
            forecast(&[1.0, 2.0], usize::MAX),
            Err(AnalysisError::InvalidInput(_))
        ));
        let points = forecast(&[1.0, 2.0], MAX_FORECAST_STEPS).unwrap();
        assert_eq!(points.len(), MAX_FORECAST_STEPS);
    }

    #[test]
    fn test_huge_linear_series_keeps_correlation() {
        let trend = estimate_trend(&[0.0, 1e200, 2e200, 3e200]).unwrap();
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert!((trend.slope / 1e200 - 1.0).abs() < 1e-12);
        assert!((trend.correlation - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&TrendDirection::Increasing).unwrap();
        assert_eq!(json, r#""increasing""#);
    }
}
