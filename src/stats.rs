//! Descriptive statistics and histograms over parameter values
//!
//! Variance is the population variance (divide by n), not the sample
//! variance: a session's samples are treated as the whole population.

use crate::error::{ensure_finite, AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Default number of histogram bins
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Upper bound on histogram bins
pub const MAX_HISTOGRAM_BINS: usize = 10_000;

/// Summary statistics for one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    pub mean: f64,
    pub median: f64,
    /// Population variance
    pub variance: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// One equal-width histogram bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Display label, e.g. "1.00-1.50"
    pub range: String,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram spanning [min, max]
///
/// Every bin is inclusive-low/exclusive-high except the last, which is
/// inclusive on both ends, so each value falls in exactly one bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Total number of values across all bins
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Compute count, mean, median, population variance/stddev and extrema
///
/// # Example
/// ```
/// use simcheck::stats::summarize_statistics;
///
/// let s = summarize_statistics(&[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(s.mean, 2.5);
/// assert_eq!(s.median, 2.5);
/// assert_eq!(s.variance, 1.25);
/// ```
pub fn summarize_statistics(values: &[f64]) -> Result<StatSummary> {
    ensure_finite(values, "statistics summary")?;

    let count = values.len();
    let n = count as f64;
    let mean = mean(values);

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if !variance.is_finite() {
        return Err(AnalysisError::InvalidInput(
            "value spread exceeds the f64 range".to_string(),
        ));
    }

    Ok(StatSummary {
        mean,
        median,
        variance,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[count - 1],
        count,
    })
}

/// Arithmetic mean of a non-empty finite slice
///
/// Falls back to a running mean when the plain sum overflows, so values near
/// the f64 limits still average to a finite result.
pub(crate) fn mean(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        return sum / n;
    }

    let mut mean = 0.0;
    for (i, &v) in values.iter().enumerate() {
        let k = (i + 1) as f64;
        mean += v / k - mean / k;
    }
    mean
}

/// Bucket values into `bins` equal-width bins between their min and max
///
/// When all values are equal the bin width is zero and every value lands in
/// the first bin. `bins` must lie in `1..=MAX_HISTOGRAM_BINS`.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram> {
    if bins == 0 || bins > MAX_HISTOGRAM_BINS {
        return Err(AnalysisError::InvalidInput(format!(
            "histogram bins must be between 1 and {}, got {}",
            MAX_HISTOGRAM_BINS, bins
        )));
    }
    ensure_finite(values, "histogram")?;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Divide before subtracting so a span wider than f64::MAX stays finite
    let width = max / bins as f64 - min / bins as f64;

    let edge = |i: usize| match i {
        0 => min,
        i if i == bins => max,
        i => min + i as f64 * width,
    };

    let mut counts = vec![0usize; bins];
    for &v in values {
        counts[bin_index(v, min, width, bins, &edge)] += 1;
    }

    let bins: Vec<HistogramBin> = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let (lower, upper) = (edge(i), edge(i + 1));
            HistogramBin {
                range: format!("{:.2}-{:.2}", lower, upper),
                lower,
                upper,
                count,
            }
        })
        .collect();

    Ok(Histogram { bins })
}

fn bin_index(v: f64, min: f64, width: f64, bins: usize, edge: &impl Fn(usize) -> f64) -> usize {
    if width == 0.0 {
        return 0;
    }

    let mut idx = (((v - min) / width).floor() as usize).min(bins - 1);

    // Settle rounding at bin edges against the same edges used for labels
    while idx > 0 && v < edge(idx) {
        idx -= 1;
    }
    while idx < bins - 1 && v >= edge(idx + 1) {
        idx += 1;
    }

    idx
}
