//! Least-squares trendline over a sample set

use super::SampleSet;
use crate::error::{ChartError, Result};
use serde::Serialize;

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; `None` when y has no variance or it overflows
    pub r_squared: Option<f64>,
}

impl LinearFit {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Endpoint of a trendline in data units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub x: f64,
    pub y: f64,
}

/// The fitted line evaluated at the smallest and largest sample x
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendlineSegment {
    pub start: TrendPoint,
    pub end: TrendPoint,
    pub fit: LinearFit,
}

impl TrendlineSegment {
    pub fn points(&self) -> [TrendPoint; 2] {
        [self.start, self.end]
    }
}

/// Ordinary least-squares fit using the closed-form normal equations.
///
/// All x identical leaves the slope undefined and fails with
/// [`ChartError::DegenerateRegression`] instead of producing NaN or infinity.
#[profiling::function]
pub fn fit_line(samples: &SampleSet) -> Result<LinearFit> {
    let (x_min, x_max) = samples.x_extent().ok_or(ChartError::EmptyData)?;
    if x_min == x_max {
        return Err(ChartError::DegenerateRegression {
            x: x_min,
            count: samples.len(),
        });
    }

    let n = samples.len() as f64;
    let sum_x: f64 = samples.iter().map(|s| s.x()).sum();
    let sum_y: f64 = samples.iter().map(|s| s.y()).sum();
    let sum_xy: f64 = samples.iter().map(|s| s.x() * s.y()).sum();
    let sum_x2: f64 = samples.iter().map(|s| s.x() * s.x()).sum();

    // Distinct x guarantee a positive denominator; anything else is lost range
    let denominator = n * sum_x2 - sum_x * sum_x;
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    let usable = denominator.is_finite() && denominator > 0.0;
    if !(usable && slope.is_finite() && intercept.is_finite()) {
        return Err(ChartError::NumericOverflow {
            operation: "trendline".to_string(),
        });
    }

    // Calculate R²
    let mean_y = sum_y / n;
    let ss_tot: f64 = samples.iter().map(|s| (s.y() - mean_y).powi(2)).sum();
    let ss_res: f64 = samples
        .iter()
        .map(|s| (s.y() - (slope * s.x() + intercept)).powi(2))
        .sum();
    let r_squared = (ss_tot > 0.0)
        .then(|| 1.0 - ss_res / ss_tot)
        .filter(|r2| r2.is_finite());

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Two-point trendline spanning min(x) to max(x) of the samples
pub fn compute_trendline(samples: &SampleSet) -> Result<TrendlineSegment> {
    let fit = fit_line(samples)?;
    let (x_min, x_max) = samples.x_extent().ok_or(ChartError::EmptyData)?;
    let (y_start, y_end) = (fit.evaluate(x_min), fit.evaluate(x_max));
    if !(y_start.is_finite() && y_end.is_finite()) {
        return Err(ChartError::NumericOverflow {
            operation: "trendline".to_string(),
        });
    }

    Ok(TrendlineSegment {
        start: TrendPoint {
            x: x_min,
            y: y_start,
        },
        end: TrendPoint { x: x_max, y: y_end },
        fit,
    })
}
