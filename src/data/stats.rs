use super::SampleSet;
use crate::constants::spc::{DEFAULT_SIGMA, MIN_DEVIATION_SAMPLES};
use crate::error::{ChartError, Result};
use serde::Serialize;

/// Statistics snapshot of a sample set.
///
/// Recomputed from scratch whenever the samples change; never updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub mean: f64,
    /// Sample standard deviation (n - 1 divisor)
    pub std_dev: f64,
    pub upper_control_limit: f64,
    pub lower_control_limit: f64,
    pub count: usize,
}

impl Statistics {
    /// Half-width of the control band
    pub fn band_half_width(&self) -> f64 {
        self.upper_control_limit - self.mean
    }
}

/// Calculate mean, standard deviation and the ±1σ control limits
pub fn compute_statistics(samples: &SampleSet) -> Result<Statistics> {
    compute_statistics_with_sigma(samples, DEFAULT_SIGMA)
}

/// Calculate statistics with control limits at `mean ± sigma * std_dev`.
///
/// Fails with [`ChartError::EmptyData`] for no samples and
/// [`ChartError::InsufficientData`] for a single sample, whose sample standard
/// deviation is undefined.
#[profiling::function]
pub fn compute_statistics_with_sigma(samples: &SampleSet, sigma: f64) -> Result<Statistics> {
    let count = samples.len();
    if count == 0 {
        return Err(ChartError::EmptyData);
    }
    if count < MIN_DEVIATION_SAMPLES {
        return Err(ChartError::InsufficientData {
            operation: "standard deviation".to_string(),
            required: MIN_DEVIATION_SAMPLES,
            actual: count,
        });
    }

    let n = count as f64;
    let mean = finite(
        samples.iter().map(|s| s.y()).sum::<f64>() / n,
        "mean",
    )?;
    let variance = samples
        .iter()
        .map(|s| (s.y() - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    let std_dev = finite(variance.sqrt(), "standard deviation")?;
    let spread = sigma * std_dev;

    Ok(Statistics {
        mean,
        std_dev,
        upper_control_limit: finite(mean + spread, "control limits")?,
        lower_control_limit: finite(mean - spread, "control limits")?,
        count,
    })
}

/// Finite inputs can still overflow once summed or squared
fn finite(value: f64, operation: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::NumericOverflow {
            operation: operation.to_string(),
        })
    }
}
