//! Linear scales from data units to pixels, plus "nice" tick generation

use crate::config::ChartConfig;
use crate::data::SampleSet;
use crate::error::{ChartError, Result};
use serde::Serialize;

/// Affine mapping from `[domain.0, domain.1]` to `[range.0, range.1]`.
///
/// No clamping: values outside the domain map outside the range. A domain
/// with zero span maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a data value to pixel space
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        r0 + t * (r1 - r0)
    }

    /// Map a pixel back to data units
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        let t = if span == 0.0 { 0.5 } else { (pixel - r0) / span };
        d0 + t * (d1 - d0)
    }

    /// Tick values for roughly `count` ticks within the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// The x and y scales of one render pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
}

/// Build scales with the default domain rules (x from 1, y padded by 2)
pub fn build_scales(samples: &SampleSet, plot_width: f64, plot_height: f64) -> Result<Scales> {
    let config = ChartConfig::default().with_plot_size(plot_width, plot_height);
    build_scales_with(samples, &config)
}

/// Build scales for the plot area described by `config`.
///
/// The x domain is `[x_domain_start, max(x)]`: x is treated as a sequence
/// index, so the lower bound ignores the actual minimum. The y domain is
/// `[min(y) - padding, max(y) + padding]` and its pixel range is inverted.
pub fn build_scales_with(samples: &SampleSet, config: &ChartConfig) -> Result<Scales> {
    let insufficient = || ChartError::InsufficientData {
        operation: "scale domain".to_string(),
        required: 1,
        actual: 0,
    };
    let x_max = samples.x_max().ok_or_else(insufficient)?;
    let (y_min, y_max) = samples.y_extent().ok_or_else(insufficient)?;
    let padding = config.domain_padding;

    Ok(Scales {
        x: LinearScale::new((config.x_domain_start, x_max), (0.0, config.plot_width())),
        y: LinearScale::new(
            (y_min - padding, y_max + padding),
            (config.plot_height(), 0.0),
        ),
    })
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Round half toward positive infinity
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Integer tick bounds and increment for an ascending interval.
/// A negative increment means "divide by -inc" to avoid fractional steps.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * scale);
        i2 = round_half_up(stop * scale);
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        inc = -scale;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = round_half_up(start / step);
        i2 = round_half_up(stop / step);
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Evenly spaced "nice" values (1, 2 or 5 times a power of ten) inside
/// `[start, stop]`, approximately `count` of them.
///
/// Returned in the direction of the interval: descending when `stop < start`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if !(i2 >= i1) || !inc.is_finite() {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let value = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| {
            let k = if reverse { i2 - i as f64 } else { i1 + i as f64 };
            value(k)
        })
        .collect()
}
