//! Sample observations and the validated, ordered set the pipeline consumes

use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};

/// One (x, y) observation.
///
/// The x label arrives as text in the input contract but is parsed exactly once,
/// here. Both coordinates are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    x: f64,
    y: f64,
}

impl Sample {
    /// Create a sample from numeric coordinates
    pub fn new(x: f64, y: f64) -> Result<Self> {
        Self::checked(0, x, y)
    }

    /// Create a sample from a text x label such as `"3"` or `"1.5e2"`
    pub fn parse(label: &str, y: f64) -> Result<Self> {
        Self::parse_at(0, label, y)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    fn parse_at(index: usize, label: &str, y: f64) -> Result<Self> {
        let x = label
            .trim()
            .parse::<f64>()
            .map_err(|_| ChartError::InvalidLabel {
                index,
                label: label.to_string(),
            })?;
        Self::checked(index, x, y)
    }

    fn checked(index: usize, x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() {
            return Err(ChartError::NonFiniteValue { index, axis: 'x' });
        }
        if !y.is_finite() {
            return Err(ChartError::NonFiniteValue { index, axis: 'y' });
        }
        Ok(Self { x, y })
    }
}

/// X label as it appears on the wire: text (`"3"`) or a bare number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Number(f64),
    Text(String),
}

/// Unvalidated sample as received from the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub x: RawLabel,
    pub y: f64,
}

/// Ordered collection of samples in sequence (chronological) order.
///
/// May be empty; x values need not be distinct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RawSample>", into = "Vec<RawSample>")]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Build from numeric pairs, rejecting non-finite coordinates
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        pairs
            .iter()
            .enumerate()
            .map(|(index, &(x, y))| Sample::checked(index, x, y))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Build from text labels, parsing each label once
    pub fn from_labels<S: AsRef<str>>(labels: &[(S, f64)]) -> Result<Self> {
        labels
            .iter()
            .enumerate()
            .map(|(index, (label, y))| Sample::parse_at(index, label.as_ref(), *y))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// `(min x, max x)`, or `None` when empty
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        extent(self.samples.iter().map(Sample::x))
    }

    /// `(min y, max y)`, or `None` when empty
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        extent(self.samples.iter().map(Sample::y))
    }

    pub fn x_max(&self) -> Option<f64> {
        self.x_extent().map(|(_, max)| max)
    }
}

impl TryFrom<Vec<RawSample>> for SampleSet {
    type Error = ChartError;

    fn try_from(raw: Vec<RawSample>) -> Result<Self> {
        raw.into_iter()
            .enumerate()
            .map(|(index, sample)| match sample.x {
                RawLabel::Number(x) => Sample::checked(index, x, sample.y),
                RawLabel::Text(label) => Sample::parse_at(index, &label, sample.y),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }
}

impl From<SampleSet> for Vec<RawSample> {
    fn from(set: SampleSet) -> Self {
        set.samples
            .into_iter()
            .map(|s| RawSample {
                x: RawLabel::Number(s.x),
                y: s.y,
            })
            .collect()
    }
}

impl FromIterator<Sample> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
