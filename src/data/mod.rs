pub mod regression;
pub mod sample;
pub mod stats;

// Re-export key types for convenience
pub use regression::{LinearFit, TrendPoint, TrendlineSegment, compute_trendline, fit_line};
pub use sample::{RawLabel, RawSample, Sample, SampleSet};
pub use stats::{Statistics, compute_statistics, compute_statistics_with_sigma};
