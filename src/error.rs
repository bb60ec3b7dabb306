//! Error types for control chart computation
//!
//! Every failure of the pipeline is reported through [`ChartError`]. The layout
//! stage wraps whatever went wrong underneath in a [`LayoutError`] so callers get
//! a single type from `build_drawing_plan` while the original cause stays reachable.

use thiserror::Error;

/// Main error type for control chart operations
#[derive(Error, Debug)]
pub enum ChartError {
    /// The sample set has no observations
    #[error("Sample set is empty")]
    EmptyData,

    /// Too few samples for the requested computation
    #[error("Insufficient data: {operation} requires at least {required} samples, but got {actual}")]
    InsufficientData {
        operation: String,
        required: usize,
        actual: usize,
    },

    /// All samples share one x value, so the slope is undefined
    #[error("Degenerate regression: all {count} samples share x = {x}")]
    DegenerateRegression { x: f64, count: usize },

    /// An x label could not be read as a number
    #[error("Sample {index} has a non-numeric x label '{label}'")]
    InvalidLabel { index: usize, label: String },

    /// NaN or infinite coordinate
    #[error("Sample {index} has a non-finite {axis} value")]
    NonFiniteValue { index: usize, axis: char },

    /// Finite inputs whose intermediate sums left the f64 range
    #[error("Numeric overflow while computing {operation}")]
    NumericOverflow { operation: String },

    /// Category value below zero
    #[error("Category {index} has a negative value {value}")]
    NegativeValue { index: usize, value: f64 },

    /// Every category is zero, so no cumulative share exists
    #[error("All {count} categories are zero")]
    ZeroTotal { count: usize },

    /// Plot area is empty, negative or not finite
    #[error("Invalid plot area: {width} x {height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// Configuration value out of range
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// Drawing plan could not be built
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for control chart operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// Failure of the layout pipeline, carrying the stage error that caused it.
///
/// The plan is never built partially: whenever this is returned, no plan exists.
#[derive(Error, Debug)]
#[error("Failed to build drawing plan: {cause}")]
pub struct LayoutError {
    #[source]
    cause: Box<ChartError>,
}

impl LayoutError {
    pub fn new(cause: ChartError) -> Self {
        Self {
            cause: Box::new(cause),
        }
    }

    /// The underlying stage error
    pub fn cause(&self) -> &ChartError {
        &self.cause
    }

    pub fn into_cause(self) -> ChartError {
        *self.cause
    }
}

impl From<ChartError> for LayoutError {
    fn from(cause: ChartError) -> Self {
        // Avoid nesting a layout failure inside another one
        match cause {
            ChartError::Layout(inner) => inner,
            other => Self::new(other),
        }
    }
}

/// Display-friendly error message formatting
impl ChartError {
    /// Get a user-friendly error message suitable for a dashboard placeholder
    pub fn user_message(&self) -> String {
        match self {
            ChartError::EmptyData => "No data to chart".to_string(),
            ChartError::InsufficientData {
                operation,
                required,
                actual,
            } => {
                format!(
                    "{} requires {} samples, but only {} available",
                    operation, required, actual
                )
            }
            ChartError::DegenerateRegression { x, .. } => {
                format!("Cannot fit a trend line: every sample has x = {}", x)
            }
            ChartError::InvalidLabel { index, label } => {
                format!("Sample {}: '{}' is not a number", index, label)
            }
            ChartError::NonFiniteValue { index, axis } => {
                format!("Sample {}: {} must be a finite number", index, axis)
            }
            ChartError::NumericOverflow { operation } => {
                format!("Values are too large to compute {}", operation)
            }
            ChartError::NegativeValue { index, value } => {
                format!("Category {}: {} is negative", index, value)
            }
            ChartError::ZeroTotal { .. } => "Every category is zero".to_string(),
            ChartError::InvalidDimensions { width, height } => {
                format!("Plot area {}x{} is not drawable", width, height)
            }
            ChartError::InvalidConfig(msg) => format!("Config error: {}", msg),
            ChartError::Layout(e) => e.cause().user_message(),
            ChartError::FileIo(e) => format!("File error: {}", e),
            ChartError::Json(e) => format!("JSON error: {}", e),
        }
    }

    /// Get a short title for the error
    pub fn title(&self) -> &'static str {
        match self {
            ChartError::EmptyData => "Empty Data",
            ChartError::InsufficientData { .. } => "Insufficient Data",
            ChartError::DegenerateRegression { .. } => "Degenerate Regression",
            ChartError::InvalidLabel { .. } => "Invalid Label",
            ChartError::NonFiniteValue { .. } => "Invalid Value",
            ChartError::NumericOverflow { .. } => "Numeric Overflow",
            ChartError::NegativeValue { .. } => "Invalid Value",
            ChartError::ZeroTotal { .. } => "Empty Data",
            ChartError::InvalidDimensions { .. } => "Invalid Dimensions",
            ChartError::InvalidConfig(_) => "Configuration Error",
            ChartError::Layout(e) => e.cause().title(),
            ChartError::FileIo(_) => "File Error",
            ChartError::Json(_) => "JSON Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_messages() {
        let err = ChartError::InvalidLabel {
            index: 3,
            label: "2024-07-08".to_string(),
        };
        assert_eq!(err.user_message(), "Sample 3: '2024-07-08' is not a number");
        assert_eq!(err.title(), "Invalid Label");

        let err = ChartError::InsufficientData {
            operation: "standard deviation".to_string(),
            required: 2,
            actual: 1,
        };
        assert_eq!(
            err.user_message(),
            "standard deviation requires 2 samples, but only 1 available"
        );
        assert_eq!(
            err.to_string(),
            "Insufficient data: standard deviation requires at least 2 samples, but got 1"
        );
    }

    #[test]
    fn test_layout_error_keeps_cause() {
        let err = LayoutError::from(ChartError::EmptyData);
        assert!(matches!(err.cause(), ChartError::EmptyData));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Failed to build drawing plan: Sample set is empty");
    }

    #[test]
    fn test_layout_error_does_not_nest() {
        let inner = LayoutError::new(ChartError::DegenerateRegression { x: 5.0, count: 3 });
        let outer = LayoutError::from(ChartError::Layout(inner));
        assert!(matches!(
            outer.cause(),
            ChartError::DegenerateRegression { count: 3, .. }
        ));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let chart_err: ChartError = io_err.into();
        assert!(matches!(chart_err, ChartError::FileIo(_)));

        let overflow = ChartError::NumericOverflow {
            operation: "standard deviation".to_string(),
        };
        assert_eq!(overflow.title(), "Numeric Overflow");
        assert_eq!(
            overflow.user_message(),
            "Values are too large to compute standard deviation"
        );

        let layout: ChartError = LayoutError::new(ChartError::EmptyData).into();
        assert_eq!(layout.title(), "Empty Data");
        assert_eq!(layout.user_message(), "No data to chart");
    }
}
