//! Layout configuration: canvas, margins, control band and palette

use crate::constants::{axis, canvas, palette, spc};
use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Space reserved around the plot area for axes and labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: canvas::MARGIN_TOP,
            right: canvas::MARGIN_RIGHT,
            bottom: canvas::MARGIN_BOTTOM,
            left: canvas::MARGIN_LEFT,
        }
    }
}

/// Stroke colors per line role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub data: String,
    pub goal: String,
    pub mean: String,
    /// Shared by the upper and lower control limits
    pub limits: String,
    pub trendline: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            data: palette::DATA.to_string(),
            goal: palette::GOAL.to_string(),
            mean: palette::MEAN.to_string(),
            limits: palette::LIMITS.to_string(),
            trendline: palette::TREND.to_string(),
        }
    }
}

/// When the legend lists the goal row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalLegend {
    /// Only when a goal value is supplied
    #[default]
    WhenPresent,
    /// Always, even without a goal line
    Always,
}

/// Chart configuration with documented defaults, overridable per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Total canvas width including margins
    pub canvas_width: f64,

    /// Total canvas height including margins
    pub canvas_height: f64,

    pub margins: Margins,

    /// Control limits sit at mean ± sigma_multiplier × std dev (default: 1.0)
    pub sigma_multiplier: f64,

    /// Padding added to both ends of the y domain (default: 2.0)
    pub domain_padding: f64,

    /// Lower bound of the x domain (default: 1.0)
    pub x_domain_start: f64,

    /// Tick count hint for the y axis (default: 10)
    pub y_tick_count: usize,

    pub goal_legend: GoalLegend,

    pub palette: Palette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            canvas_width: canvas::DEFAULT_WIDTH,
            canvas_height: canvas::DEFAULT_HEIGHT,
            margins: Margins::default(),
            sigma_multiplier: spc::DEFAULT_SIGMA,
            domain_padding: axis::DEFAULT_DOMAIN_PADDING,
            x_domain_start: axis::DEFAULT_X_DOMAIN_START,
            y_tick_count: axis::DEFAULT_Y_TICK_COUNT,
            goal_legend: GoalLegend::default(),
            palette: Palette::default(),
        }
    }
}

impl ChartConfig {
    /// Create a new ChartConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the canvas so the drawable area is exactly `width` x `height`
    pub fn with_plot_size(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width + self.margins.left + self.margins.right;
        self.canvas_height = height + self.margins.top + self.margins.bottom;
        self
    }

    /// Drawable width: canvas minus left and right margins
    pub fn plot_width(&self) -> f64 {
        self.canvas_width - self.margins.left - self.margins.right
    }

    /// Drawable height: canvas minus top and bottom margins
    pub fn plot_height(&self) -> f64 {
        self.canvas_height - self.margins.top - self.margins.bottom
    }

    /// Check that every value can produce a drawable layout
    pub fn validate(&self) -> Result<()> {
        let (width, height) = (self.plot_width(), self.plot_height());
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ChartError::InvalidDimensions { width, height });
        }
        if !(self.sigma_multiplier.is_finite() && self.sigma_multiplier >= 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "sigma_multiplier must be a non-negative number, got {}",
                self.sigma_multiplier
            )));
        }
        if !(self.domain_padding.is_finite() && self.domain_padding >= 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "domain_padding must be a non-negative number, got {}",
                self.domain_padding
            )));
        }
        if !self.x_domain_start.is_finite() {
            return Err(ChartError::InvalidConfig(
                "x_domain_start must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
