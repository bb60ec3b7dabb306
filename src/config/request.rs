//! Input contract for one chart render

use super::ChartConfig;
use crate::constants::axis::{DEFAULT_X_NAME, DEFAULT_Y_NAME};
use crate::data::SampleSet;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_x_name() -> String {
    DEFAULT_X_NAME.to_string()
}

fn default_y_name() -> String {
    DEFAULT_Y_NAME.to_string()
}

/// Everything a caller supplies for one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    #[serde(default)]
    pub samples: SampleSet,

    /// Goal value; no goal line when absent
    #[serde(default)]
    pub goal: Option<f64>,

    #[serde(default = "default_x_name")]
    pub x_name: String,

    #[serde(default = "default_y_name")]
    pub y_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub config: ChartConfig,
}

impl Default for ChartRequest {
    fn default() -> Self {
        Self {
            samples: SampleSet::default(),
            goal: None,
            x_name: default_x_name(),
            y_name: default_y_name(),
            title: None,
            config: ChartConfig::default(),
        }
    }
}

impl ChartRequest {
    pub fn new(samples: SampleSet) -> Self {
        Self {
            samples,
            ..Self::default()
        }
    }

    pub fn with_goal(mut self, goal: Option<f64>) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_names(mut self, x_name: impl Into<String>, y_name: impl Into<String>) -> Self {
        self.x_name = x_name.into();
        self.y_name = y_name.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse a request from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a request from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

fn default_sort() -> bool {
    true
}

/// One bar of a Pareto chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub value: f64,
}

impl Category {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Input for a Pareto chart: category counts plus display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoRequest {
    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default = "default_x_name")]
    pub x_name: String,

    #[serde(default = "default_y_name")]
    pub y_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Order bars from largest to smallest; input order otherwise
    #[serde(default = "default_sort")]
    pub sort_descending: bool,

    #[serde(default)]
    pub config: ChartConfig,
}

impl Default for ParetoRequest {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            x_name: default_x_name(),
            y_name: default_y_name(),
            title: None,
            sort_descending: default_sort(),
            config: ChartConfig::default(),
        }
    }
}

impl ParetoRequest {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            ..Self::default()
        }
    }

    pub fn with_names(mut self, x_name: impl Into<String>, y_name: impl Into<String>) -> Self {
        self.x_name = x_name.into();
        self.y_name = y_name.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_input_order(mut self) -> Self {
        self.sort_descending = false;
        self
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
