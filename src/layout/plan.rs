//! Renderer-agnostic drawing plan: the only artifact handed to a renderer

use super::LinearScale;
use super::render::Renderer;
use crate::data::{Statistics, TrendlineSegment};
use crate::error::Result;
use serde::Serialize;

/// What a line on the chart represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    Data,
    Goal,
    Mean,
    UpperLimit,
    LowerLimit,
    Trendline,
    /// Running share of the total on a Pareto chart
    Cumulative,
}

/// Pixel-space point, relative to the plot area origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Stroke style of a line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    /// Dash/gap lengths; `None` draws a solid line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<f64>>,
}

impl Stroke {
    pub fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: None,
        }
    }

    pub fn dashed(color: &str, width: f64, pattern: &[f64]) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: Some(pattern.to_vec()),
        }
    }
}

/// One poly-line of the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSpec {
    pub role: LineRole,
    pub points: Vec<Point>,
    pub stroke: Stroke,
}

/// Legend row identity; both control limits share one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendKey {
    Data,
    Goal,
    Mean,
    ControlLimits,
    Trendline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPosition {
    Bottom,
    Left,
    Right,
}

/// How tick values are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TickFormat {
    #[default]
    Number,
    /// Value is already in percent; printed with a `%` suffix
    Percent,
}

impl TickFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormat::Number => format!("{value}"),
            TickFormat::Percent => format!("{value}%"),
        }
    }
}

/// Axis for a linear scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub position: AxisPosition,
    pub label: String,
    pub scale: LinearScale,
    /// Tick count requested from the renderer
    pub tick_count: usize,
    /// Nice tick values for that count
    pub ticks: Vec<f64>,
    /// Translation of the axis within the plot area
    pub offset: Point,
    /// Tick label rotation in degrees
    pub label_rotation: f64,
    pub tick_format: TickFormat,
    /// Tick and label color; renderer default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One labeled band on a categorical axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTick {
    pub label: String,
    /// Pixel x of the band center
    pub position: f64,
}

/// Axis with one tick per category instead of a linear scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAxis {
    pub label: String,
    pub ticks: Vec<CategoryTick>,
    pub offset: Point,
    pub label_rotation: f64,
}

/// Filled rectangle for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    pub rect: Rect,
    pub color: String,
}

/// Colored swatch plus right-anchored label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub key: LegendKey,
    pub color: String,
    pub label: String,
    pub swatch: Rect,
    /// Anchor point of the label text (text ends here)
    pub label_anchor: Point,
}

/// Canvas size and where the plot area sits on it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    /// Plot area origin (left and top margins)
    pub origin: Point,
    pub plot_width: f64,
    pub plot_height: f64,
}

/// Complete, renderer-agnostic description of a control chart.
///
/// Built all-or-nothing by the layout builder; equal inputs yield equal plans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawingPlan {
    pub canvas: Canvas,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub statistics: Statistics,
    pub trendline: TrendlineSegment,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    /// Lines in drawing order
    pub lines: Vec<LineSpec>,
    pub legend: Vec<LegendEntry>,
}

impl DrawingPlan {
    /// First line with the given role
    pub fn line(&self, role: LineRole) -> Option<&LineSpec> {
        self.lines.iter().find(|line| line.role == role)
    }

    pub fn has_line(&self, role: LineRole) -> bool {
        self.line(role).is_some()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace whatever the renderer shows with this plan.
    ///
    /// The renderer is cleared first, then receives axes, lines in plan order
    /// and finally legend rows.
    pub fn render_into<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        profiling::scope!("render_into");

        renderer.clear();
        renderer.draw_axis(&self.x_axis);
        renderer.draw_axis(&self.y_axis);
        for line in &self.lines {
            renderer.draw_line(line.role, &line.points, &line.stroke);
        }
        for entry in &self.legend {
            renderer.draw_legend_row(entry);
        }
    }
}
