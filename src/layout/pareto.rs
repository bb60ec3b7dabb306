//! Pareto chart: bars per category plus the cumulative share on a percent axis

use super::plan::{
    AxisPosition, AxisSpec, BarSpec, Canvas, CategoryAxis, CategoryTick, LineRole, LineSpec,
    Point, Rect, Stroke, TickFormat,
};
use super::render::Renderer;
use super::scale::LinearScale;
use crate::config::{Category, ParetoRequest};
use crate::constants::{axis::X_LABEL_ROTATION, pareto, stroke};
use crate::error::{ChartError, LayoutError, Result};
use serde::Serialize;

/// Renderer-agnostic description of a Pareto chart.
///
/// The left axis runs from zero to the category total, so every bar top and
/// the cumulative line share one vertical geometry with the right percent axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoPlan {
    pub canvas: Canvas,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub total: f64,
    /// Bars in drawing order, left to right
    pub bars: Vec<BarSpec>,
    pub cumulative: LineSpec,
    pub x_axis: CategoryAxis,
    pub y_axis: AxisSpec,
    pub percent_axis: AxisSpec,
}

impl ParetoPlan {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace whatever the renderer shows with this plan
    pub fn render_into<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        profiling::scope!("render_pareto");

        renderer.clear();
        renderer.draw_category_axis(&self.x_axis);
        renderer.draw_axis(&self.y_axis);
        renderer.draw_axis(&self.percent_axis);
        for bar in &self.bars {
            renderer.draw_bar(bar);
        }
        renderer.draw_line(
            self.cumulative.role,
            &self.cumulative.points,
            &self.cumulative.stroke,
        );
    }
}

/// Build the Pareto plan described by `request`
pub fn build_pareto_plan(request: &ParetoRequest) -> std::result::Result<ParetoPlan, LayoutError> {
    profiling::scope!("build_pareto_plan");

    try_build(request)
        .inspect(|plan| {
            tracing::debug!(
                categories = plan.bars.len(),
                total = plan.total,
                "built pareto plan"
            );
        })
        .map_err(|err| {
            tracing::warn!(
                categories = request.categories.len(),
                error = %err,
                "pareto plan not built"
            );
            LayoutError::from(err)
        })
}

fn ordered(request: &ParetoRequest) -> Result<Vec<&Category>> {
    for (index, category) in request.categories.iter().enumerate() {
        if !category.value.is_finite() {
            return Err(ChartError::NonFiniteValue { index, axis: 'y' });
        }
        if category.value < 0.0 {
            return Err(ChartError::NegativeValue {
                index,
                value: category.value,
            });
        }
    }

    let mut ordered: Vec<&Category> = request.categories.iter().collect();
    if request.sort_descending {
        // Stable: ties keep input order
        ordered.sort_by(|a, b| b.value.total_cmp(&a.value));
    }
    Ok(ordered)
}

fn try_build(request: &ParetoRequest) -> Result<ParetoPlan> {
    if request.categories.is_empty() {
        return Err(ChartError::EmptyData);
    }
    let config = &request.config;
    config.validate()?;

    let categories = ordered(request)?;
    let count = categories.len();
    let total: f64 = categories.iter().map(|c| c.value).sum();
    if !total.is_finite() {
        return Err(ChartError::NumericOverflow {
            operation: "cumulative total".to_string(),
        });
    }
    if total == 0.0 {
        return Err(ChartError::ZeroTotal { count });
    }

    let (plot_width, plot_height) = (config.plot_width(), config.plot_height());
    let band = plot_width / count as f64;
    let inset = band * pareto::BAR_PADDING / 2.0;
    let value_scale = LinearScale::new((0.0, total), (plot_height, 0.0));
    let percent_scale = LinearScale::new((0.0, pareto::PERCENT_MAX), (plot_height, 0.0));

    let mut bars = Vec::with_capacity(count);
    let mut ticks = Vec::with_capacity(count);
    let mut points = Vec::with_capacity(count);
    let mut running = 0.0;

    for (index, category) in categories.iter().enumerate() {
        let left = index as f64 * band;
        let center = left + band / 2.0;
        let top = value_scale.map(category.value);

        bars.push(BarSpec {
            label: category.label.clone(),
            value: category.value,
            rect: Rect {
                x: left + inset,
                y: top,
                width: band - 2.0 * inset,
                height: plot_height - top,
            },
            color: pareto::BAR_COLOR.to_string(),
        });
        ticks.push(CategoryTick {
            label: category.label.clone(),
            position: center,
        });

        running += category.value;
        let percent = running / total * pareto::PERCENT_MAX;
        points.push(Point::new(center, percent_scale.map(percent)));
    }

    let tick_count = config.y_tick_count;
    Ok(ParetoPlan {
        canvas: Canvas {
            width: config.canvas_width,
            height: config.canvas_height,
            origin: Point::new(config.margins.left, config.margins.top),
            plot_width,
            plot_height,
        },
        title: request.title.clone(),
        total,
        bars,
        cumulative: LineSpec {
            role: LineRole::Cumulative,
            points,
            stroke: Stroke::solid(pareto::CUMULATIVE_COLOR, stroke::WIDTH),
        },
        x_axis: CategoryAxis {
            label: request.x_name.clone(),
            ticks,
            offset: Point::new(0.0, plot_height),
            label_rotation: X_LABEL_ROTATION,
        },
        y_axis: AxisSpec {
            position: AxisPosition::Left,
            label: request.y_name.clone(),
            scale: value_scale,
            tick_count,
            ticks: value_scale.ticks(tick_count),
            offset: Point::new(0.0, 0.0),
            label_rotation: 0.0,
            tick_format: TickFormat::Number,
            color: Some(pareto::BAR_COLOR.to_string()),
        },
        percent_axis: AxisSpec {
            position: AxisPosition::Right,
            label: pareto::PERCENT_AXIS_LABEL.to_string(),
            scale: percent_scale,
            tick_count,
            ticks: percent_scale.ticks(tick_count),
            offset: Point::new(plot_width, 0.0),
            label_rotation: 0.0,
            tick_format: TickFormat::Percent,
            color: Some(pareto::CUMULATIVE_COLOR.to_string()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::layout::{CommandRecorder, DrawCommand};

    const TOL: f64 = 1e-9;

    fn defects() -> Vec<Category> {
        vec![
            Category::new("Dent", 10.0),
            Category::new("Scratch", 40.0),
            Category::new("Crack", 30.0),
            Category::new("Stain", 20.0),
        ]
    }

    fn request(categories: Vec<Category>) -> ParetoRequest {
        ParetoRequest::new(categories)
            .with_names("Defect", "Count")
            .with_config(ChartConfig::default().with_plot_size(400.0, 200.0))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < TOL
    }

    #[test]
    fn test_bars_sorted_descending() {
        let plan = build_pareto_plan(&request(defects())).unwrap();
        let labels: Vec<&str> = plan.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Scratch", "Crack", "Stain", "Dent"]);
        assert_eq!(plan.total, 100.0);

        let tick_labels: Vec<&str> = plan.x_axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(tick_labels, labels);
    }

    #[test]
    fn test_input_order_kept_when_requested() {
        let plan = build_pareto_plan(&request(defects()).with_input_order()).unwrap();
        let labels: Vec<&str> = plan.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Dent", "Scratch", "Crack", "Stain"]);
    }

    #[test]
    fn test_bar_geometry() {
        let plan = build_pareto_plan(&request(defects())).unwrap();

        // 4 bands of 100px, 10px inset per side; 40 of 100 is 80px tall
        let first = &plan.bars[0].rect;
        assert!(close(first.x, 10.0));
        assert!(close(first.width, 80.0));
        assert!(close(first.y, 120.0));
        assert!(close(first.height, 80.0));
        assert!(close(first.y + first.height, 200.0));

        let last = &plan.bars[3].rect;
        assert!(close(last.x, 310.0));
        assert!(close(last.height, 20.0));
    }

    #[test]
    fn test_cumulative_line() {
        let plan = build_pareto_plan(&request(defects())).unwrap();
        assert_eq!(plan.cumulative.role, LineRole::Cumulative);

        // 40%, 70%, 90%, 100% at band centers
        let expected = [(50.0, 120.0), (150.0, 60.0), (250.0, 20.0), (350.0, 0.0)];
        assert_eq!(plan.cumulative.points.len(), expected.len());
        for (point, (x, y)) in plan.cumulative.points.iter().zip(expected) {
            assert!(close(point.x, x) && close(point.y, y), "{point:?} != ({x}, {y})");
        }
        for (tick, point) in plan.x_axis.ticks.iter().zip(&plan.cumulative.points) {
            assert!(close(tick.position, point.x));
        }
    }

    #[test]
    fn test_twin_axes() {
        let plan = build_pareto_plan(&request(defects())).unwrap();

        assert_eq!(plan.y_axis.position, AxisPosition::Left);
        assert_eq!(plan.y_axis.scale.domain(), (0.0, 100.0));
        assert_eq!(plan.y_axis.label, "Count");
        assert_eq!(plan.y_axis.color.as_deref(), Some(pareto::BAR_COLOR));

        assert_eq!(plan.percent_axis.position, AxisPosition::Right);
        assert_eq!(plan.percent_axis.offset, Point::new(400.0, 0.0));
        assert_eq!(plan.percent_axis.tick_format, TickFormat::Percent);
        assert_eq!(plan.percent_axis.ticks.first(), Some(&0.0));
        assert_eq!(plan.percent_axis.ticks.last(), Some(&100.0));
        assert_eq!(plan.percent_axis.tick_format.format(50.0), "50%");
        assert_eq!(plan.percent_axis.color.as_deref(), Some(pareto::CUMULATIVE_COLOR));

        assert_eq!(plan.x_axis.label, "Defect");
        assert_eq!(plan.x_axis.label_rotation, -90.0);
        assert_eq!(plan.x_axis.offset, Point::new(0.0, 200.0));
    }

    #[test]
    fn test_invalid_categories() {
        let err = build_pareto_plan(&request(Vec::new())).unwrap_err();
        assert!(matches!(err.cause(), ChartError::EmptyData));

        let err =
            build_pareto_plan(&request(vec![Category::new("A", 3.0), Category::new("B", -1.0)]))
                .unwrap_err();
        assert!(matches!(
            err.cause(),
            ChartError::NegativeValue { index: 1, .. }
        ));

        let err =
            build_pareto_plan(&request(vec![Category::new("A", 0.0), Category::new("B", 0.0)]))
                .unwrap_err();
        assert!(matches!(err.cause(), ChartError::ZeroTotal { count: 2 }));

        let err = build_pareto_plan(&request(vec![
            Category::new("A", f64::MAX),
            Category::new("B", f64::MAX),
        ]))
        .unwrap_err();
        assert!(matches!(err.cause(), ChartError::NumericOverflow { .. }));
    }

    #[test]
    fn test_render_order() {
        let plan = build_pareto_plan(&request(defects())).unwrap();
        let mut recorder = CommandRecorder::new();
        plan.render_into(&mut recorder);

        let commands = recorder.commands();
        assert_eq!(recorder.clear_count(), 1);
        assert!(matches!(commands[0], DrawCommand::CategoryAxis(_)));
        assert!(matches!(commands[1], DrawCommand::Axis(_)));
        assert!(matches!(commands[2], DrawCommand::Axis(_)));
        let bars = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Bar(_)))
            .count();
        assert_eq!(bars, 4);
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Line {
                role: LineRole::Cumulative,
                ..
            })
        ));
    }

    #[test]
    fn test_json_shape() {
        let json = build_pareto_plan(&request(defects()))
            .unwrap()
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cumulative"]["role"], "cumulative");
        assert_eq!(value["percent_axis"]["position"], "right");
        assert_eq!(value["percent_axis"]["tick_format"], "percent");
        assert_eq!(value["bars"][0]["label"], "Scratch");
    }
}
