//! Composes statistics, scales and trendline into a drawing plan

use super::plan::{
    AxisPosition, AxisSpec, Canvas, DrawingPlan, LegendEntry, LegendKey, LineRole, LineSpec,
    Point, Rect, Stroke, TickFormat,
};
use super::scale::{LinearScale, Scales, build_scales_with};
use crate::config::{ChartConfig, ChartRequest, GoalLegend};
use crate::constants::{axis::X_LABEL_ROTATION, legend, stroke};
use crate::data::{SampleSet, Statistics, TrendlineSegment, compute_statistics_with_sigma, compute_trendline};
use crate::error::{ChartError, LayoutError, Result};

/// Builds drawing plans for one configuration.
///
/// The pipeline runs in a fixed order: non-empty check, config and goal
/// validation, statistics, scales, trendline, then line and legend assembly.
/// Any stage failure aborts the whole plan and surfaces as a [`LayoutError`];
/// a plan never carries non-finite numbers.
#[derive(Debug, Clone)]
pub struct LayoutBuilder<'a> {
    config: &'a ChartConfig,
    title: Option<String>,
}

impl<'a> LayoutBuilder<'a> {
    pub fn new(config: &'a ChartConfig) -> Self {
        Self {
            config,
            title: None,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn build(
        &self,
        samples: &SampleSet,
        goal: Option<f64>,
        x_name: &str,
        y_name: &str,
    ) -> std::result::Result<DrawingPlan, LayoutError> {
        profiling::scope!("build_drawing_plan");

        self.try_build(samples, goal, x_name, y_name)
            .inspect(|plan| {
                tracing::debug!(
                    samples = samples.len(),
                    mean = plan.statistics.mean,
                    std_dev = plan.statistics.std_dev,
                    slope = plan.trendline.fit.slope,
                    lines = plan.lines.len(),
                    "built drawing plan"
                );
            })
            .map_err(|err| {
                tracing::warn!(samples = samples.len(), error = %err, "drawing plan not built");
                LayoutError::from(err)
            })
    }

    fn try_build(
        &self,
        samples: &SampleSet,
        goal: Option<f64>,
        x_name: &str,
        y_name: &str,
    ) -> Result<DrawingPlan> {
        if samples.is_empty() {
            return Err(ChartError::EmptyData);
        }
        self.config.validate()?;
        if goal.is_some_and(|g| !g.is_finite()) {
            return Err(ChartError::InvalidConfig("goal must be a finite number".to_string()));
        }

        let statistics = compute_statistics_with_sigma(samples, self.config.sigma_multiplier)?;
        let scales = build_scales_with(samples, self.config)?;
        let trendline = compute_trendline(samples)?;

        let lines = self.lines(samples, goal, &statistics, &trendline, &scales);
        let all_finite = lines
            .iter()
            .flat_map(|line| &line.points)
            .all(|p| p.x.is_finite() && p.y.is_finite());
        if !all_finite {
            return Err(ChartError::NumericOverflow {
                operation: "pixel coordinates".to_string(),
            });
        }

        Ok(DrawingPlan {
            canvas: self.canvas(),
            title: self.title.clone(),
            statistics,
            trendline,
            x_axis: self.x_axis(&scales.x, samples.len(), x_name),
            y_axis: self.y_axis(&scales.y, y_name),
            lines,
            legend: self.legend(goal.is_some(), x_name),
        })
    }

    fn canvas(&self) -> Canvas {
        let config = self.config;
        Canvas {
            width: config.canvas_width,
            height: config.canvas_height,
            origin: Point::new(config.margins.left, config.margins.top),
            plot_width: config.plot_width(),
            plot_height: config.plot_height(),
        }
    }

    /// One requested tick per observation
    fn x_axis(&self, scale: &LinearScale, sample_count: usize, label: &str) -> AxisSpec {
        AxisSpec {
            position: AxisPosition::Bottom,
            label: label.to_string(),
            scale: *scale,
            tick_count: sample_count,
            ticks: scale.ticks(sample_count),
            offset: Point::new(0.0, self.config.plot_height()),
            label_rotation: X_LABEL_ROTATION,
            tick_format: TickFormat::Number,
            color: None,
        }
    }

    fn y_axis(&self, scale: &LinearScale, label: &str) -> AxisSpec {
        let tick_count = self.config.y_tick_count;
        AxisSpec {
            position: AxisPosition::Left,
            label: label.to_string(),
            scale: *scale,
            tick_count,
            ticks: scale.ticks(tick_count),
            offset: Point::new(0.0, 0.0),
            label_rotation: 0.0,
            tick_format: TickFormat::Number,
            color: None,
        }
    }

    fn lines(
        &self,
        samples: &SampleSet,
        goal: Option<f64>,
        statistics: &Statistics,
        trendline: &TrendlineSegment,
        scales: &Scales,
    ) -> Vec<LineSpec> {
        profiling::scope!("assemble_lines");

        let palette = &self.config.palette;
        let mut lines = Vec::with_capacity(6);

        lines.push(LineSpec {
            role: LineRole::Data,
            points: samples
                .iter()
                .map(|s| Point::new(scales.x.map(s.x()), scales.y.map(s.y())))
                .collect(),
            stroke: Stroke::solid(&palette.data, stroke::WIDTH),
        });

        if let Some(goal) = goal {
            lines.push(self.horizontal(LineRole::Goal, scales.y.map(goal), &palette.goal));
        }

        lines.push(self.horizontal(
            LineRole::Mean,
            scales.y.map(statistics.mean),
            &palette.mean,
        ));
        lines.push(self.horizontal(
            LineRole::UpperLimit,
            scales.y.map(statistics.upper_control_limit),
            &palette.limits,
        ));
        lines.push(self.horizontal(
            LineRole::LowerLimit,
            scales.y.map(statistics.lower_control_limit),
            &palette.limits,
        ));

        lines.push(LineSpec {
            role: LineRole::Trendline,
            points: trendline
                .points()
                .iter()
                .map(|p| Point::new(scales.x.map(p.x), scales.y.map(p.y)))
                .collect(),
            stroke: Stroke::dashed(&palette.trendline, stroke::WIDTH, &stroke::TREND_DASH),
        });

        lines
    }

    /// Dashed line across the full plot width
    fn horizontal(&self, role: LineRole, y: f64, color: &str) -> LineSpec {
        LineSpec {
            role,
            points: vec![Point::new(0.0, y), Point::new(self.config.plot_width(), y)],
            stroke: Stroke::dashed(color, stroke::WIDTH, &stroke::REFERENCE_DASH),
        }
    }

    /// Stacked column anchored to the plot's right edge, row `i` at `i * ROW_SPACING`
    fn legend(&self, has_goal: bool, x_name: &str) -> Vec<LegendEntry> {
        let palette = &self.config.palette;
        let show_goal = has_goal || self.config.goal_legend == GoalLegend::Always;

        let rows = [
            Some((LegendKey::Data, &palette.data, x_name)),
            show_goal.then_some((LegendKey::Goal, &palette.goal, legend::GOAL_LABEL)),
            Some((LegendKey::Mean, &palette.mean, legend::MEAN_LABEL)),
            Some((LegendKey::ControlLimits, &palette.limits, legend::LIMITS_LABEL)),
            Some((LegendKey::Trendline, &palette.trendline, legend::TREND_LABEL)),
        ];

        let right = self.config.plot_width();
        rows.into_iter()
            .flatten()
            .enumerate()
            .map(|(index, (key, color, label))| {
                let top = index as f64 * legend::ROW_SPACING;
                LegendEntry {
                    key,
                    color: color.clone(),
                    label: label.to_string(),
                    swatch: Rect {
                        x: right - legend::SWATCH_SIZE,
                        y: top,
                        width: legend::SWATCH_SIZE,
                        height: legend::SWATCH_SIZE,
                    },
                    label_anchor: Point::new(
                        right - legend::TEXT_INSET,
                        top + legend::SWATCH_SIZE / 2.0,
                    ),
                }
            })
            .collect()
    }
}

/// Build a plan for a plot area of `plot_width` x `plot_height` with default styling
pub fn build_drawing_plan(
    samples: &SampleSet,
    goal: Option<f64>,
    x_name: &str,
    y_name: &str,
    plot_width: f64,
    plot_height: f64,
) -> std::result::Result<DrawingPlan, LayoutError> {
    let config = ChartConfig::default().with_plot_size(plot_width, plot_height);
    LayoutBuilder::new(&config).build(samples, goal, x_name, y_name)
}

/// Build the plan described by a full request
pub fn build_plan(request: &ChartRequest) -> std::result::Result<DrawingPlan, LayoutError> {
    LayoutBuilder::new(&request.config)
        .with_title(request.title.clone())
        .build(&request.samples, request.goal, &request.x_name, &request.y_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Palette;

    const TOL: f64 = 1e-9;
    const WIDTH: f64 = 720.0;
    const HEIGHT: f64 = 280.0;

    fn line_samples() -> SampleSet {
        // y = 2x + 1
        SampleSet::from_pairs(&[(1.0, 3.0), (2.0, 5.0), (3.0, 7.0), (4.0, 9.0)]).unwrap()
    }

    fn seven_samples() -> SampleSet {
        SampleSet::from_labels(&[
            ("1", 12.0),
            ("2", 14.5),
            ("3", 11.0),
            ("4", 13.0),
            ("5", 15.5),
            ("6", 12.5),
            ("7", 14.0),
        ])
        .unwrap()
    }

    fn plan(samples: &SampleSet, goal: Option<f64>) -> DrawingPlan {
        build_drawing_plan(samples, goal, "Week", "Defects", WIDTH, HEIGHT).unwrap()
    }

    fn assert_point(p: &Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < TOL && (p.y - y).abs() < TOL, "{p:?} != ({x}, {y})");
    }

    #[test]
    fn test_empty_samples_fail_with_empty_data() {
        let err = build_drawing_plan(&SampleSet::default(), Some(5.0), "x", "y", WIDTH, HEIGHT)
            .unwrap_err();
        assert!(matches!(err.cause(), ChartError::EmptyData));
    }

    #[test]
    fn test_identical_x_fails_with_degenerate_regression() {
        let samples = SampleSet::from_labels(&[("5", 1.0), ("5", 2.0), ("5", 4.0)]).unwrap();
        let err = build_drawing_plan(&samples, None, "x", "y", WIDTH, HEIGHT).unwrap_err();
        assert!(matches!(
            err.cause(),
            ChartError::DegenerateRegression { count: 3, .. }
        ));
    }

    #[test]
    fn test_single_sample_fails_with_insufficient_data() {
        let samples = SampleSet::from_pairs(&[(1.0, 4.0)]).unwrap();
        let err = build_drawing_plan(&samples, None, "x", "y", WIDTH, HEIGHT).unwrap_err();
        assert!(matches!(
            err.cause(),
            ChartError::InsufficientData { actual: 1, .. }
        ));
    }

    #[test]
    fn test_invalid_plot_area() {
        let err = build_drawing_plan(&line_samples(), None, "x", "y", -10.0, HEIGHT).unwrap_err();
        assert!(matches!(err.cause(), ChartError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_non_finite_goal_is_rejected() {
        let err =
            build_drawing_plan(&line_samples(), Some(f64::NAN), "x", "y", WIDTH, HEIGHT).unwrap_err();
        assert!(matches!(err.cause(), ChartError::InvalidConfig(_)));
    }

    #[test]
    fn test_huge_values_fail_instead_of_infinite_plan() {
        let samples = SampleSet::from_pairs(&[(1.0, 1e200), (2.0, -1e200), (3.0, 1e200)]).unwrap();
        let err = build_drawing_plan(&samples, None, "x", "y", WIDTH, HEIGHT).unwrap_err();
        assert!(matches!(err.cause(), ChartError::NumericOverflow { .. }));

        let samples = SampleSet::from_pairs(&[(1e200, 1.0), (2e200, 2.0), (3e200, 3.0)]).unwrap();
        let err = build_drawing_plan(&samples, None, "x", "y", WIDTH, HEIGHT).unwrap_err();
        assert!(matches!(err.cause(), ChartError::NumericOverflow { .. }));
    }

    #[test]
    fn test_validation_order() {
        // Empty data is reported before a bad plot area
        let err = build_drawing_plan(&SampleSet::default(), None, "x", "y", 0.0, HEIGHT)
            .unwrap_err();
        assert!(matches!(err.cause(), ChartError::EmptyData));

        // A bad plot area is reported before per-stage data problems
        let one = SampleSet::from_pairs(&[(1.0, 4.0)]).unwrap();
        let err = build_drawing_plan(&one, None, "x", "y", 0.0, HEIGHT).unwrap_err();
        assert!(matches!(err.cause(), ChartError::InvalidDimensions { .. }));

        let err = build_drawing_plan(&one, Some(f64::INFINITY), "x", "y", WIDTH, HEIGHT)
            .unwrap_err();
        assert!(matches!(err.cause(), ChartError::InvalidConfig(_)));

        // Statistics run before the trendline
        let err = build_drawing_plan(&one, None, "x", "y", WIDTH, HEIGHT).unwrap_err();
        assert!(matches!(err.cause(), ChartError::InsufficientData { .. }));
    }

    #[test]
    fn test_x_tick_count_equals_sample_count() {
        let plan = plan(&seven_samples(), None);
        assert_eq!(plan.x_axis.tick_count, 7);
        assert_eq!(plan.x_axis.ticks, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(plan.x_axis.position, AxisPosition::Bottom);
        assert_eq!(plan.x_axis.label, "Week");
        assert_eq!(plan.x_axis.offset, Point::new(0.0, HEIGHT));
        assert_eq!(plan.x_axis.label_rotation, -90.0);

        assert_eq!(plan.y_axis.tick_count, 10);
        assert_eq!(plan.y_axis.position, AxisPosition::Left);
        assert_eq!(plan.y_axis.label, "Defects");
    }

    #[test]
    fn test_line_order_and_geometry() {
        let plan = plan(&line_samples(), Some(8.0));
        let roles: Vec<LineRole> = plan.lines.iter().map(|l| l.role).collect();
        assert_eq!(
            roles,
            vec![
                LineRole::Data,
                LineRole::Goal,
                LineRole::Mean,
                LineRole::UpperLimit,
                LineRole::LowerLimit,
                LineRole::Trendline,
            ]
        );

        // x domain [1, 4], y domain [1, 11]
        let data = plan.line(LineRole::Data).unwrap();
        assert_eq!(data.points.len(), 4);
        assert_point(&data.points[0], 0.0, 224.0);
        assert_point(&data.points[3], WIDTH, 56.0);

        let mean = plan.line(LineRole::Mean).unwrap();
        assert_point(&mean.points[0], 0.0, 140.0);
        assert_point(&mean.points[1], WIDTH, 140.0);

        let goal = plan.line(LineRole::Goal).unwrap();
        assert_point(&goal.points[0], 0.0, 84.0);

        let trend = plan.line(LineRole::Trendline).unwrap();
        assert_eq!(trend.points.len(), 2);
        assert_point(&trend.points[0], 0.0, 224.0);
        assert_point(&trend.points[1], WIDTH, 56.0);
    }

    #[test]
    fn test_control_limits_share_style_and_bracket_mean() {
        let plan = plan(&seven_samples(), None);
        let upper = plan.line(LineRole::UpperLimit).unwrap();
        let lower = plan.line(LineRole::LowerLimit).unwrap();
        let mean = plan.line(LineRole::Mean).unwrap();
        let trend = plan.line(LineRole::Trendline).unwrap();

        assert_eq!(upper.stroke, lower.stroke);
        assert_eq!(upper.stroke.dash.as_deref(), Some(&[5.0, 5.0][..]));
        assert_eq!(trend.stroke.dash.as_deref(), Some(&[4.0, 4.0][..]));
        assert_ne!(upper.stroke.dash, trend.stroke.dash);
        assert_eq!(plan.line(LineRole::Data).unwrap().stroke.dash, None);

        // Pixel y grows downward
        assert!(upper.points[0].y < mean.points[0].y);
        assert!(mean.points[0].y < lower.points[0].y);
        assert!(plan.statistics.lower_control_limit <= plan.statistics.mean);
        assert!(plan.statistics.mean <= plan.statistics.upper_control_limit);
    }

    #[test]
    fn test_goal_line_only_when_goal_present() {
        let without = plan(&seven_samples(), None);
        assert!(!without.has_line(LineRole::Goal));
        assert!(without.legend.iter().all(|e| e.key != LegendKey::Goal));

        let with = plan(&seven_samples(), Some(13.0));
        assert!(with.has_line(LineRole::Goal));
        assert_eq!(with.legend[1].key, LegendKey::Goal);
        assert_eq!(with.legend[1].label, "Goal");
    }

    #[test]
    fn test_goal_legend_always_policy() {
        let config = ChartConfig {
            goal_legend: GoalLegend::Always,
            ..ChartConfig::default()
        };
        let plan = LayoutBuilder::new(&config)
            .build(&seven_samples(), None, "Week", "Defects")
            .unwrap();

        assert!(!plan.has_line(LineRole::Goal));
        let labels: Vec<&str> = plan.legend.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Week", "Goal", "Mean", "Control Limits", "Trend Line"]);
    }

    #[test]
    fn test_legend_geometry() {
        let plan = plan(&seven_samples(), Some(13.0));
        assert_eq!(plan.legend.len(), 5);

        for (index, entry) in plan.legend.iter().enumerate() {
            let top = index as f64 * 20.0;
            assert_eq!(
                entry.swatch,
                Rect {
                    x: WIDTH - 18.0,
                    y: top,
                    width: 18.0,
                    height: 18.0
                }
            );
            assert_eq!(entry.label_anchor, Point::new(WIDTH - 24.0, top + 9.0));
        }

        let palette = Palette::default();
        let colors: Vec<&str> = plan.legend.iter().map(|e| e.color.as_str()).collect();
        assert_eq!(
            colors,
            vec![
                palette.data.as_str(),
                palette.goal.as_str(),
                palette.mean.as_str(),
                palette.limits.as_str(),
                palette.trendline.as_str(),
            ]
        );
        assert_eq!(plan.legend[0].label, "Week");
    }

    #[test]
    fn test_idempotent() {
        let samples = seven_samples();
        let first = plan(&samples, Some(13.0));
        let second = plan(&samples, Some(13.0));
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn test_canvas_from_default_request() {
        let request = ChartRequest::new(seven_samples()).with_title("Weekly defects");
        let plan = build_plan(&request).unwrap();

        assert_eq!(plan.canvas.width, 800.0);
        assert_eq!(plan.canvas.height, 400.0);
        assert_eq!(plan.canvas.origin, Point::new(50.0, 20.0));
        assert_eq!(plan.canvas.plot_width, 720.0);
        assert_eq!(plan.canvas.plot_height, 280.0);
        assert_eq!(plan.title.as_deref(), Some("Weekly defects"));
    }

    #[test]
    fn test_sigma_multiplier_widens_band() {
        let narrow = build_plan(&ChartRequest::new(seven_samples())).unwrap();
        let config = ChartConfig {
            sigma_multiplier: 3.0,
            ..ChartConfig::default()
        };
        let wide = build_plan(&ChartRequest::new(seven_samples()).with_config(config)).unwrap();

        let sd = narrow.statistics.std_dev;
        assert!((wide.statistics.band_half_width() - 3.0 * sd).abs() < TOL);
        assert!(
            wide.line(LineRole::UpperLimit).unwrap().points[0].y
                < narrow.line(LineRole::UpperLimit).unwrap().points[0].y
        );
    }

    #[test]
    fn test_plan_json_shape() {
        let json = plan(&line_samples(), None).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["lines"][0]["role"], "data");
        assert_eq!(value["lines"][3]["role"], "lower_limit");
        assert_eq!(value["legend"][2]["key"], "control_limits");
        assert_eq!(value["x_axis"]["tick_count"], 4);
        assert!(value.get("title").is_none());
        assert!(value["lines"][0]["stroke"].get("dash").is_none());
    }
}
