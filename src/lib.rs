//! Control chart statistics and layout
//!
//! Turns a sequence of `(x, y)` samples into a renderer-agnostic
//! [`DrawingPlan`]: mean, ±σ control limits, a least-squares trendline, an
//! optional goal line, linear scales with nice ticks and a legend. Category
//! counts can be laid out as a Pareto chart ([`ParetoPlan`]) on the same seam.
//!
//! ```no_run
//! use control_chart::{ChartRequest, SampleSet, build_plan};
//!
//! let samples = SampleSet::from_labels(&[("1", 12.0), ("2", 14.5), ("3", 11.0)])?;
//! let plan = build_plan(&ChartRequest::new(samples).with_goal(Some(13.0)))?;
//! println!("{}", plan.to_json()?);
//! # Ok::<(), control_chart::ChartError>(())
//! ```

pub mod chart;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod layout;
pub mod perf;

pub use chart::ControlChart;
pub use config::{Category, ChartConfig, ChartRequest, GoalLegend, ParetoRequest};
pub use data::{
    LinearFit, Sample, SampleSet, Statistics, TrendlineSegment, compute_statistics,
    compute_trendline,
};
pub use error::{ChartError, LayoutError, Result};
pub use layout::{
    DrawingPlan, LayoutBuilder, LineRole, ParetoPlan, Renderer, build_drawing_plan,
    build_pareto_plan, build_plan,
};
