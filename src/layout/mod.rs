//! Chart layout: scales, ticks and the renderer-agnostic drawing plan
//!
//! [`build_drawing_plan`] is the single entry point from samples to geometry.
//! The resulting [`DrawingPlan`] is handed to any [`Renderer`] implementation.
//! [`build_pareto_plan`] does the same for category counts.

mod builder;
mod pareto;
mod plan;
mod render;
mod scale;

pub use builder::{LayoutBuilder, build_drawing_plan, build_plan};
pub use pareto::{ParetoPlan, build_pareto_plan};
pub use plan::{
    AxisPosition, AxisSpec, BarSpec, Canvas, CategoryAxis, CategoryTick, DrawingPlan,
    LegendEntry, LegendKey, LineRole, LineSpec, Point, Rect, Stroke, TickFormat,
};
pub use render::{CommandRecorder, DrawCommand, Renderer};
pub use scale::{LinearScale, Scales, build_scales, build_scales_with, ticks};
