//! Chart configuration and the per-render input contract
//!
//! Fixed canvas size, margins and styling live in [`ChartConfig`] with the
//! defaults from [`crate::constants`]; [`ChartRequest`] bundles them with the
//! samples, goal and display names of a single chart, and [`ParetoRequest`]
//! does the same for a Pareto chart of category counts.

mod chart;
mod request;

pub use chart::{ChartConfig, GoalLegend, Margins, Palette};
pub use request::{Category, ChartRequest, ParetoRequest};
