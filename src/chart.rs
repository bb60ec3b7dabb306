//! Chart session: owns the current inputs and redraws from scratch on demand

use crate::config::{ChartConfig, ChartRequest};
use crate::data::SampleSet;
use crate::error::LayoutError;
use crate::layout::{DrawingPlan, Renderer};
use crate::perf::{CacheStats, PlanCache};

/// A control chart bound to its current inputs.
///
/// Every [`render`](Self::render) replaces the renderer's entire output: either
/// with the full plan for the current inputs or, on failure, with nothing.
#[derive(Default)]
pub struct ControlChart {
    request: ChartRequest,
    cache: PlanCache,
}

impl ControlChart {
    pub fn new(request: ChartRequest) -> Self {
        Self {
            request,
            cache: PlanCache::default(),
        }
    }

    pub fn request(&self) -> &ChartRequest {
        &self.request
    }

    pub fn set_samples(&mut self, samples: SampleSet) {
        self.request.samples = samples;
    }

    pub fn set_goal(&mut self, goal: Option<f64>) {
        self.request.goal = goal;
    }

    pub fn set_names(&mut self, x_name: impl Into<String>, y_name: impl Into<String>) {
        self.request.x_name = x_name.into();
        self.request.y_name = y_name.into();
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.request.title = title;
    }

    pub fn set_config(&mut self, config: ChartConfig) {
        self.request.config = config;
    }

    /// Plan for the current inputs, reused when nothing changed
    pub fn plan(&mut self) -> Result<&DrawingPlan, LayoutError> {
        self.cache.get_or_build(&self.request)
    }

    /// Replace the renderer's output with the chart for the current inputs
    pub fn render<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<(), LayoutError> {
        profiling::scope!("ControlChart::render");

        match self.cache.get_or_build(&self.request) {
            Ok(plan) => {
                plan.render_into(renderer);
                Ok(())
            }
            Err(err) => {
                renderer.clear();
                Err(err)
            }
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
