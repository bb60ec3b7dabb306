//! Instrumentation and plan caching
//!
//! - Profiling scopes via the `profiling` crate (puffin/tracy backends)
//! - [`PlanCache`] to skip the layout pipeline for unchanged requests

mod cache;

pub use cache::{CacheStats, PlanCache};

// Re-export profiling macros for convenience
// When no profiling feature is enabled, these become no-ops
pub use profiling;

/// Run `$block` inside a named profiling scope and return its value
#[macro_export]
macro_rules! timed {
    ($name:expr, $block:expr) => {{
        $crate::perf::profiling::scope!($name);
        let r = $block;
        r
    }};
}
