//! Drawing plan cache keyed by request fingerprint
//!
//! Re-rendering an unchanged request skips the whole layout pipeline.

use crate::config::{ChartConfig, ChartRequest};
use crate::constants::performance::MAX_CACHED_PLANS;
use crate::error::LayoutError;
use crate::layout::{DrawingPlan, build_plan};
use std::collections::HashMap;
use std::collections::hash_map::{DefaultHasher, Entry};
use std::hash::{Hash, Hasher};

struct CachedPlan {
    request: ChartRequest,
    plan: DrawingPlan,
}

/// Hit/miss counters and occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub max_entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Cache of built plans
///
/// Entries are looked up by a hash of the request and confirmed by full
/// equality, so a fingerprint collision only costs a rebuild. Failed builds
/// are never stored.
pub struct PlanCache {
    entries: HashMap<u64, CachedPlan>,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl PlanCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries: max_entries.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Get the cached plan for `request` or build and store it
    pub fn get_or_build(&mut self, request: &ChartRequest) -> Result<&DrawingPlan, LayoutError> {
        profiling::scope!("plan_cache_lookup");

        let key = fingerprint(request);
        if !self.entries.contains_key(&key) {
            self.enforce_limit();
        }

        let cached = match self.entries.entry(key) {
            Entry::Occupied(mut slot) => {
                if slot.get().request == *request {
                    self.hits += 1;
                } else {
                    let plan = build_plan(request)?;
                    self.misses += 1;
                    slot.insert(CachedPlan {
                        request: request.clone(),
                        plan,
                    });
                }
                slot.into_mut()
            }
            Entry::Vacant(slot) => {
                let plan = build_plan(request)?;
                self.misses += 1;
                slot.insert(CachedPlan {
                    request: request.clone(),
                    plan,
                })
            }
        };
        Ok(&cached.plan)
    }

    /// Check if a plan for this exact request is cached
    pub fn contains(&self, request: &ChartRequest) -> bool {
        self.entries
            .get(&fingerprint(request))
            .is_some_and(|cached| cached.request == *request)
    }

    /// Clear all cached plans
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Limit memory usage by evicting old entries
    fn enforce_limit(&mut self) {
        if self.entries.len() >= self.max_entries {
            // Simple strategy: clear half the cache
            let to_remove: Vec<u64> = self
                .entries
                .keys()
                .take((self.entries.len() / 2).max(1))
                .copied()
                .collect();

            for key in to_remove {
                self.entries.remove(&key);
            }
            tracing::debug!(remaining = self.entries.len(), "evicted cached plans");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            max_entries: self.max_entries,
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new(MAX_CACHED_PLANS)
    }
}

fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    value.to_bits().hash(state);
}

fn hash_config<H: Hasher>(config: &ChartConfig, state: &mut H) {
    for value in [
        config.canvas_width,
        config.canvas_height,
        config.margins.top,
        config.margins.right,
        config.margins.bottom,
        config.margins.left,
        config.sigma_multiplier,
        config.domain_padding,
        config.x_domain_start,
    ] {
        hash_f64(value, state);
    }
    config.y_tick_count.hash(state);
    config.goal_legend.hash(state);
    config.palette.hash(state);
}

/// Hash of every field that influences the plan
fn fingerprint(request: &ChartRequest) -> u64 {
    let mut hasher = DefaultHasher::new();

    request.samples.len().hash(&mut hasher);
    for sample in &request.samples {
        hash_f64(sample.x(), &mut hasher);
        hash_f64(sample.y(), &mut hasher);
    }
    request.goal.map(f64::to_bits).hash(&mut hasher);
    request.x_name.hash(&mut hasher);
    request.y_name.hash(&mut hasher);
    request.title.hash(&mut hasher);
    hash_config(&request.config, &mut hasher);

    hasher.finish()
}
