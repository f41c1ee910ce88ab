//! Picks the largest image scale whose quantization fits the budget

use tracing::debug;

use super::quantize::{estimate_usage, Budget};
use crate::domain::value_objects::{Raster, ScaleRounding};

/// Binary search steps over the percent range
pub const SEARCH_ITERATIONS: usize = 9;

pub const MIN_PERCENT: f64 = 1.0;
pub const MAX_PERCENT: f64 = 100.0;

/// Effective scale percent for a linear slider position.
///
/// Quadratic, rounded to two decimals.
pub fn percent_from_slider(slider: f64) -> f64 {
    let v = slider.clamp(MIN_PERCENT, MAX_PERCENT);
    (v * v / 100.0 * 100.0).round() / 100.0
}

/// Slider position that yields `percent`
pub fn slider_from_percent(percent: f64) -> f64 {
    let p = percent.clamp(MIN_PERCENT, MAX_PERCENT);
    (p * 100.0).sqrt()
}

/// Scale `source` to `percent` for display and quantization, clearing pixels
/// at or below the cutoff
pub fn prepare_raster(source: &Raster, percent: f64, alpha_cutoff: u8) -> Raster {
    let mut raster = source.scaled(percent, ScaleRounding::Nearest);
    raster.apply_alpha_cutoff(alpha_cutoff);
    raster
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedScale {
    pub percent: f64,
    pub slider: f64,
}

/// Searches for the largest zero-overflow scale of a source image
#[derive(Debug, Clone, Copy)]
pub struct CapacityPlanner {
    budget: Budget,
    alpha_cutoff: u8,
}

impl CapacityPlanner {
    pub fn new(budget: Budget, alpha_cutoff: u8) -> Self {
        Self {
            budget,
            alpha_cutoff,
        }
    }

    /// Overflow-free scale found by bisecting `[1, 100]`.
    ///
    /// Falls back to 1% when even the first midpoint overflows.
    pub fn best_percent(&self, source: &Raster) -> f64 {
        let (mut low, mut high, mut best) = (MIN_PERCENT, MAX_PERCENT, MIN_PERCENT);

        for _ in 0..SEARCH_ITERATIONS {
            let mid = (low + high) / 2.0;
            let mut candidate = source.scaled(mid, ScaleRounding::Floor);
            candidate.apply_alpha_cutoff(self.alpha_cutoff);
            let usage = estimate_usage(&candidate, self.alpha_cutoff, self.budget);

            if usage.overflow > 0 {
                high = mid;
            } else {
                best = mid;
                low = mid;
            }
        }

        let best = best.clamp(MIN_PERCENT, MAX_PERCENT);
        debug!(
            width = source.width(),
            height = source.height(),
            percent = best,
            "Planned raster scale"
        );
        best
    }

    /// Best scale expressed both as a percent and a slider position
    pub fn plan(&self, source: &Raster) -> PlannedScale {
        let percent = self.best_percent(source);
        PlannedScale {
            percent,
            slider: slider_from_percent(percent),
        }
    }
}
