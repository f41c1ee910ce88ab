//! Pixel quantization: turns an RGBA raster into plane and sprite primitives
//! under a capacity budget.
//!
//! Generation and estimation share a single claim walker, so the counts an
//! estimate reports are exactly what a real run would emit.

mod budget;
mod engine;

pub use budget::{Budget, CapacityLimits, MAX_PLANES, MAX_SPRITES};
pub use engine::{
    estimate_usage, PixelQuantizer, QuantizationReport, QuantizeRequest, UsageEstimate,
    BLOCK_SIZE, COLOR_TOLERANCE, FALLBACK_SPRITE_NAME, PLANE_BASE_Z, SPRITE_BASE_Z, Z_STEP,
};
