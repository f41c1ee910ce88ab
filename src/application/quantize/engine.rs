use std::sync::Arc;

use tracing::debug;

use super::budget::Budget;
use crate::application::ports::NamePool;
use crate::domain::entities::{Plane, PrimitiveSet, Sprite};
use crate::domain::value_objects::{CornerPoint, Raster, Rgb};

/// Side length of a uniform block
pub const BLOCK_SIZE: u32 = 3;

/// Largest per-channel distance from the block mean
pub const COLOR_TOLERANCE: i32 = 48;

/// Depth of the first generated plane
pub const PLANE_BASE_Z: f64 = -350.0;

/// Depth of the first generated sprite
pub const SPRITE_BASE_Z: f64 = PLANE_BASE_Z - 100.0;

/// Depth spacing between consecutive generated primitives
pub const Z_STEP: f64 = 0.00001;

/// Sprite name used when the name pool is empty
pub const FALLBACK_SPRITE_NAME: &str = "pixel";

/// One quantization run's inputs
#[derive(Debug, Clone, Copy)]
pub struct QuantizeRequest<'a> {
    pub raster: &'a Raster,
    pub alpha_cutoff: u8,
    /// Added to every emitted coordinate
    pub offset: (i64, i64),
    pub budget: Budget,
}

impl<'a> QuantizeRequest<'a> {
    pub fn new(raster: &'a Raster, alpha_cutoff: u8, budget: Budget) -> Self {
        Self {
            raster,
            alpha_cutoff,
            offset: (0, 0),
            budget,
        }
    }

    pub fn with_offset(mut self, x: i64, y: i64) -> Self {
        self.offset = (x, y);
        self
    }
}

/// Primitive counts a run uses, plus the visible pixels it could not place
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageEstimate {
    pub planes: usize,
    pub sprites: usize,
    pub overflow: usize,
}

impl UsageEstimate {
    pub fn fits(&self) -> bool {
        self.overflow == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantizationReport {
    pub primitives: PrimitiveSet,
    pub usage: UsageEstimate,
}

/// Receives every claim the walker makes, in claim order
trait ClaimSink {
    fn block(&mut self, x: u32, y: u32, color: Rgb);
    fn pixel_plane(&mut self, x: u32, y: u32, color: Rgb);
    fn pixel_sprite(&mut self, x: u32, y: u32, color: Rgb);
}

#[derive(Default)]
struct CountingSink;

impl ClaimSink for CountingSink {
    fn block(&mut self, _x: u32, _y: u32, _color: Rgb) {}
    fn pixel_plane(&mut self, _x: u32, _y: u32, _color: Rgb) {}
    fn pixel_sprite(&mut self, _x: u32, _y: u32, _color: Rgb) {}
}

struct BuildingSink<'p> {
    offset: (i64, i64),
    name_pool: &'p dyn NamePool,
    primitives: PrimitiveSet,
}

impl BuildingSink<'_> {
    fn push_plane(&mut self, x: u32, y: u32, size: i64, color: Rgb) {
        let z = PLANE_BASE_Z - self.primitives.planes.len() as f64 * Z_STEP;
        let corners = CornerPoint::square(
            x as i64 + self.offset.0,
            y as i64 + self.offset.1,
            size,
        );
        self.primitives
            .planes
            .push(Plane::pixel_art(color, z, corners));
    }
}

impl ClaimSink for BuildingSink<'_> {
    fn block(&mut self, x: u32, y: u32, color: Rgb) {
        self.push_plane(x, y, BLOCK_SIZE as i64, color);
    }

    fn pixel_plane(&mut self, x: u32, y: u32, color: Rgb) {
        self.push_plane(x, y, 1, color);
    }

    fn pixel_sprite(&mut self, x: u32, y: u32, color: Rgb) {
        let index = self.primitives.sprites.len();
        let z = SPRITE_BASE_Z - index as f64 * Z_STEP;
        let name = self
            .name_pool
            .name_for(index)
            .unwrap_or_else(|| FALLBACK_SPRITE_NAME.to_string());

        self.primitives.sprites.push(Sprite::pixel_art(
            x as i64 + self.offset.0,
            y as i64 + self.offset.1,
            z,
            color,
            name,
        ));
    }
}

fn rgb_of(pixel: [u8; 4]) -> Rgb {
    Rgb::from_channels(pixel[0], pixel[1], pixel[2])
}

/// Top-to-bottom, left-to-right
fn row_major(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
}

struct ClaimWalker<'r> {
    raster: &'r Raster,
    alpha_cutoff: u8,
    width: u32,
    claimed: Vec<bool>,
}

impl<'r> ClaimWalker<'r> {
    fn new(raster: &'r Raster, alpha_cutoff: u8) -> Self {
        let width = raster.width();
        Self {
            raster,
            alpha_cutoff,
            width,
            claimed: vec![false; width as usize * raster.height() as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn is_open(&self, x: u32, y: u32) -> bool {
        !self.claimed[self.index(x, y)] && self.raster.is_visible(x, y, self.alpha_cutoff)
    }

    fn claim(&mut self, x: u32, y: u32) {
        let index = self.index(x, y);
        self.claimed[index] = true;
    }

    /// Mean colour of the block anchored at `(x, y)` if every pixel is open and
    /// every channel sits within tolerance of the mean
    fn uniform_block(&self, x: u32, y: u32) -> Option<Rgb> {
        let mut sums = [0i32; 3];
        for dy in 0..BLOCK_SIZE {
            for dx in 0..BLOCK_SIZE {
                if !self.is_open(x + dx, y + dy) {
                    return None;
                }
                let pixel = self.raster.pixel(x + dx, y + dy);
                for (sum, channel) in sums.iter_mut().zip(pixel) {
                    *sum += channel as i32;
                }
            }
        }

        let count = (BLOCK_SIZE * BLOCK_SIZE) as i32;
        let mean = sums.map(|sum| sum / count);
        for dy in 0..BLOCK_SIZE {
            for dx in 0..BLOCK_SIZE {
                let pixel = self.raster.pixel(x + dx, y + dy);
                let within = mean
                    .iter()
                    .zip(pixel)
                    .all(|(m, c)| (c as i32 - m).abs() <= COLOR_TOLERANCE);
                if !within {
                    return None;
                }
            }
        }

        Some(Rgb::from_channels(mean[0] as u8, mean[1] as u8, mean[2] as u8))
    }

    /// Run the three claim passes and return the usage
    fn walk<S: ClaimSink>(mut self, budget: Budget, sink: &mut S) -> UsageEstimate {
        let (width, height) = (self.raster.width(), self.raster.height());
        let plane_limit = budget.plane_limit();
        let sprite_limit = budget.sprite_limit();
        let mut usage = UsageEstimate::default();

        if width >= BLOCK_SIZE && height >= BLOCK_SIZE {
            let anchors = row_major(width - BLOCK_SIZE + 1, height - BLOCK_SIZE + 1);
            for (x, y) in anchors {
                if usage.planes >= plane_limit {
                    break;
                }
                if let Some(color) = self.uniform_block(x, y) {
                    for dy in 0..BLOCK_SIZE {
                        for dx in 0..BLOCK_SIZE {
                            self.claim(x + dx, y + dy);
                        }
                    }
                    sink.block(x, y, color);
                    usage.planes += 1;
                }
            }
        }

        for (x, y) in row_major(width, height) {
            if usage.planes >= plane_limit {
                break;
            }
            if self.is_open(x, y) {
                self.claim(x, y);
                sink.pixel_plane(x, y, rgb_of(self.raster.pixel(x, y)));
                usage.planes += 1;
            }
        }

        for (x, y) in row_major(width, height) {
            if usage.sprites >= sprite_limit {
                break;
            }
            if self.is_open(x, y) {
                self.claim(x, y);
                sink.pixel_sprite(x, y, rgb_of(self.raster.pixel(x, y)));
                usage.sprites += 1;
            }
        }

        usage.overflow = row_major(width, height)
            .filter(|&(x, y)| self.is_open(x, y))
            .count();
        usage
    }
}

/// Count what a run would emit without building any primitive
pub fn estimate_usage(raster: &Raster, alpha_cutoff: u8, budget: Budget) -> UsageEstimate {
    ClaimWalker::new(raster, alpha_cutoff).walk(budget, &mut CountingSink)
}

/// Converts rasters into pixel-art planes and sprites
pub struct PixelQuantizer {
    name_pool: Arc<dyn NamePool>,
}

impl PixelQuantizer {
    pub fn new(name_pool: Arc<dyn NamePool>) -> Self {
        Self { name_pool }
    }

    pub fn quantize(&self, request: QuantizeRequest<'_>) -> QuantizationReport {
        let mut sink = BuildingSink {
            offset: request.offset,
            name_pool: self.name_pool.as_ref(),
            primitives: PrimitiveSet::default(),
        };
        let usage = ClaimWalker::new(request.raster, request.alpha_cutoff)
            .walk(request.budget, &mut sink);

        debug!(
            width = request.raster.width(),
            height = request.raster.height(),
            planes = usage.planes,
            sprites = usage.sprites,
            overflow = usage.overflow,
            "Quantized raster"
        );

        QuantizationReport {
            primitives: sink.primitives,
            usage,
        }
    }

    pub fn estimate(&self, request: QuantizeRequest<'_>) -> UsageEstimate {
        estimate_usage(request.raster, request.alpha_cutoff, request.budget)
    }
}
