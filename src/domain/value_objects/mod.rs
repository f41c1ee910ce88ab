mod color;
mod corner_point;
mod primitive_kind;
mod raster;

pub use color::Rgb;
pub use corner_point::CornerPoint;
pub use primitive_kind::{PrimitiveKind, BADGE_IMAGE_MARKER};
pub use raster::{Raster, ScaleRounding};
