//! File-backed inputs: decorative sprite names and source images

mod error;
mod image_loader;
mod name_pool;

pub use error::AssetError;
pub use image_loader::load_raster;
pub use name_pool::StaticNamePool;
