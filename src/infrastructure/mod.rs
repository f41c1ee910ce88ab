pub mod assets;
pub mod clock;
pub mod serialization;

pub use assets::{load_raster, AssetError, StaticNamePool};
pub use clock::SystemClock;
pub use serialization::ChecksumPhotoEncoder;
