mod clock;
mod name_pool;
mod photo_encoder;

pub use clock::Clock;
pub use name_pool::NamePool;
pub use photo_encoder::PhotoEncoder;

#[cfg(test)]
pub use clock::MockClock;
#[cfg(test)]
pub use name_pool::MockNamePool;
#[cfg(test)]
pub use photo_encoder::MockPhotoEncoder;
