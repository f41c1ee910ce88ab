//! Checksum serializer: photo text in the byte-exact layout the photo
//! consumer accepts

mod checksum;
mod encoder;
mod photo_writer;

pub use checksum::{score, TruncatedTime};
pub use encoder::ChecksumPhotoEncoder;
pub use photo_writer::PhotoWriter;
