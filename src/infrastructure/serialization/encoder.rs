use std::sync::Arc;

use super::checksum::TruncatedTime;
use super::photo_writer::PhotoWriter;
use crate::application::ports::{Clock, PhotoEncoder};
use crate::domain::entities::Document;

/// Serializes photos in the exact layout the consumer checks, stamped with
/// the current time
pub struct ChecksumPhotoEncoder {
    clock: Arc<dyn Clock>,
}

impl ChecksumPhotoEncoder {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Serialize as if the clock read `now_millis`.
    ///
    /// The integrity fields depend on the text before them, so the order of
    /// writes below is part of the format.
    pub fn encode_at(document: &Document, now_millis: i64) -> String {
        let mut writer = PhotoWriter::new();
        writer.field("planes").write_planes(document.planes());
        writer.field("sprites").write_sprites(document.sprites());
        writer.field("modifiers").write_object(document.modifiers());
        writer.field("filters").write_values(document.filters());
        writer.int_field("roomid", document.room_id());
        if let Some(zoom) = document.zoom() {
            writer.field("zoom").write_float(zoom);
        }

        let time = TruncatedTime::from_millis(now_millis);
        writer.int_field("status", time.status());
        let key = time.key(writer.utf16_len());
        let timestamp = time.timestamp(writer.as_str().as_bytes(), key, document.room_id());
        writer.int_field("timestamp", timestamp);
        writer.int_field("checksum", time.checksum(key));
        writer.finish()
    }
}

impl PhotoEncoder for ChecksumPhotoEncoder {
    fn encode(&self, document: &Document) -> String {
        Self::encode_at(document, self.clock.now_millis())
    }
}
