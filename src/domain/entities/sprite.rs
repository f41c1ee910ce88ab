use serde_json::{Map, Value};

use super::fields::{take_bool, take_color, take_f64, take_i64, take_string};
use crate::domain::value_objects::{PrimitiveKind, Rgb, BADGE_IMAGE_MARKER};

/// Positioned point primitive: a furni/decoration image, a badge, or a pixel
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub x: i64,
    pub y: i64,
    pub z: f64,
    /// Only meaningful for generated pixel sprites
    pub color: Option<Rgb>,
    pub name: String,
    pub flip_h: Option<bool>,
    pub kind: Option<PrimitiveKind>,
    /// Unrecognised keys, plus known keys whose value did not fit the typed
    /// field, kept verbatim in their original order
    pub extra: Map<String, Value>,
}

impl Sprite {
    /// Single-pixel sprite produced by the pixel quantizer
    pub fn pixel_art(x: i64, y: i64, z: f64, color: Rgb, name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            color: Some(color),
            name: name.into(),
            flip_h: Some(false),
            kind: Some(PrimitiveKind::PixelArtSprite),
            extra: Map::new(),
        }
    }

    /// Badge image placed by the editor as a text overlay
    pub fn badge(x: i64, y: i64, z: f64, image_url: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            color: None,
            name: image_url.into(),
            flip_h: None,
            kind: Some(PrimitiveKind::Badge),
            extra: Map::new(),
        }
    }

    /// Build from an untyped JSON node, defaulting anything missing
    pub fn from_json(value: Value) -> Self {
        let mut object = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let flip_h = take_bool(&mut object, "flipH");
        let x = take_i64(&mut object, "x").unwrap_or(0);
        let y = take_i64(&mut object, "y").unwrap_or(0);
        let z = take_f64(&mut object, "z").unwrap_or(0.0);
        let color = take_color(&mut object, "color");
        let name = take_string(&mut object, "name").unwrap_or_default();
        let kind = take_string(&mut object, "type").map(|tag| PrimitiveKind::from_tag(&tag));

        Self {
            x,
            y,
            z,
            color,
            name,
            flip_h,
            kind,
            extra: object,
        }
    }

    /// Whether this sprite was placed by the editor
    pub fn is_editor(&self) -> bool {
        let tagged = self
            .kind
            .as_ref()
            .map(PrimitiveKind::is_editor_sprite)
            .unwrap_or(false);
        tagged || self.name.contains(BADGE_IMAGE_MARKER)
    }
}
