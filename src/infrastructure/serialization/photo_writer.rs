use std::fmt::Write as _;

use serde_json::{Map, Value};

use crate::domain::entities::{Plane, Sprite};
use crate::domain::value_objects::CornerPoint;

/// Incremental builder for photo text.
///
/// Nested values use compact JSON. Top-level fields use the spaced
/// `"key" : value` form the photo consumer expects.
#[derive(Debug, Default)]
pub struct PhotoWriter {
    out: String,
    has_fields: bool,
}

impl PhotoWriter {
    pub fn new() -> Self {
        Self {
            out: String::from("{ "),
            has_fields: false,
        }
    }

    /// Start a top-level field; the first field takes no comma
    pub fn field(&mut self, key: &str) -> &mut Self {
        if self.has_fields {
            self.out.push(',');
        }
        self.has_fields = true;
        self.write_str(key);
        self.out.push_str(" : ");
        self
    }

    /// Top-level integer field
    pub fn int_field(&mut self, key: &str, value: i64) -> &mut Self {
        self.field(key);
        self.write_int(value);
        self
    }

    /// Text written so far
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Length in UTF-16 code units
    pub fn utf16_len(&self) -> usize {
        self.out.encode_utf16().count()
    }

    pub fn finish(mut self) -> String {
        self.out.push_str(" }");
        self.out
    }

    pub fn write_int(&mut self, value: i64) {
        let _ = write!(self.out, "{}", value);
    }

    /// Shortest round-trip form, without a fraction when integral
    pub fn write_float(&mut self, value: f64) {
        if value.is_finite() {
            let _ = write!(self.out, "{}", value);
        } else {
            self.out.push_str("null");
        }
    }

    pub fn write_bool(&mut self, value: bool) {
        self.out.push_str(if value { "true" } else { "false" });
    }

    /// Quoted string with only quotes, backslashes, control characters and
    /// characters outside the Basic Multilingual Plane escaped
    pub fn write_str(&mut self, value: &str) {
        self.out.push('"');
        for c in value.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                '\u{08}' => self.out.push_str("\\b"),
                '\u{0c}' => self.out.push_str("\\f"),
                c if (c as u32) < 0x20 => {
                    let _ = write!(self.out, "\\u{:04X}", c as u32);
                }
                // Astral characters go out as an escaped surrogate pair
                c if (c as u32) > 0xFFFF => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units).iter() {
                        let _ = write!(self.out, "\\u{:04X}", unit);
                    }
                }
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }

    pub fn write_value(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(b) => self.write_bool(*b),
            // Keeps the literal text the number was parsed from
            Value::Number(n) => self.out.push_str(&n.to_string()),
            Value::String(s) => self.write_str(s),
            Value::Array(items) => self.write_values(items),
            Value::Object(map) => self.write_object(map),
        }
    }

    pub fn write_values(&mut self, items: &[Value]) {
        self.write_seq(items, Self::write_value);
    }

    pub fn write_object(&mut self, map: &Map<String, Value>) {
        self.out.push('{');
        self.write_members(map, true);
        self.out.push('}');
    }

    pub fn write_planes(&mut self, planes: &[Plane]) {
        self.write_seq(planes, Self::write_plane);
    }

    pub fn write_sprites(&mut self, sprites: &[Sprite]) {
        self.write_seq(sprites, Self::write_sprite);
    }

    fn write_seq<T>(&mut self, items: &[T], mut write_item: impl FnMut(&mut Self, &T)) {
        self.out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            write_item(self, item);
        }
        self.out.push(']');
    }

    fn key(&mut self, key: &str, first: bool) {
        if !first {
            self.out.push(',');
        }
        self.write_str(key);
        self.out.push(':');
    }

    /// Write `"k":v` pairs; `first` says whether nothing precedes them
    fn write_members(&mut self, map: &Map<String, Value>, mut first: bool) {
        for (key, value) in map {
            self.key(key, first);
            self.write_value(value);
            first = false;
        }
    }

    fn write_corner(&mut self, point: &CornerPoint) {
        self.out.push('{');
        self.key("x", true);
        self.write_int(point.x);
        self.key("y", false);
        self.write_int(point.y);
        self.out.push('}');
    }

    /// Open a typed member unless `extra` holds the source value for `key`
    fn typed_key(&mut self, key: &str, extra: &Map<String, Value>, first: &mut bool) -> bool {
        if extra.contains_key(key) {
            return false;
        }
        self.key(key, *first);
        *first = false;
        true
    }

    fn write_plane(&mut self, plane: &Plane) {
        let extra = &plane.extra;
        let mut first = true;
        self.out.push('{');
        if self.typed_key("color", extra, &mut first) {
            self.write_int(plane.color.packed() as i64);
        }
        if self.typed_key("z", extra, &mut first) {
            self.write_float(plane.z);
        }
        if self.typed_key("cornerPoints", extra, &mut first) {
            self.write_seq(&plane.corner_points, Self::write_corner);
        }
        if self.typed_key("texCols", extra, &mut first) {
            self.write_values(&plane.tex_cols);
        }
        if self.typed_key("masks", extra, &mut first) {
            self.write_values(&plane.masks);
        }
        if self.typed_key("bottomAligned", extra, &mut first) {
            self.write_bool(plane.bottom_aligned);
        }
        if let Some(kind) = &plane.kind {
            if self.typed_key("type", extra, &mut first) {
                self.write_str(kind.as_tag());
            }
        }
        self.write_members(extra, first);
        self.out.push('}');
    }

    fn write_sprite(&mut self, sprite: &Sprite) {
        let extra = &sprite.extra;
        let mut first = true;
        self.out.push('{');
        if let Some(flip_h) = sprite.flip_h {
            if self.typed_key("flipH", extra, &mut first) {
                self.write_bool(flip_h);
            }
        }
        if self.typed_key("x", extra, &mut first) {
            self.write_int(sprite.x);
        }
        if self.typed_key("y", extra, &mut first) {
            self.write_int(sprite.y);
        }
        if self.typed_key("z", extra, &mut first) {
            self.write_float(sprite.z);
        }
        if let Some(color) = sprite.color {
            if self.typed_key("color", extra, &mut first) {
                self.write_int(color.packed() as i64);
            }
        }
        if self.typed_key("name", extra, &mut first) {
            self.write_str(&sprite.name);
        }
        if let Some(kind) = &sprite.kind {
            if self.typed_key("type", extra, &mut first) {
                self.write_str(kind.as_tag());
            }
        }
        self.write_members(extra, first);
        self.out.push('}');
    }
}
