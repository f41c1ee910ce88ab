use serde_json::{Map, Value};

use super::fields::{take_array, take_f64, take_i64, take_object, type_name};
use super::{Plane, PrimitiveSet, Sprite};
use crate::domain::errors::DomainError;

/// Decoded room photo.
///
/// Built from one packet's decompressed text, mutated while merging editor
/// primitives, then handed to the serializer. `filters` and `modifiers` are
/// open-ended and kept as untyped JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    planes: Vec<Plane>,
    sprites: Vec<Sprite>,
    filters: Vec<Value>,
    modifiers: Map<String, Value>,
    room_id: i64,
    zoom: Option<f64>,
}

impl Document {
    pub fn new(room_id: i64) -> Self {
        Self {
            planes: Vec::new(),
            sprites: Vec::new(),
            filters: Vec::new(),
            modifiers: Map::new(),
            room_id,
            zoom: None,
        }
    }

    /// Parse photo text. Only malformed JSON or a non-object top level fails.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let mut root = match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => map,
            other => return Err(DomainError::NotAnObject(type_name(&other))),
        };

        let planes = take_array(&mut root, "planes")
            .into_iter()
            .map(Plane::from_json)
            .collect();
        let sprites = take_array(&mut root, "sprites")
            .into_iter()
            .map(Sprite::from_json)
            .collect();

        Ok(Self {
            planes,
            sprites,
            filters: take_array(&mut root, "filters"),
            modifiers: take_object(&mut root, "modifiers"),
            room_id: take_i64(&mut root, "roomid").unwrap_or(0),
            zoom: take_f64(&mut root, "zoom"),
        })
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn filters(&self) -> &[Value] {
        &self.filters
    }

    pub fn modifiers(&self) -> &Map<String, Value> {
        &self.modifiers
    }

    pub fn room_id(&self) -> i64 {
        self.room_id
    }

    pub fn zoom(&self) -> Option<f64> {
        self.zoom
    }

    /// Independent copy of the planes and sprites
    pub fn snapshot(&self) -> PrimitiveSet {
        PrimitiveSet::new(self.planes.clone(), self.sprites.clone())
    }

    /// Replace planes and sprites wholesale
    pub fn set_primitives(&mut self, primitives: PrimitiveSet) {
        self.planes = primitives.planes;
        self.sprites = primitives.sprites;
    }

    pub fn set_filters(&mut self, filters: Vec<Value>) {
        self.filters = filters;
    }

    pub fn set_modifiers(&mut self, modifiers: Map<String, Value>) {
        self.modifiers = modifiers;
    }

    /// Override the zoom field unconditionally
    pub fn force_zoom(&mut self, zoom: f64) {
        self.zoom = Some(zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_document() {
        let text = r#"{"planes":[{"z":1},{"z":2},{"z":3,"type":"pixel_art_plane"}],
            "sprites":[{"name":"chair","x":4,"y":5,"z":6}],
            "modifiers":{"b":1,"a":2},"filters":[{"name":"sepia"}],"roomid":77,"zoom":2}"#;
        let doc = Document::parse(text).unwrap();

        assert_eq!(doc.planes().len(), 3);
        assert_eq!(doc.sprites().len(), 1);
        assert_eq!(doc.filters(), &[json!({"name": "sepia"})]);
        assert_eq!(doc.room_id(), 77);
        assert_eq!(doc.zoom(), Some(2.0));
        let keys: Vec<&String> = doc.modifiers().keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_parse_missing_keys_default() {
        let doc = Document::parse("{}").unwrap();
        assert!(doc.planes().is_empty());
        assert!(doc.sprites().is_empty());
        assert!(doc.filters().is_empty());
        assert!(doc.modifiers().is_empty());
        assert_eq!(doc.room_id(), 0);
        assert_eq!(doc.zoom(), None);
    }

    #[test]
    fn test_parse_zoom_sentinel_is_present() {
        let doc = Document::parse(r#"{"zoom":-1}"#).unwrap();
        assert_eq!(doc.zoom(), Some(-1.0));
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = Document::parse(r#"{"planes":["#).unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }

    #[test]
    fn test_parse_non_object() {
        let err = Document::parse("[1,2]").unwrap_err();
        assert!(matches!(err, DomainError::NotAnObject("array")));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let doc = Document::parse(r#"{"planes":[{"z":1}]}"#).unwrap();
        let mut snapshot = doc.snapshot();
        snapshot.planes[0].z = 99.0;
        snapshot.planes.push(Plane::placeholder());

        assert_eq!(doc.planes().len(), 1);
        assert_eq!(doc.planes()[0].z, 1.0);
    }

    #[test]
    fn test_force_zoom() {
        let mut doc = Document::new(1);
        doc.force_zoom(0.5);
        assert_eq!(doc.zoom(), Some(0.5));
    }
}
