use serde_json::{Map, Value};

use super::fields::{take_array, take_bool, take_color, take_f64, take_string};
use crate::domain::value_objects::{CornerPoint, PrimitiveKind, Rgb};

/// Coloured polygon primitive of a photo
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub color: Rgb,
    pub z: f64,
    pub corner_points: Vec<CornerPoint>,
    /// Opaque, never generated
    pub tex_cols: Vec<Value>,
    /// Opaque, never generated
    pub masks: Vec<Value>,
    pub bottom_aligned: bool,
    pub kind: Option<PrimitiveKind>,
    /// Unrecognised keys, plus known keys whose value did not fit the typed
    /// field, kept verbatim in their original order
    pub extra: Map<String, Value>,
}

impl Plane {
    /// Zero-area plane used to pad the two control slots
    pub fn placeholder() -> Self {
        Self {
            color: Rgb::BLACK,
            z: 0.0,
            corner_points: vec![CornerPoint::default(); 4],
            tex_cols: Vec::new(),
            masks: Vec::new(),
            bottom_aligned: false,
            kind: None,
            extra: Map::new(),
        }
    }

    /// Square plane produced by the pixel quantizer
    pub fn pixel_art(color: Rgb, z: f64, corner_points: [CornerPoint; 4]) -> Self {
        Self {
            color,
            z,
            corner_points: corner_points.to_vec(),
            tex_cols: Vec::new(),
            masks: Vec::new(),
            bottom_aligned: false,
            kind: Some(PrimitiveKind::PixelArtPlane),
            extra: Map::new(),
        }
    }

    /// Build from an untyped JSON node, defaulting anything missing
    pub fn from_json(value: Value) -> Self {
        let mut object = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let color = take_color(&mut object, "color").unwrap_or_default();
        let z = take_f64(&mut object, "z").unwrap_or(0.0);
        let corner_points = take_corner_points(&mut object).unwrap_or_default();
        let tex_cols = take_array(&mut object, "texCols");
        let masks = take_array(&mut object, "masks");
        let bottom_aligned = take_bool(&mut object, "bottomAligned").unwrap_or(false);
        let kind = take_string(&mut object, "type").map(|tag| PrimitiveKind::from_tag(&tag));

        Self {
            color,
            z,
            corner_points,
            tex_cols,
            masks,
            bottom_aligned,
            kind,
            extra: object,
        }
    }

    /// Set the depth, replacing a non-numeric source depth if there was one
    pub fn set_z(&mut self, z: f64) {
        self.z = z;
        self.extra.shift_remove("z");
    }

    /// Whether this plane was generated by the editor
    pub fn is_editor(&self) -> bool {
        self.kind
            .as_ref()
            .map(PrimitiveKind::is_editor_plane)
            .unwrap_or(false)
    }
}

/// Typed corner points, only when every point is exactly `{"x":int,"y":int}`.
///
/// Anything else is left in the object and passes through untouched.
fn take_corner_points(object: &mut Map<String, Value>) -> Option<Vec<CornerPoint>> {
    let points = match object.get("cornerPoints") {
        Some(Value::Array(items)) => items
            .iter()
            .map(corner_point)
            .collect::<Option<Vec<_>>>()?,
        _ => return None,
    };
    object.shift_remove("cornerPoints");
    Some(points)
}

fn corner_point(value: &Value) -> Option<CornerPoint> {
    let point = value.as_object()?;
    if !point.keys().map(String::as_str).eq(["x", "y"]) {
        return None;
    }
    Some(CornerPoint::new(point["x"].as_i64()?, point["y"].as_i64()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_placeholder_is_zero_area() {
        let plane = Plane::placeholder();
        assert_eq!(plane.corner_points.len(), 4);
        assert!(plane.corner_points.iter().all(|p| *p == CornerPoint::new(0, 0)));
        assert_eq!(plane.z, 0.0);
        assert!(plane.kind.is_none());
    }

    #[test]
    fn test_from_json_reads_known_fields() {
        let plane = Plane::from_json(json!({
            "color": 0x102030,
            "z": 12.5,
            "cornerPoints": [{"x": 1, "y": 2}, {"x": 3, "y": 4}],
            "texCols": [{"assetNames": ["a"]}],
            "masks": [],
            "bottomAligned": true,
            "type": "pixel_art_plane"
        }));

        assert_eq!(plane.color, Rgb::from_packed(0x102030));
        assert_eq!(plane.z, 12.5);
        assert_eq!(plane.corner_points, vec![CornerPoint::new(1, 2), CornerPoint::new(3, 4)]);
        assert_eq!(plane.tex_cols.len(), 1);
        assert!(plane.bottom_aligned);
        assert!(plane.is_editor());
        assert!(plane.extra.is_empty());
    }

    #[test]
    fn test_from_json_defaults_and_extras() {
        let plane = Plane::from_json(json!({"texCols": [], "custom": 7}));
        assert_eq!(plane.color, Rgb::BLACK);
        assert_eq!(plane.z, 0.0);
        assert!(plane.corner_points.is_empty());
        assert!(!plane.is_editor());
        assert_eq!(plane.extra.get("custom"), Some(&json!(7)));
    }

    #[test]
    fn test_untyped_values_stay_verbatim() {
        let plane = Plane::from_json(json!({
            "color": 4279383126u64,
            "cornerPoints": [{"x": 1.5, "y": 2}],
            "type": null
        }));

        assert_eq!(plane.color, Rgb::BLACK);
        assert!(plane.corner_points.is_empty());
        assert!(plane.kind.is_none());
        assert_eq!(plane.extra.get("color"), Some(&json!(4279383126u64)));
        assert_eq!(plane.extra.get("cornerPoints"), Some(&json!([{"x": 1.5, "y": 2}])));
        assert_eq!(plane.extra.get("type"), Some(&Value::Null));
    }

    #[test]
    fn test_corner_point_with_extra_key_stays_verbatim() {
        let plane = Plane::from_json(json!({"cornerPoints": [{"x": 1, "y": 2, "w": 3}]}));
        assert!(plane.corner_points.is_empty());
        assert!(plane.extra.contains_key("cornerPoints"));
    }

    #[test]
    fn test_set_z_replaces_untyped_depth() {
        let mut plane = Plane::from_json(json!({"z": "far"}));
        assert!(plane.extra.contains_key("z"));

        plane.set_z(4.0);
        assert_eq!(plane.z, 4.0);
        assert!(!plane.extra.contains_key("z"));
    }

    #[test]
    fn test_pixel_art_is_editor() {
        let plane = Plane::pixel_art(Rgb::from_packed(1), -350.0, CornerPoint::square(0, 0, 3));
        assert!(plane.is_editor());
        assert_eq!(plane.corner_points.len(), 4);
    }
}
