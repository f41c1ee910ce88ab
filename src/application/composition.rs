//! Merging generated content into a captured photo and fixing up the two
//! control planes afterwards

use crate::domain::entities::{PrimitiveSet, Sprite, CONTROL_PLANE_COUNT};

use super::quantize::{SPRITE_BASE_Z, Z_STEP};

/// Per-plane depth weight used for the front control plane
pub const PLANE_Z_WEIGHT: f64 = 2.31743;

/// Per-sprite depth weight used for the front control plane
pub const SPRITE_Z_WEIGHT: f64 = 1.776104;

/// Badge image the editor places on top of the photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub x: i64,
    pub y: i64,
    pub image_url: String,
}

impl Overlay {
    pub fn new(x: i64, y: i64, image_url: impl Into<String>) -> Self {
        Self {
            x,
            y,
            image_url: image_url.into(),
        }
    }

    fn to_sprite(&self, index: usize) -> Sprite {
        Sprite::badge(
            self.x,
            self.y,
            SPRITE_BASE_Z - index as f64 * Z_STEP,
            self.image_url.clone(),
        )
    }
}

/// Derive the depths of the two control planes from everything else.
///
/// Pads with placeholders first, so at least two planes always exist.
pub fn recalculate_z(primitives: &mut PrimitiveSet) {
    primitives.pad_control_planes();

    let sprite_max = primitives
        .sprites
        .iter()
        .map(|sprite| sprite.z)
        .fold(0.0, f64::max);
    let plane_max = primitives.planes[CONTROL_PLANE_COUNT..]
        .iter()
        .map(|plane| plane.z)
        .fold(0.0, f64::max);
    let overall = sprite_max.max(plane_max);

    let plane_count = primitives.planes.len() as f64;
    let sprite_count = primitives.sprites.len() as f64;
    primitives.planes[0]
        .set_z((plane_count - 1.0) * PLANE_Z_WEIGHT + sprite_count * SPRITE_Z_WEIGHT + overall);
    primitives.planes[1].set_z(overall);
}

/// Build what the editor applies: the capture's own content, then the
/// generated primitives, then overlay badges on top
pub fn compose(
    capture: &PrimitiveSet,
    generated: PrimitiveSet,
    overlays: &[Overlay],
) -> PrimitiveSet {
    let mut composed = capture.pass_through();
    composed.extend(generated);
    composed
        .sprites
        .extend(overlays.iter().enumerate().map(|(i, overlay)| overlay.to_sprite(i)));
    recalculate_z(&mut composed);
    composed
}

/// Replace whatever editor content `base` carries with the editor content of
/// `applied`.
///
/// Pass-through primitives always come from `base`, so content injected into
/// an earlier packet is never duplicated.
pub fn merge_for_injection(applied: &PrimitiveSet, base: &PrimitiveSet) -> PrimitiveSet {
    let mut merged = base.pass_through();
    merged.extend(applied.editor_only());
    recalculate_z(&mut merged);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Plane;
    use crate::domain::value_objects::{CornerPoint, Rgb};
    use serde_json::json;

    fn plane_at(z: f64) -> Plane {
        Plane::from_json(json!({ "z": z }))
    }

    fn generated_plane(z: f64) -> Plane {
        Plane::pixel_art(Rgb::from_packed(0xff0000), z, CornerPoint::square(0, 0, 1))
    }

    #[test]
    fn test_single_plane_is_padded() {
        let mut set = PrimitiveSet::new(vec![plane_at(5.0)], Vec::new());
        recalculate_z(&mut set);

        assert_eq!(set.planes.len(), 2);
        assert!(set.planes[1]
            .corner_points
            .iter()
            .all(|p| *p == CornerPoint::new(0, 0)));
        // Nothing beyond the control planes, so both maxima stay at zero
        assert_eq!(set.planes[1].z, 0.0);
        assert!((set.planes[0].z - PLANE_Z_WEIGHT).abs() < 1e-12);
    }

    #[test]
    fn test_control_planes_from_content() {
        let mut set = PrimitiveSet::new(
            vec![plane_at(0.0), plane_at(0.0), plane_at(12.0), plane_at(3.0)],
            vec![
                Sprite::from_json(json!({"z": 20.5})),
                Sprite::from_json(json!({"z": 1})),
            ],
        );
        recalculate_z(&mut set);

        assert_eq!(set.planes[1].z, 20.5);
        let expected = 3.0 * PLANE_Z_WEIGHT + 2.0 * SPRITE_Z_WEIGHT + 20.5;
        assert!((set.planes[0].z - expected).abs() < 1e-12);
    }

    #[test]
    fn test_negative_content_keeps_zero_floor() {
        let mut set = PrimitiveSet::new(
            vec![plane_at(0.0), plane_at(0.0), generated_plane(-350.0)],
            Vec::new(),
        );
        recalculate_z(&mut set);
        assert_eq!(set.planes[1].z, 0.0);
        assert!((set.planes[0].z - 2.0 * PLANE_Z_WEIGHT).abs() < 1e-12);
    }

    #[test]
    fn test_untyped_control_depth_is_replaced() {
        let mut set = PrimitiveSet::new(
            vec![Plane::from_json(json!({"z": "front"})), plane_at(0.0), plane_at(2.0)],
            Vec::new(),
        );
        recalculate_z(&mut set);

        assert!(!set.planes[0].extra.contains_key("z"));
        assert!((set.planes[0].z - (2.0 * PLANE_Z_WEIGHT + 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_compose_orders_content() {
        let capture = PrimitiveSet::new(
            vec![plane_at(0.0), plane_at(0.0), plane_at(4.0), generated_plane(-350.0)],
            vec![
                Sprite::from_json(json!({"name": "sofa", "z": 2})),
                Sprite::badge(0, 0, -450.0, "old.gif"),
            ],
        );
        let generated = PrimitiveSet::new(
            vec![generated_plane(-350.0)],
            vec![Sprite::pixel_art(1, 1, -450.0, Rgb::BLACK, "pixel")],
        );
        let overlays = [Overlay::new(10, 20, "https://x/habbo-imaging/badge/a.gif")];

        let composed = compose(&capture, generated, &overlays);

        assert_eq!(composed.planes.len(), 4);
        assert_eq!(composed.planes[2].z, 4.0);
        assert!(composed.planes[3].is_editor());
        let names: Vec<&str> = composed.sprites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["sofa", "pixel", "https://x/habbo-imaging/badge/a.gif"]);
        assert_eq!((composed.sprites[2].x, composed.sprites[2].y), (10, 20));
        assert_eq!(composed.sprites[2].z, SPRITE_BASE_Z);
        assert_eq!(composed.planes[1].z, 4.0);
    }

    #[test]
    fn test_merge_replaces_previous_editor_content() {
        let base = PrimitiveSet::new(
            vec![plane_at(0.0), plane_at(0.0), generated_plane(-350.0)],
            vec![
                Sprite::from_json(json!({"name": "lamp"})),
                Sprite::pixel_art(0, 0, -450.0, Rgb::BLACK, "stale"),
            ],
        );
        let applied = PrimitiveSet::new(
            vec![
                plane_at(0.0),
                plane_at(0.0),
                generated_plane(-350.0),
                generated_plane(-350.00001),
            ],
            vec![
                Sprite::from_json(json!({"name": "lamp"})),
                Sprite::pixel_art(3, 3, -450.0, Rgb::BLACK, "fresh"),
            ],
        );

        let merged = merge_for_injection(&applied, &base);

        assert_eq!(merged.planes.len(), 4);
        assert_eq!(merged.planes.iter().filter(|p| p.is_editor()).count(), 2);
        let names: Vec<&str> = merged.sprites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["lamp", "fresh"]);
    }

    #[test]
    fn test_merge_does_not_touch_inputs() {
        let base = PrimitiveSet::new(vec![plane_at(1.0)], Vec::new());
        let applied = PrimitiveSet::default();
        let merged = merge_for_injection(&applied, &base);

        assert_eq!(merged.planes.len(), 2);
        assert_eq!(base.planes.len(), 1);
        assert_eq!(base.planes[0].z, 1.0);
    }
}
