use super::{Plane, Sprite};

/// Number of leading planes whose depth is derived rather than authored
pub const CONTROL_PLANE_COUNT: usize = 2;

/// Planes and sprites handed between the photo, the editor and the pipeline.
///
/// Always moved or cloned whole; nothing inside is shared between calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveSet {
    pub planes: Vec<Plane>,
    pub sprites: Vec<Sprite>,
}

/// Primitives of a captured photo that the editor did not produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonEditorCounts {
    pub planes: usize,
    pub sprites: usize,
}

impl PrimitiveSet {
    pub fn new(planes: Vec<Plane>, sprites: Vec<Sprite>) -> Self {
        Self { planes, sprites }
    }

    /// Append zero-area placeholders until both control slots exist
    pub fn pad_control_planes(&mut self) {
        while self.planes.len() < CONTROL_PLANE_COUNT {
            self.planes.push(Plane::placeholder());
        }
    }

    pub fn non_editor_counts(&self) -> NonEditorCounts {
        NonEditorCounts {
            planes: self.planes.iter().filter(|p| !p.is_editor()).count(),
            sprites: self.sprites.iter().filter(|s| !s.is_editor()).count(),
        }
    }

    /// Copy of the pass-through primitives only
    pub fn pass_through(&self) -> PrimitiveSet {
        PrimitiveSet {
            planes: self.planes.iter().filter(|p| !p.is_editor()).cloned().collect(),
            sprites: self.sprites.iter().filter(|s| !s.is_editor()).cloned().collect(),
        }
    }

    /// Copy of the editor-generated primitives only
    pub fn editor_only(&self) -> PrimitiveSet {
        PrimitiveSet {
            planes: self.planes.iter().filter(|p| p.is_editor()).cloned().collect(),
            sprites: self.sprites.iter().filter(|s| s.is_editor()).cloned().collect(),
        }
    }

    /// Append another set after this one, keeping relative order
    pub fn extend(&mut self, other: PrimitiveSet) {
        self.planes.extend(other.planes);
        self.sprites.extend(other.sprites);
    }
}
