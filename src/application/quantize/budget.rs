use serde::Deserialize;

use crate::domain::entities::{NonEditorCounts, CONTROL_PLANE_COUNT};

/// Default number of planes the renderer accepts in one photo
pub const MAX_PLANES: usize = 289;

/// Hard cap on sprites in one photo
pub const MAX_SPRITES: usize = 676;

/// Renderer capacity for a whole photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CapacityLimits {
    pub max_planes: usize,
    pub max_sprites: usize,
}

impl Default for CapacityLimits {
    fn default() -> Self {
        Self {
            max_planes: MAX_PLANES,
            max_sprites: MAX_SPRITES,
        }
    }
}

/// Slots left for generated primitives.
///
/// `planes` includes the two reserved control slots, so at most
/// `planes - 2` planes are ever generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Budget {
    pub planes: usize,
    pub sprites: usize,
}

impl Budget {
    pub fn new(planes: usize, sprites: usize) -> Self {
        Self { planes, sprites }
    }

    /// Budget left after the pass-through content and the editor's overlays
    pub fn for_editor(
        non_editor: NonEditorCounts,
        overlay_count: usize,
        limits: CapacityLimits,
    ) -> Self {
        Self {
            planes: limits.max_planes.saturating_sub(non_editor.planes),
            sprites: limits
                .max_sprites
                .min(MAX_SPRITES)
                .saturating_sub(non_editor.sprites)
                .saturating_sub(overlay_count),
        }
    }

    /// Planes the quantizer may emit
    pub fn plane_limit(&self) -> usize {
        self.planes.saturating_sub(CONTROL_PLANE_COUNT)
    }

    /// Sprites the quantizer may emit
    pub fn sprite_limit(&self) -> usize {
        self.sprites.min(MAX_SPRITES)
    }
}
