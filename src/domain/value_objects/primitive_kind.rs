/// Substring identifying a sprite whose name is a badge image URL
pub const BADGE_IMAGE_MARKER: &str = "habbo-imaging/badge/";

/// The `type` tag carried by planes and sprites.
///
/// Tags written by the editor mark generated primitives; anything else is
/// pass-through content from the captured photo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    PixelArtPlane,
    PixelArtSprite,
    Badge,
    ImageSprite,
    Other(String),
}

impl PrimitiveKind {
    /// Parse a tag, matching the editor tags case-insensitively
    pub fn from_tag(tag: &str) -> Self {
        let known = [
            PrimitiveKind::PixelArtPlane,
            PrimitiveKind::PixelArtSprite,
            PrimitiveKind::Badge,
            PrimitiveKind::ImageSprite,
        ];
        known
            .into_iter()
            .find(|kind| kind.as_tag().eq_ignore_ascii_case(tag))
            .unwrap_or_else(|| PrimitiveKind::Other(tag.to_string()))
    }

    pub fn as_tag(&self) -> &str {
        match self {
            PrimitiveKind::PixelArtPlane => "pixel_art_plane",
            PrimitiveKind::PixelArtSprite => "pixel_art_sprite",
            PrimitiveKind::Badge => "badge",
            PrimitiveKind::ImageSprite => "image_sprite",
            PrimitiveKind::Other(tag) => tag,
        }
    }

    /// Whether a plane with this tag was produced by the editor
    pub fn is_editor_plane(&self) -> bool {
        matches!(self, PrimitiveKind::PixelArtPlane)
    }

    /// Whether a sprite with this tag was produced by the editor
    pub fn is_editor_sprite(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::PixelArtSprite | PrimitiveKind::Badge | PrimitiveKind::ImageSprite
        )
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_known() {
        assert_eq!(PrimitiveKind::from_tag("pixel_art_plane"), PrimitiveKind::PixelArtPlane);
        assert_eq!(PrimitiveKind::from_tag("badge"), PrimitiveKind::Badge);
        assert_eq!(PrimitiveKind::from_tag("image_sprite"), PrimitiveKind::ImageSprite);
    }

    #[test]
    fn test_from_tag_case_insensitive() {
        assert_eq!(PrimitiveKind::from_tag("Pixel_Art_Plane"), PrimitiveKind::PixelArtPlane);
    }

    #[test]
    fn test_from_tag_other_round_trips() {
        let kind = PrimitiveKind::from_tag("wallpaper");
        assert_eq!(kind, PrimitiveKind::Other("wallpaper".to_string()));
        assert_eq!(kind.as_tag(), "wallpaper");
    }

    #[test]
    fn test_editor_classification() {
        assert!(PrimitiveKind::PixelArtPlane.is_editor_plane());
        assert!(!PrimitiveKind::PixelArtPlane.is_editor_sprite());
        assert!(PrimitiveKind::Badge.is_editor_sprite());
        assert!(!PrimitiveKind::Other("x".into()).is_editor_sprite());
    }
}
