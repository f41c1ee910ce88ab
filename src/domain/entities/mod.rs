mod document;
mod fields;
mod plane;
mod primitive_set;
mod sprite;

pub use document::Document;
pub use plane::Plane;
pub use primitive_set::{NonEditorCounts, PrimitiveSet, CONTROL_PLANE_COUNT};
pub use sprite::Sprite;
