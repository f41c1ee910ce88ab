use serde::{Deserialize, Serialize};

/// Integer room-local coordinate of a plane corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CornerPoint {
    pub x: i64,
    pub y: i64,
}

impl CornerPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Corner template for an axis-aligned square anchored at `(x, y)`.
    ///
    /// Order is fixed: far corner, bottom-left, top-right, anchor.
    pub fn square(x: i64, y: i64, size: i64) -> [CornerPoint; 4] {
        [
            CornerPoint::new(x + size, y + size),
            CornerPoint::new(x, y + size),
            CornerPoint::new(x + size, y),
            CornerPoint::new(x, y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_template_order() {
        let corners = CornerPoint::square(10, 20, 3);
        assert_eq!(
            corners,
            [
                CornerPoint::new(13, 23),
                CornerPoint::new(10, 23),
                CornerPoint::new(13, 20),
                CornerPoint::new(10, 20),
            ]
        );
    }

    #[test]
    fn test_unit_square() {
        let corners = CornerPoint::square(0, 0, 1);
        assert_eq!(corners[0], CornerPoint::new(1, 1));
        assert_eq!(corners[3], CornerPoint::new(0, 0));
    }
}
