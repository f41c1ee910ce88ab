use std::path::Path;

use tracing::debug;

use super::AssetError;
use crate::domain::value_objects::Raster;

/// Decode any supported image file into an RGBA raster
pub fn load_raster(path: impl AsRef<Path>) -> Result<Raster, AssetError> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    if image.width() == 0 || image.height() == 0 {
        return Err(AssetError::EmptyImage(path.to_path_buf()));
    }

    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded source image"
    );
    Ok(Raster::from(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn test_load_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("source.png");
        let mut image = RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255]));
        image.put_pixel(3, 1, Rgba([0, 0, 0, 0]));
        image.save(&path).unwrap();

        let raster = load_raster(&path).unwrap();
        assert_eq!((raster.width(), raster.height()), (4, 2));
        assert_eq!(raster.pixel(0, 0), [10, 20, 30, 255]);
        assert_eq!(raster.visible_count(0), 7);
    }

    #[test]
    fn test_load_garbage_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(matches!(
            load_raster(&path),
            Err(AssetError::Image { .. })
        ));
    }
}
