use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Malformed photo document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Photo document must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Invalid raster: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidRaster {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
