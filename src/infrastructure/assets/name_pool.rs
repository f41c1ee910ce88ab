use std::path::Path;

use tracing::debug;

use super::AssetError;
use crate::application::ports::NamePool;

/// In-memory list of decorative asset names handed out round-robin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticNamePool {
    names: Vec<String>,
}

impl StaticNamePool {
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// One name per line; surrounding whitespace and blank lines are dropped
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let pool = Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        );
        debug!(path = %path.display(), names = pool.names.len(), "Loaded sprite name pool");
        Ok(pool)
    }
}

impl NamePool for StaticNamePool {
    fn name_for(&self, index: usize) -> Option<String> {
        if self.names.is_empty() {
            return None;
        }
        Some(self.names[index % self.names.len()].clone())
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_round_robin() {
        let pool = StaticNamePool::new(["a", "b", "c"]);
        let names: Vec<String> = (0..5).filter_map(|i| pool.name_for(i)).collect();
        assert_eq!(names, ["a", "b", "c", "a", "b"]);
    }

    #[test]
    fn test_empty_pool() {
        let pool = StaticNamePool::default();
        assert!(pool.is_empty());
        assert_eq!(pool.name_for(0), None);
    }

    #[test]
    fn test_from_file_skips_blanks() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  tile_red  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "tile_blue\r").unwrap();

        let pool = StaticNamePool::from_file(file.path()).unwrap();
        assert_eq!(pool, StaticNamePool::new(["tile_red", "tile_blue"]));
    }

    #[test]
    fn test_from_file_missing() {
        let err = StaticNamePool::from_file("/nonexistent/names.txt").unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }
}
