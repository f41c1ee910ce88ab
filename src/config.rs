use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::application::pipeline::InterceptorSettings;
use crate::application::quantize::{CapacityLimits, MAX_PLANES, MAX_SPRITES};

pub const DEFAULT_PREVIEW_BASE_URL: &str = "https://habbo-stories-content.s3.amazonaws.com/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_planes: usize,
    pub max_sprites: usize,
    /// Pixels with alpha at or below this are transparent
    pub alpha_cutoff: u8,
    pub payload_offset: usize,
    pub preview_base_url: String,
    /// One decorative asset name per line
    pub sprite_pool_path: Option<PathBuf>,
    pub force_zoom: Option<f64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_planes: MAX_PLANES,
            max_sprites: MAX_SPRITES,
            alpha_cutoff: 0,
            payload_offset: 0,
            preview_base_url: DEFAULT_PREVIEW_BASE_URL.to_string(),
            sprite_pool_path: None,
            force_zoom: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_planes: std::env::var("ROOM_PHOTO_MAX_PLANES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_planes),
            max_sprites: std::env::var("ROOM_PHOTO_MAX_SPRITES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_sprites),
            alpha_cutoff: std::env::var("ROOM_PHOTO_ALPHA_CUTOFF")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.alpha_cutoff),
            payload_offset: std::env::var("ROOM_PHOTO_PAYLOAD_OFFSET")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.payload_offset),
            preview_base_url: std::env::var("ROOM_PHOTO_PREVIEW_BASE_URL")
                .unwrap_or(defaults.preview_base_url),
            sprite_pool_path: std::env::var("ROOM_PHOTO_SPRITE_POOL")
                .ok()
                .map(PathBuf::from),
            force_zoom: std::env::var("ROOM_PHOTO_FORCE_ZOOM")
                .ok()
                .and_then(|s| s.parse().ok()),
            log_level: std::env::var("ROOM_PHOTO_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Load a TOML file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_planes < 2 {
            return Err("max_planes must leave room for the two control planes".to_string());
        }

        if self.max_sprites > MAX_SPRITES {
            return Err(format!("max_sprites cannot exceed {}", MAX_SPRITES));
        }

        if self.preview_base_url.is_empty() {
            return Err("preview_base_url cannot be empty".to_string());
        }

        Ok(())
    }

    pub fn limits(&self) -> CapacityLimits {
        CapacityLimits {
            max_planes: self.max_planes,
            max_sprites: self.max_sprites,
        }
    }

    pub fn interceptor_settings(&self) -> InterceptorSettings {
        InterceptorSettings {
            payload_offset: self.payload_offset,
            preview_base_url: self.preview_base_url.clone(),
            force_zoom: self.force_zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.limits(), CapacityLimits::default());
        assert_eq!(
            config.interceptor_settings().preview_base_url,
            DEFAULT_PREVIEW_BASE_URL
        );
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let config = Config {
            max_planes: 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            max_sprites: MAX_SPRITES + 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            preview_base_url: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "alpha_cutoff = 40").unwrap();
        writeln!(file, "force_zoom = 1.0").unwrap();
        writeln!(file, "sprite_pool_path = \"/tmp/pool.txt\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.alpha_cutoff, 40);
        assert_eq!(config.force_zoom, Some(1.0));
        assert_eq!(config.sprite_pool_path, Some(PathBuf::from("/tmp/pool.txt")));
        assert_eq!(config.max_planes, MAX_PLANES);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_sprites = 5000").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/room_photo.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
