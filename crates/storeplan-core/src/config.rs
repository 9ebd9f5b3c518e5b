//! Editor tunables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading an [`EditorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunable constants for the editor core.
///
/// Every field may be omitted from a config file; missing fields fall back
/// to [`EditorConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid_size: f64,
    pub grid_enabled: bool,
    pub snap_to_grid: bool,
    /// Maximum distance in document units at which alignment guides engage.
    pub alignment_threshold: f64,
    /// Floor for element width and height.
    pub min_element_size: f64,
    /// Drawn side length of a resize handle.
    pub handle_size: f64,
    /// Extra hit tolerance around each handle beyond its drawn size.
    pub handle_hit_padding: f64,
    /// Distance of the rotation handle above the top edge.
    pub rotation_handle_offset: f64,
    pub rotation_snap_degrees: f64,
    pub paste_offset: f64,
    pub min_wall_length: f64,
    pub default_wall_thickness: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom factor applied per wheel notch.
    pub zoom_step: f64,
    pub nudge_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            grid_enabled: true,
            snap_to_grid: true,
            alignment_threshold: 5.0,
            min_element_size: 10.0,
            handle_size: 8.0,
            handle_hit_padding: 4.0,
            rotation_handle_offset: 30.0,
            rotation_snap_degrees: 15.0,
            paste_offset: 20.0,
            min_wall_length: 20.0,
            default_wall_thickness: 10.0,
            min_zoom: 0.1,
            max_zoom: 5.0,
            zoom_step: 1.1,
            nudge_step: 1.0,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Radius around a handle center that still counts as a hit.
    pub fn handle_hit_radius(&self) -> f64 {
        self.handle_size / 2.0 + self.handle_hit_padding
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.grid_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }
        if self.min_zoom <= 0.0 || self.max_zoom <= 0.0 {
            return Err(ConfigError::Invalid("zoom bounds must be positive".into()));
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.zoom_step <= 1.0 {
            return Err(ConfigError::Invalid("zoom_step must be greater than 1".into()));
        }
        let non_negative = [
            ("alignment_threshold", self.alignment_threshold),
            ("min_element_size", self.min_element_size),
            ("handle_size", self.handle_size),
            ("handle_hit_padding", self.handle_hit_padding),
            ("paste_offset", self.paste_offset),
            ("min_wall_length", self.min_wall_length),
            ("default_wall_thickness", self.default_wall_thickness),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must not be negative")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.handle_hit_radius() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json_str(r#"{ "grid_size": 25.0 }"#).unwrap();
        assert!((config.grid_size - 25.0).abs() < f64::EPSILON);
        assert!((config.paste_offset - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_inverted_zoom_range() {
        let result = EditorConfig::from_json_str(r#"{ "min_zoom": 4.0, "max_zoom": 2.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_grid() {
        let result = EditorConfig::from_json_str(r#"{ "grid_size": 0.0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = EditorConfig::from_json_str("{ grid_size: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "snap_to_grid": false, "min_wall_length": 40.0 }}"#).unwrap();

        let config = EditorConfig::load(file.path()).unwrap();
        assert!(!config.snap_to_grid);
        assert!((config.min_wall_length - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = EditorConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
