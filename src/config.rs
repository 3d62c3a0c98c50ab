// src/config.rs

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tunables for level generation. Every field has a default, so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Level height in templates.
    pub grid_rows: usize,
    /// Level width in templates.
    pub grid_columns: usize,
    /// Whole-level attempts before giving up.
    pub max_attempts: usize,
    /// Moves the path walk may make in one attempt.
    pub max_path_steps: usize,
    /// Fixed seed; a random one is drawn when absent.
    pub seed: Option<u64>,
    /// Template set to load instead of the built-in one.
    pub template_file: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            grid_rows: 4,
            grid_columns: 4,
            max_attempts: 8,
            max_path_steps: 64,
            seed: None,
            template_file: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_rows == 0 || self.grid_columns == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_rows, self.grid_columns
            )));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".to_string()));
        }
        // Reaching the top row alone takes rows - 1 moves.
        if self.max_path_steps < self.grid_rows {
            return Err(ConfigError::Invalid(format!(
                "max_path_steps {} is too small for {} rows",
                self.max_path_steps, self.grid_rows
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.grid_rows, 4);
        assert_eq!(config.grid_columns, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GeneratorConfig::from_json_str(r#"{ "grid_columns": 6, "seed": 42 }"#).unwrap();
        assert_eq!(config.grid_columns, 6);
        assert_eq!(config.grid_rows, 4);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_attempts, 8);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            GeneratorConfig::from_json_str(r#"{ "grid_rows": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_json_str(r#"{ "max_attempts": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_json_str(r#"{ "grid_rows": 10, "max_path_steps": 5 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = GeneratorConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
