/// Demo configuration loaded from TOML
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Sphere tessellation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub stacks: u32,
    pub sectors: u32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            stacks: 20,
            sectors: 20,
        }
    }
}

/// Terminal demo settings; every field has a default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Target frames per second
    pub fps: u32,
    /// Clear color, channels in [0, 1]
    pub background: [f64; 3],
    /// Automatic spin in degrees per frame
    pub spin_speed: f64,
    /// Transform records (`X,<object>,<op>,...;`) for the `cube` and `sphere` objects
    pub transforms: String,
    pub sphere: SphereConfig,
    /// `env_logger` filter; falls back to `RUST_LOG`, then `warn`
    pub log_filter: Option<String>,
    /// Send log output here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            background: [0.04, 0.04, 0.07],
            spin_speed: 1.0,
            transforms: "X,cube,Ry,30;X,cube,S,0.9,0.9,0.9;X,sphere,S,1.4,1.4,1.4;".to_string(),
            sphere: SphereConfig::default(),
            log_filter: None,
            log_file: None,
        }
    }
}

impl DemoConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(DemoConfig::from_toml_str("").unwrap(), DemoConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = DemoConfig::from_toml_str(
            r#"
            fps = 60
            transforms = "X,sphere,Rx,90;"

            [sphere]
            stacks = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.fps, 60);
        assert_eq!(config.transforms, "X,sphere,Rx,90;");
        assert_eq!(config.sphere.stacks, 8);
        assert_eq!(config.sphere.sectors, 20);
        assert_eq!(config.background, DemoConfig::default().background);
    }

    #[test]
    fn test_defaults_survive_serialization() {
        let text = DemoConfig::default().to_toml_string().unwrap();
        assert_eq!(DemoConfig::from_toml_str(&text).unwrap(), DemoConfig::default());
    }

    #[test]
    fn test_bad_type_is_parse_error() {
        let err = DemoConfig::from_toml_str("fps = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DemoConfig::load_from_file("/nonexistent/rasterkit.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
