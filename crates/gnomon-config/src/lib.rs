//! Configuration management for Gnomon hosts
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (GNOMON_* prefix, `__` between keys; highest precedence)
//! 2. gnomon.local.toml (local overrides, not checked in)
//! 3. gnomon.toml (project config)
//! 4. ~/.config/gnomon/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)
//!
//! Only host-side policy lives here: the deterministic core never reads
//! configuration on its own.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main Gnomon configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GnomonConfig {
    pub validation: ValidationConfig,
    pub clock: ClockConfig,
    pub logging: LoggingConfig,
}

/// Package admission limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Longest accepted package path, in bytes.
    pub max_path_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_path_length: 256,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub source: ClockSource,
    /// RFC 3339 instant for [`ClockSource::Fixed`].
    pub fixed_time: Option<String>,
}

/// Where "now" comes from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ClockSource {
    /// The host wall clock.
    #[default]
    System,
    /// A frozen instant, for replay and tests.
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `gnomon_package=debug`.
    pub filter: String,
    pub ansi: bool,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            ansi: true,
            format: LogFormat::Full,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

impl GnomonConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Read a single TOML file, without merging any other source.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration with a frozen clock, for deterministic replay.
    pub fn fixed_clock(fixed_time: impl Into<String>) -> Self {
        Self {
            clock: ClockConfig {
                source: ClockSource::Fixed,
                fixed_time: Some(fixed_time.into()),
            },
            ..Default::default()
        }
    }

    /// Checks cross-field constraints the types cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validation.max_path_length == 0 {
            return Err(ConfigError::ValidationError(
                "validation.max_path_length must be greater than 0".to_string(),
            ));
        }
        if self.clock.source == ClockSource::Fixed && self.clock.fixed_time.is_none() {
            return Err(ConfigError::ValidationError(
                "clock.fixed_time is required when clock.source is \"fixed\"".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = GnomonConfig::default();
        assert_eq!(config.validation.max_path_length, 256);
        assert_eq!(config.clock.source, ClockSource::System);
        assert!(config.clock.fixed_time.is_none());
        assert_eq!(config.logging.filter, "info");
        assert!(config.logging.ansi);
        assert_eq!(config.logging.format, LogFormat::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fixed_clock_config() {
        let config = GnomonConfig::fixed_clock("2024-01-01T00:00:00Z");
        assert_eq!(config.clock.source, ClockSource::Fixed);
        assert_eq!(
            config.clock.fixed_time.as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_path_length() {
        let mut config = GnomonConfig::default();
        config.validation.max_path_length = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_requires_fixed_time() {
        let mut config = GnomonConfig::default();
        config.clock.source = ClockSource::Fixed;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("clock.fixed_time"));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("gnomon.toml");
        fs::write(
            &path,
            r#"
[clock]
source = "fixed"
fixed_time = "2009-02-13T23:31:30Z"

[logging]
format = "compact"
"#,
        )
        .expect("Failed to write config");

        let config = GnomonConfig::from_file(&path).expect("Failed to read config");
        assert_eq!(config.clock.source, ClockSource::Fixed);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.validation.max_path_length, 256);
    }

    #[test]
    fn test_from_file_errors() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("missing.toml");
        assert!(matches!(
            GnomonConfig::from_file(&missing),
            Err(ConfigError::ReadError { .. })
        ));

        let broken = temp_dir.path().join("broken.toml");
        fs::write(&broken, "[clock\nsource = ").expect("Failed to write config");
        assert!(matches!(
            GnomonConfig::from_file(&broken),
            Err(ConfigError::ParseError { .. })
        ));

        let unknown_source = temp_dir.path().join("unknown.toml");
        fs::write(&unknown_source, "[clock]\nsource = \"sundial\"\n")
            .expect("Failed to write config");
        assert!(matches!(
            GnomonConfig::from_file(&unknown_source),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
