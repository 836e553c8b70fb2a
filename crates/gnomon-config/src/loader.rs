//! Configuration loader with multi-source merging

use crate::{GnomonConfig, Paths};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    env_source: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "GNOMON".to_string(),
            env_source: None,
        }
    }

    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "GNOMON")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Read variables from `vars` instead of the process environment.
    pub fn with_env_source(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<GnomonConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = GnomonConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. User config (~/.config/gnomon/config.toml)
        let paths = Paths::new();
        if let Ok(user_config_file) = paths.user_config_file()
            && user_config_file.exists()
        {
            debug!(path = %user_config_file.display(), "merging user config");
            builder = builder.add_source(toml_file(user_config_file));
        }

        // 3. Project config (gnomon.toml)
        let project_config_file = Paths::project_config_file(&self.project_dir);
        if project_config_file.exists() {
            debug!(path = %project_config_file.display(), "merging project config");
            builder = builder.add_source(toml_file(project_config_file));
        }

        // 4. Local config (gnomon.local.toml)
        let local_config_file = Paths::local_config_file(&self.project_dir);
        if local_config_file.exists() {
            debug!(path = %local_config_file.display(), "merging local config");
            builder = builder.add_source(toml_file(local_config_file));
        }

        // 5. Environment variables (GNOMON_SECTION__KEY)
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(self.env_source),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let gnomon_config: GnomonConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        gnomon_config
            .validate()
            .context("Configuration failed validation")?;

        Ok(gnomon_config)
    }

    /// Load configuration or return defaults if not found
    pub fn load_or_default(self) -> GnomonConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn toml_file(path: PathBuf) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::from(path)
        .required(false)
        .format(config::FileFormat::Toml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClockSource, ConfigError, LogFormat};
    use std::fs;
    use tempfile::tempdir;

    fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn loader(project_dir: &Path) -> ConfigLoader {
        ConfigLoader::new()
            .with_project_dir(project_dir)
            .with_env_source(HashMap::new())
    }

    #[test]
    fn test_load_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = loader(temp_dir.path())
            .load()
            .expect("Failed to load config");

        assert_eq!(config.validation.max_path_length, 256);
        assert_eq!(config.clock.source, ClockSource::System);
    }

    #[test]
    fn test_load_project_config() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        let config_content = r#"
[validation]
max_path_length = 128

[clock]
source = "fixed"
fixed_time = "2024-02-29T12:00:00Z"

[logging]
filter = "gnomon_package=debug"
ansi = false
"#;
        fs::write(project_dir.join("gnomon.toml"), config_content)
            .expect("Failed to write config");

        let config = loader(project_dir).load().expect("Failed to load config");

        assert_eq!(config.validation.max_path_length, 128);
        assert_eq!(config.clock.source, ClockSource::Fixed);
        assert_eq!(
            config.clock.fixed_time.as_deref(),
            Some("2024-02-29T12:00:00Z")
        );
        assert_eq!(config.logging.filter, "gnomon_package=debug");
        assert!(!config.logging.ansi);
        assert_eq!(config.logging.format, LogFormat::Full);
    }

    #[test]
    fn test_local_overrides() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("gnomon.toml"),
            r#"
[logging]
filter = "info"
format = "full"
"#,
        )
        .expect("Failed to write project config");

        fs::write(
            project_dir.join("gnomon.local.toml"),
            r#"
[logging]
format = "compact"
"#,
        )
        .expect("Failed to write local config");

        let config = loader(project_dir).load().expect("Failed to load config");

        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_env_overrides_files() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("gnomon.local.toml"),
            "[validation]\nmax_path_length = 64\n",
        )
        .expect("Failed to write local config");

        let config = ConfigLoader::new()
            .with_project_dir(project_dir)
            .with_env_source(env(&[
                ("GNOMON_VALIDATION__MAX_PATH_LENGTH", "512"),
                ("GNOMON_LOGGING__ANSI", "false"),
                ("OTHER_VALIDATION__MAX_PATH_LENGTH", "1"),
            ]))
            .load()
            .expect("Failed to load config");

        assert_eq!(config.validation.max_path_length, 512);
        assert!(!config.logging.ansi);
    }

    #[test]
    fn test_custom_env_prefix() {
        let temp_dir = tempdir().expect("Failed to create temp dir");

        let config = ConfigLoader::new()
            .with_project_dir(temp_dir.path())
            .with_env_prefix("NODE")
            .with_env_source(env(&[("NODE_LOGGING__FILTER", "warn")]))
            .load()
            .expect("Failed to load config");

        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("gnomon.toml"),
            "[validation]\nmax_path_length = 0\n",
        )
        .expect("Failed to write config");

        let err = loader(project_dir).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(project_dir.join("gnomon.toml"), "[clock]\nsource = \"fixed\"\n")
            .expect("Failed to write config");

        let config = loader(project_dir).load_or_default();
        assert_eq!(config, GnomonConfig::default());
    }
}
