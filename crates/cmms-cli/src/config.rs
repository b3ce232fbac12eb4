//! CLI configuration
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `cmms.toml` in the working directory, or the file given by `--config`
//! 3. `CMMS_*` environment variables, `__` between levels
//!    (`CMMS_STORE__DATA_DIR`, `CMMS_LOGGING__PROFILE`)
//! 4. the `--data-dir` flag

use std::path::{Path, PathBuf};

use cmms_store::StoreConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Looked up without extension, so `cmms.toml`, `cmms.json`, ... all work
const DEFAULT_CONFIG_FILE: &str = "cmms";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `development`, `production` or `test`
    pub profile: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            profile: "production".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load(
        config_file: Option<&Path>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) => File::from(path),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let mut config: AppConfig = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("CMMS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if let Some(dir) = data_dir {
            config.store.data_dir = dir;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.logging.profile, "production");
    }

    #[test]
    fn test_file_values_and_flag_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(
            &path,
            concat!(
                "[store]\n",
                "data_dir = \"/var/lib/cmms\"\n",
                "recover_on_corrupt = true\n",
                "\n",
                "[logging]\n",
                "profile = \"test\"\n",
            ),
        )
        .unwrap();

        let from_file = AppConfig::load(Some(&path), None).unwrap();
        assert_eq!(from_file.store.data_dir, PathBuf::from("/var/lib/cmms"));
        assert!(from_file.store.recover_on_corrupt);
        assert_eq!(from_file.store.storage_key, "cmms_database");
        assert_eq!(from_file.logging.profile, "test");

        let overridden = AppConfig::load(Some(&path), Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(overridden.store.data_dir, dir.path());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml")), None).is_err());
    }
}
