//! Load — config loading from file and environment variables.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::ForwarderConfig;
use crate::parser::{ASSIGNMENT, QUOTE};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/forwarder/forwarder.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ForwarderConfig {
    /// Load configuration from file or defaults, then apply environment overrides.
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// The file is `path` when given, else `FORWARDER_CONFIG_FILE`, else
    /// [`DEFAULT_CONFIG_PATH`]. A `.env` file in the working directory is
    /// read first when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config_path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("FORWARDER_CONFIG_FILE").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = if config_path.exists() {
            tracing::info!("Loading configuration from: {}", config_path.display());
            Self::from_file(&config_path)?
        } else if path.is_some() {
            return Err(ConfigError::Read {
                path: config_path,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        } else {
            tracing::info!(
                "Config file not found at {}, using defaults and environment variables",
                config_path.display()
            );
            Self::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides for the values that differ per deployment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("FORWARDER_LOG_DIR") {
            self.log_dir = PathBuf::from(dir);
        }
        if let Some(state) = lookup("FORWARDER_STATE_FILE") {
            self.state_file = PathBuf::from(state);
        }
        if let Some(url) = lookup("FORWARDER_MISP_URL") {
            self.misp.url = url;
        }
        if let Some(key) = lookup("FORWARDER_MISP_AUTHKEY") {
            self.misp.authkey = key;
        }
        if let Some(level) = lookup("FORWARDER_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate that the values the forwarder needs are present and sane.
    /// `require_misp` is false for dry runs, which never contact MISP.
    pub fn validate(&self, require_misp: bool) -> Result<(), ConfigError> {
        if require_misp {
            if self.misp.url.is_empty() {
                return Err(ConfigError::Invalid("misp.url must not be empty".to_string()));
            }
            if self.misp.authkey.is_empty() {
                return Err(ConfigError::Invalid("misp.authkey must not be empty".to_string()));
            }
        }
        if self.parser.delimiter == ASSIGNMENT || self.parser.delimiter == QUOTE {
            return Err(ConfigError::Invalid(format!(
                "parser.delimiter must not be {:?}",
                self.parser.delimiter
            )));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid("retry.max_attempts must be > 0".to_string()));
        }
        if self.log_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("log_dir must not be empty".to_string()));
        }
        if self.state_file.file_name().is_none() {
            return Err(ConfigError::Invalid(format!(
                "state_file must name a file: {}",
                self.state_file.display()
            )));
        }
        if self.mapping.tag_namespace.is_empty() {
            return Err(ConfigError::Invalid("mapping.tag_namespace must not be empty".to_string()));
        }
        Ok(())
    }
}
