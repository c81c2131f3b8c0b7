//! Service configuration loading.
//!
//! The canonical configuration lives in `relief-config.yaml` at the
//! project root. This module defines strongly-typed structs mirroring the
//! YAML structure and a loader that reads and validates the file. Every
//! field has a default, so a missing file yields a fully usable default
//! configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Dataset location.
    #[serde(default)]
    pub data: DataSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl ServiceConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `PORT` overrides `server.port`
    /// - `RELIEF_DATA_DIR` overrides `data.dir`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Pure: the environment is not consulted, so the result depends on
    /// the input alone. [`from_file`](Self::from_file) layers the env
    /// overrides on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply environment variable overrides to the parsed values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PORT")
            && let Ok(port) = val.parse::<u16>()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("RELIEF_DATA_DIR") {
            self.data.dir = PathBuf::from(val);
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Dataset location settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSection {
    /// Directory containing the four JSON dataset files.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_level() -> String {
    String::from("info")
}
