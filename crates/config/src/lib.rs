//! Provider and front-end configuration for musicbank.
//!
//! Loaded from YAML. Every field has a default, so an empty file (or no
//! file at all) yields a working configuration pointed at the public
//! Gemini endpoint.
//!
//! ```yaml
//! base_url: https://generativelanguage.googleapis.com
//! model: gemini-2.5-flash-preview-05-20
//! data_dir: /home/me/.musicbank
//! notification_secs: 3
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default API host for `generateContent` calls.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model ID.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Directory name used under the home directory when `data_dir` is unset.
pub const DATA_DIR_NAME: &str = ".musicbank";

/// File name probed inside the data directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scheme and host of the generative-language API (no trailing path).
    pub base_url: String,
    /// Model ID placed in the `models/<id>:generateContent` path.
    pub model: String,
    /// Where the credential file and TUI log live.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// How long a toast notification stays on screen.
    pub notification_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            data_dir: None,
            notification_secs: 3,
        }
    }
}

impl Config {
    /// Parse a YAML document. Missing fields fall back to defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Load `<dir>/config.yaml` if it exists, otherwise return defaults.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Configuration for one run.
    ///
    /// An explicit `config_path` must exist. Otherwise `config.yaml` is
    /// looked up in `data_dir` (or `~/.musicbank` when none is given). An
    /// explicit `data_dir` also overrides the file's own `data_dir`.
    pub fn resolve(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => {
                let dir = data_dir.clone().unwrap_or_else(default_data_dir);
                Self::load_from_dir(&dir)?
            }
        };
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }
        Ok(config)
    }

    /// Resolved data directory: the configured one, or `~/.musicbank`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".into()));
        }
        Ok(())
    }
}

/// `$HOME/.musicbank` (or `%USERPROFILE%` on Windows), falling back to a
/// relative `.musicbank` when neither is set.
pub fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
