//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Environment variables (`CONVOY_STORE`; region variables are read by
//!    [`crate::session`])
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$CONVOY_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/convoy/config.toml`
//! 3. `~/.convoy/config.toml` (canonical location)
//!
//! # Example
//!
//! ```no_run
//! use convoy::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Store root: {}", config.store_root().unwrap().display());
//! println!("Interactive: {}", config.interactive());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, SecretsConfig, StoreConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Directory under the home directory holding convoy state.
const HOME_DIR_NAME: &str = ".convoy";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration.
///
/// Accessor methods apply defaults and environment overrides.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Path to the global config file (if loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// contains invalid values. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_global() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let global: GlobalConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        global.validate()?;

        Ok(Self {
            global,
            path: Some(path.to_path_buf()),
        })
    }

    /// Locate the global config file, if any.
    fn find_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("CONVOY_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("convoy/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        let path = dirs::home_dir()?.join(HOME_DIR_NAME).join("config.toml");
        path.exists().then_some(path)
    }

    /// Path of the file this config was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The convoy home directory (`~/.convoy`).
    pub fn home_dir() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(HOME_DIR_NAME))
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Check if interactive mode is enabled by default.
    ///
    /// Defaults to `true` if not configured.
    pub fn interactive(&self) -> bool {
        self.global.interactive.unwrap_or(true)
    }

    /// Region to fall back on when the environment names none.
    pub fn default_region(&self) -> Option<&str> {
        self.global.default_region.as_deref()
    }

    /// Root of the configuration store.
    ///
    /// `$CONVOY_STORE` wins over the config file; defaults to
    /// `~/.convoy/store`.
    pub fn store_root(&self) -> Result<PathBuf, ConfigError> {
        if let Ok(root) = std::env::var("CONVOY_STORE") {
            if !root.is_empty() {
                return Ok(PathBuf::from(root));
            }
        }
        if let Some(root) = self.global.store.as_ref().and_then(|s| s.root.clone()) {
            return Ok(root);
        }
        Ok(Self::home_dir()?.join("store"))
    }

    /// Get the secrets provider.
    ///
    /// Defaults to "file" if not configured.
    pub fn secrets_provider(&self) -> &str {
        self.global
            .secrets
            .as_ref()
            .and_then(|s| s.provider.as_deref())
            .unwrap_or(crate::secrets::DEFAULT_PROVIDER)
    }

    /// Location of the file-backed secret store.
    ///
    /// Defaults to `~/.convoy/secrets.toml`.
    pub fn secrets_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = self.global.secrets.as_ref().and_then(|s| s.path.clone()) {
            return Ok(path);
        }
        Ok(Self::home_dir()?.join("secrets.toml"))
    }
}
