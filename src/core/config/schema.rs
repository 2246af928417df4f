//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$CONVOY_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/convoy/config.toml`
//! 3. `~/.convoy/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., the default region must be a real region name).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::Region;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// default_region = "us-west-2"
/// interactive = true
///
/// [store]
/// root = "/home/me/.convoy/store"
///
/// [secrets]
/// provider = "file"
/// path = "/home/me/.convoy/secrets.toml"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Region used when neither `AWS_REGION` nor `AWS_DEFAULT_REGION` is set
    pub default_region: Option<String>,

    /// Default interactive mode
    pub interactive: Option<bool>,

    /// Configuration store settings
    pub store: Option<StoreConfig>,

    /// Secret storage settings
    pub secrets: Option<SecretsConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(region) = &self.default_region {
            Region::new(region.as_str()).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid default_region: {}", e))
            })?;
        }

        if let Some(store) = &self.store {
            store.validate()?;
        }

        if let Some(secrets) = &self.secrets {
            secrets.validate()?;
        }

        Ok(())
    }
}

/// Configuration store location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Root directory holding application and environment records
    pub root: Option<PathBuf>,
}

impl StoreConfig {
    /// Validate the store configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root {
            if root.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "store root cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Secrets configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SecretsConfig {
    /// Provider to use (only "file" today)
    pub provider: Option<String>,

    /// Override for the secrets file location
    pub path: Option<PathBuf>,
}

impl SecretsConfig {
    /// Valid secret providers.
    pub const VALID_PROVIDERS: &'static [&'static str] = &["file"];

    /// Validate the secrets configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(provider) = &self.provider {
            if !Self::VALID_PROVIDERS.contains(&provider.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid secrets provider '{}', must be one of: {}",
                    provider,
                    Self::VALID_PROVIDERS.join(", ")
                )));
            }
        }
        Ok(())
    }
}
