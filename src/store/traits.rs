//! store::traits
//!
//! Read-only access to application and environment records.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::Region;

/// Errors from configuration store lookups.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("couldn't find application {name} in the store")]
    ApplicationNotFound { name: String },

    #[error("couldn't find environment {env} in the application {app}")]
    EnvironmentNotFound { app: String, env: String },

    #[error("invalid name {name:?}: names may not be empty or contain path separators")]
    InvalidName { name: String },

    #[error("failed to read '{path}': {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("failed to parse '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

/// An application record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Application {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// A deployment environment belonging to an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Environment {
    pub name: String,
    pub region: Region,
    #[serde(default)]
    pub prod: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

/// Lookups against the configuration store.
///
/// The pipeline engine never writes through this trait.
pub trait ConfigStore {
    fn get_application(&self, name: &str) -> Result<Application, StoreError>;

    fn get_environment(&self, app: &str, env: &str) -> Result<Environment, StoreError>;

    /// All environments of an application, sorted by name.
    fn list_environments(&self, app: &str) -> Result<Vec<Environment>, StoreError>;
}
