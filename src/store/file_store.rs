//! store::file_store
//!
//! Configuration store backed by TOML files.
//!
//! # Layout
//!
//! ```text
//! <root>/applications/<app>/application.toml
//! <root>/applications/<app>/environments/<env>.toml
//! <root>/applications/<app>/resources.toml
//! ```
//!
//! `resources.toml` is read by [`super::resources::FileResourcesGetter`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::traits::{Application, ConfigStore, Environment, StoreError};

/// TOML-file configuration store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    root: PathBuf,
}

impl FileConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding an application's records.
    pub(crate) fn app_dir(&self, app: &str) -> Result<PathBuf, StoreError> {
        check_name(app)?;
        Ok(self.root.join("applications").join(app))
    }

    fn env_dir(&self, app: &str) -> Result<PathBuf, StoreError> {
        Ok(self.app_dir(app)?.join("environments"))
    }
}

impl ConfigStore for FileConfigStore {
    fn get_application(&self, name: &str) -> Result<Application, StoreError> {
        let path = self.app_dir(name)?.join("application.toml");
        if !path.exists() {
            return Err(StoreError::ApplicationNotFound {
                name: name.to_string(),
            });
        }
        read_toml(&path)
    }

    fn get_environment(&self, app: &str, env: &str) -> Result<Environment, StoreError> {
        check_name(env)?;
        let path = self.env_dir(app)?.join(format!("{env}.toml"));
        if !path.exists() {
            return Err(StoreError::EnvironmentNotFound {
                app: app.to_string(),
                env: env.to_string(),
            });
        }
        read_toml(&path)
    }

    fn list_environments(&self, app: &str) -> Result<Vec<Environment>, StoreError> {
        // Surfaces ApplicationNotFound before an empty listing.
        self.get_application(app)?;

        let dir = self.env_dir(app)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|e| StoreError::ReadError {
            path: dir.clone(),
            message: e.to_string(),
        })?;

        let mut envs = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| StoreError::ReadError {
                    path: dir.clone(),
                    message: e.to_string(),
                })?
                .path();
            if path.extension().and_then(|e| e.to_str()) == Some("toml") {
                envs.push(read_toml::<Environment>(&path)?);
            }
        }
        envs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(envs)
    }
}

/// Reject names that would escape the store directory.
fn check_name(name: &str) -> Result<(), StoreError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let contents = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&contents).map_err(|e| StoreError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
