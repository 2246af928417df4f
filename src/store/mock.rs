//! store::mock
//!
//! In-memory configuration store and resource getter for tests.
//!
//! Every lookup is recorded so tests can assert which records were
//! queried, and in what order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::resources::{AppResourcesGetter, RegionalResources};
use super::traits::{Application, ConfigStore, Environment, StoreError};
use crate::core::types::Region;

/// In-memory [`ConfigStore`].
#[derive(Debug, Clone, Default)]
pub struct MockConfigStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    apps: HashMap<String, Application>,
    envs: HashMap<(String, String), Environment>,
    lookups: Vec<String>,
}

impl MockConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(self, name: &str) -> Self {
        self.lock().apps.insert(
            name.to_string(),
            Application {
                name: name.to_string(),
                account_id: None,
                domain: None,
            },
        );
        self
    }

    pub fn with_env(self, app: &str, env: &str, region: &str, prod: bool) -> Self {
        let environment = Environment {
            name: env.to_string(),
            region: Region::new(region).unwrap_or_else(|e| panic!("bad test region: {e}")),
            prod,
            account_id: None,
        };
        self.lock()
            .envs
            .insert((app.to_string(), env.to_string()), environment);
        self
    }

    /// Lookups issued so far, as `app:<name>` or `env:<app>/<env>`.
    pub fn lookups(&self) -> Vec<String> {
        self.lock().lookups.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ConfigStore for MockConfigStore {
    fn get_application(&self, name: &str) -> Result<Application, StoreError> {
        let mut inner = self.lock();
        inner.lookups.push(format!("app:{name}"));
        inner
            .apps
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::ApplicationNotFound {
                name: name.to_string(),
            })
    }

    fn get_environment(&self, app: &str, env: &str) -> Result<Environment, StoreError> {
        let mut inner = self.lock();
        inner.lookups.push(format!("env:{app}/{env}"));
        inner
            .envs
            .get(&(app.to_string(), env.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::EnvironmentNotFound {
                app: app.to_string(),
                env: env.to_string(),
            })
    }

    fn list_environments(&self, app: &str) -> Result<Vec<Environment>, StoreError> {
        let inner = self.lock();
        let mut envs: Vec<Environment> = inner
            .envs
            .iter()
            .filter(|((a, _), _)| a == app)
            .map(|(_, env)| env.clone())
            .collect();
        envs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(envs)
    }
}

/// Fixed [`AppResourcesGetter`] response.
#[derive(Debug, Clone, Default)]
pub struct MockResourcesGetter {
    resources: Vec<RegionalResources>,
    fail_with: Option<String>,
}

impl MockResourcesGetter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self, region: &str, bucket: &str) -> Self {
        self.resources.push(RegionalResources {
            region: Region::new(region).unwrap_or_else(|e| panic!("bad test region: {e}")),
            s3_bucket: bucket.to_string(),
            kms_key_arn: None,
        });
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }
}

impl AppResourcesGetter for MockResourcesGetter {
    fn get_regional_app_resources(
        &self,
        app: &Application,
    ) -> Result<Vec<RegionalResources>, StoreError> {
        match &self.fail_with {
            Some(message) => Err(StoreError::ReadError {
                path: format!("{}/resources.toml", app.name).into(),
                message: message.clone(),
            }),
            None => Ok(self.resources.clone()),
        }
    }
}
