//! secrets::mock
//!
//! In-memory [`SecretStore`] for tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::traits::{SecretCreation, SecretError, SecretStore};

/// In-memory secret store.
///
/// Records every request (name only) and can be primed with existing
/// secrets or a failure to return.
#[derive(Debug, Clone, Default)]
pub struct MockSecretStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    secrets: BTreeMap<String, String>,
    requests: Vec<String>,
    fail_with: Option<String>,
}

impl MockSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend a secret already exists.
    pub fn with_existing(self, name: &str) -> Self {
        self.lock()
            .secrets
            .insert(name.to_string(), String::new());
        self
    }

    /// Make every create fail with a write error carrying `message`.
    pub fn failing(self, message: &str) -> Self {
        self.lock().fail_with = Some(message.to_string());
        self
    }

    /// Names passed to `create_secret`, in order.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    /// Stored value, if any.
    pub fn value(&self, name: &str) -> Option<String> {
        self.lock().secrets.get(name).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SecretStore for MockSecretStore {
    fn create_secret(&self, name: &str, value: &str) -> Result<SecretCreation, SecretError> {
        let mut inner = self.lock();
        inner.requests.push(name.to_string());

        if let Some(message) = &inner.fail_with {
            return Err(SecretError::WriteError(message.clone()));
        }
        if inner.secrets.contains_key(name) {
            return Ok(SecretCreation::AlreadyExists);
        }
        inner.secrets.insert(name.to_string(), value.to_string());
        Ok(SecretCreation::Created {
            arn: format!("arn:convoy:secretsmanager:us-west-2:secret:{name}-mock00"),
        })
    }
}
