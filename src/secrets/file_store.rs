//! secrets::file_store
//!
//! File-based secret storage.
//!
//! # Security
//!
//! - Secrets are stored in `~/.convoy/secrets.toml` unless configured
//! - File permissions are set to 0600 on Unix (owner read/write only)
//! - All writes are atomic (write to temp file, then rename)
//! - Create-if-absent runs under an exclusive lock on a sidecar
//!   `.lock` file, so concurrent invocations cannot both create
//! - Secrets are NEVER logged, printed, or included in error messages
//!
//! # Example
//!
//! ```
//! use convoy::core::types::Region;
//! use convoy::secrets::{FileSecretStore, SecretCreation, SecretStore};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let region = Region::new("us-west-2").unwrap();
//! let store = FileSecretStore::with_path(dir.path().join("secrets.toml"), region);
//!
//! let first = store.create_secret("github-token-app-repo", "ghp_xxxx").unwrap();
//! assert!(matches!(first, SecretCreation::Created { .. }));
//!
//! let second = store.create_secret("github-token-app-repo", "ghp_yyyy").unwrap();
//! assert_eq!(second, SecretCreation::AlreadyExists);
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::traits::{SecretCreation, SecretError, SecretStore};
use crate::core::types::Region;

/// One stored secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretRecord {
    pub arn: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SecretsFile {
    #[serde(default)]
    secrets: BTreeMap<String, SecretRecord>,
}

/// File-based secret storage.
///
/// ARNs have the shape
/// `arn:convoy:secretsmanager:{region}:secret:{name}-{suffix}` with a random
/// six-character suffix.
#[derive(Debug)]
pub struct FileSecretStore {
    path: PathBuf,
    region: Region,
}

impl FileSecretStore {
    /// Create a file secret store at a path, minting ARNs in `region`.
    pub fn with_path(path: PathBuf, region: Region) -> Self {
        Self { path, region }
    }

    /// Get the path to the secrets file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a stored record.
    pub fn describe(&self, name: &str) -> Result<Option<SecretRecord>, SecretError> {
        Ok(self.read_secrets()?.secrets.remove(name))
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn acquire_lock(&self) -> Result<File, SecretError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SecretError::WriteError(format!("cannot create directory: {}", e)))?;
        }
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())
            .map_err(|e| SecretError::LockError(format!("cannot open lock file: {}", e)))?;
        lock.lock_exclusive()
            .map_err(|e| SecretError::LockError(e.to_string()))?;
        Ok(lock)
    }

    fn read_secrets(&self) -> Result<SecretsFile, SecretError> {
        if !self.path.exists() {
            return Ok(SecretsFile::default());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| SecretError::ReadError(format!("cannot read secrets file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SecretError::ReadError(format!("cannot parse secrets file: {}", e)))
    }

    /// Write secrets to the file with atomic write and proper permissions.
    fn write_secrets(&self, secrets: &SecretsFile) -> Result<(), SecretError> {
        let content = toml::to_string_pretty(secrets)
            .map_err(|e| SecretError::WriteError(format!("cannot serialize secrets: {}", e)))?;

        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| SecretError::WriteError(format!("cannot create temp file: {}", e)))?;

            // Restrict before any content lands on disk.
            #[cfg(unix)]
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| SecretError::WriteError(format!("cannot set permissions: {}", e)))?;

            file.write_all(content.as_bytes())
                .map_err(|e| SecretError::WriteError(format!("cannot write secrets: {}", e)))?;
            file.sync_all()
                .map_err(|e| SecretError::WriteError(format!("cannot sync to disk: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path)
            .map_err(|e| SecretError::WriteError(format!("cannot rename temp file: {}", e)))
    }

    fn mint_arn(&self, name: &str) -> String {
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(6).collect();
        format!(
            "arn:convoy:secretsmanager:{}:secret:{}-{}",
            self.region, name, suffix
        )
    }

    /// Verify file permissions are correct (Unix only).
    ///
    /// Returns true if the file doesn't exist or has 0600 permissions.
    #[cfg(unix)]
    pub fn verify_permissions(&self) -> Result<bool, SecretError> {
        if !self.path.exists() {
            return Ok(true);
        }

        let metadata = fs::metadata(&self.path)
            .map_err(|e| SecretError::ReadError(format!("cannot read file metadata: {}", e)))?;

        Ok(metadata.permissions().mode() & 0o777 == 0o600)
    }

    /// Verify file permissions are correct (non-Unix always returns true).
    #[cfg(not(unix))]
    pub fn verify_permissions(&self) -> Result<bool, SecretError> {
        Ok(true)
    }
}

impl SecretStore for FileSecretStore {
    fn create_secret(&self, name: &str, value: &str) -> Result<SecretCreation, SecretError> {
        let lock = self.acquire_lock()?;

        let mut file = self.read_secrets()?;
        if file.secrets.contains_key(name) {
            tracing::debug!(name, "secret already exists");
            return Ok(SecretCreation::AlreadyExists);
        }

        let arn = self.mint_arn(name);
        file.secrets.insert(
            name.to_string(),
            SecretRecord {
                arn: arn.clone(),
                value: value.to_string(),
                created_at: Utc::now(),
            },
        );
        self.write_secrets(&file)?;
        drop(lock);

        tracing::debug!(name, %arn, "created secret");
        Ok(SecretCreation::Created { arn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, FileSecretStore) {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("secrets.toml");
        let store = FileSecretStore::with_path(path, Region::new("us-west-2").unwrap());
        (temp, store)
    }

    #[test]
    fn describe_nonexistent_returns_none() {
        let (_temp, store) = create_test_store();
        assert!(store.describe("nonexistent").expect("describe").is_none());
    }

    #[test]
    fn create_then_describe() {
        let (_temp, store) = create_test_store();

        let outcome = store.create_secret("github-token-a-b", "tok").expect("create");
        let arn = outcome.arn().expect("created").to_string();

        let record = store.describe("github-token-a-b").expect("describe").unwrap();
        assert_eq!(record.value, "tok");
        assert_eq!(record.arn, arn);
    }

    #[test]
    fn arn_shape() {
        let (_temp, store) = create_test_store();

        let outcome = store.create_secret("github-token-a-b", "tok").expect("create");
        let arn = outcome.arn().unwrap();
        let prefix = "arn:convoy:secretsmanager:us-west-2:secret:github-token-a-b-";
        assert!(arn.starts_with(prefix), "unexpected arn {arn}");
        assert_eq!(arn.len(), prefix.len() + 6);
    }

    #[test]
    fn second_create_keeps_original_value() {
        let (_temp, store) = create_test_store();

        store.create_secret("key", "value1").expect("first create");
        let second = store.create_secret("key", "value2").expect("second create");
        assert_eq!(second, SecretCreation::AlreadyExists);

        let record = store.describe("key").expect("describe").unwrap();
        assert_eq!(record.value, "value1");
    }

    #[test]
    fn creates_directory_if_missing() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("subdir").join("secrets.toml");
        let store = FileSecretStore::with_path(path.clone(), Region::new("eu-west-1").unwrap());

        store.create_secret("key", "value").expect("create");
        assert!(path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn permissions_0600_on_unix() {
        let (_temp, store) = create_test_store();

        assert!(store.verify_permissions().expect("verify before write"));
        store.create_secret("key", "value").expect("create");

        let mode = fs::metadata(store.path()).expect("metadata").permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "permissions should be 0600");
        assert!(store.verify_permissions().expect("verify after write"));
    }

    #[test]
    fn corrupt_file_is_read_error() {
        let (_temp, store) = create_test_store();
        fs::write(store.path(), "invalid = [unclosed").expect("write bad toml");

        let err = store.create_secret("key", "value").unwrap_err();
        assert!(matches!(err, SecretError::ReadError(_)));
        assert!(!err.to_string().contains("value"));
    }

    #[test]
    fn persistence_across_instances() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("secrets.toml");
        let region = Region::new("us-east-1").unwrap();

        FileSecretStore::with_path(path.clone(), region.clone())
            .create_secret("key", "value")
            .expect("create");

        let again = FileSecretStore::with_path(path, region)
            .create_secret("key", "other")
            .expect("create again");
        assert_eq!(again, SecretCreation::AlreadyExists);
    }

    #[test]
    fn special_characters_in_values() {
        let (_temp, store) = create_test_store();

        let special = "value with \"quotes\" and \n newlines and = equals";
        store.create_secret("key", special).expect("create");

        let record = store.describe("key").expect("describe").unwrap();
        assert_eq!(record.value, special);
    }
}
