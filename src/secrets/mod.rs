//! secrets
//!
//! Secret storage for pipeline source credentials.
//!
//! # Architecture
//!
//! Secrets are stored through the [`SecretStore`] trait:
//!
//! - [`FileSecretStore`]: Stores in `~/.convoy/secrets.toml` (default)
//! - [`mock::MockSecretStore`]: In-memory, for tests
//!
//! # Security
//!
//! All secret store implementations follow these security rules:
//!
//! - Secrets are **never** logged or included in error messages
//! - File store uses 0600 permissions on Unix (owner read/write only)
//! - All writes are atomic (temp file + rename)

mod file_store;
pub mod mock;
mod traits;

use std::path::PathBuf;

pub use file_store::{FileSecretStore, SecretRecord};
pub use traits::{SecretCreation, SecretError, SecretStore};

use crate::core::types::Region;

/// The default secret store provider name.
pub const DEFAULT_PROVIDER: &str = "file";

/// Create a secret store based on the provider name.
///
/// # Providers
///
/// - `"file"` (default): [`FileSecretStore`] at `path`
///
/// # Errors
///
/// Unknown provider name.
pub fn create_store(
    provider: &str,
    path: PathBuf,
    region: Region,
) -> Result<Box<dyn SecretStore>, SecretError> {
    match provider {
        "file" => Ok(Box::new(FileSecretStore::with_path(path, region))),
        other => Err(SecretError::ProviderNotAvailable(format!(
            "unknown secret provider: '{}' (valid: file)",
            other
        ))),
    }
}
