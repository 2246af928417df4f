//! secrets::traits
//!
//! Secret storage trait definition.
//!
//! # Design
//!
//! Pipelines only ever create secrets, and creation is idempotent: asking
//! for a secret that already exists is a normal outcome
//! ([`SecretCreation::AlreadyExists`]), not an error. Callers are forced to
//! handle both cases by the return type.
//!
//! # Security
//!
//! Implementations MUST:
//! - Never log, print, or include secret values in error messages
//! - Be thread-safe (Send + Sync)

use thiserror::Error;

/// Errors from secret storage operations.
///
/// Note: Error messages intentionally do not include secret values.
#[derive(Debug, Error)]
pub enum SecretError {
    /// Failed to read from secret storage.
    #[error("failed to read secret store: {0}")]
    ReadError(String),

    /// Failed to write to secret storage.
    #[error("failed to write secret: {0}")]
    WriteError(String),

    /// Could not take the store lock.
    #[error("failed to lock secret store: {0}")]
    LockError(String),

    /// Provider not available or not configured.
    #[error("secret provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// Outcome of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretCreation {
    /// A new secret was stored.
    Created { arn: String },
    /// A secret with that name was already present; it was left untouched.
    AlreadyExists,
}

impl SecretCreation {
    /// ARN of a newly created secret.
    pub fn arn(&self) -> Option<&str> {
        match self {
            SecretCreation::Created { arn } => Some(arn),
            SecretCreation::AlreadyExists => None,
        }
    }
}

/// Trait for secret storage providers.
pub trait SecretStore: Send + Sync {
    /// Create a secret unless one with the same name exists.
    ///
    /// # Security
    ///
    /// The value is stored as given. The implementation must never log or
    /// include it in error messages.
    fn create_secret(&self, name: &str, value: &str) -> Result<SecretCreation, SecretError>;
}
