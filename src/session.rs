//! session
//!
//! The active session's region.
//!
//! The pipeline is created in the session region; CodeCommit repositories
//! are checked against it. Resolution order:
//!
//! 1. `AWS_REGION`
//! 2. `AWS_DEFAULT_REGION`
//! 3. `default_region` from the global config

use thiserror::Error;

use crate::core::types::Region;

/// Errors from resolving the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(
        "no region configured: set AWS_REGION or AWS_DEFAULT_REGION, \
         or default_region in the convoy config"
    )]
    NoRegion,

    #[error("invalid region {value:?} from {origin}")]
    InvalidRegion { value: String, origin: &'static str },
}

/// A resolved session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub region: Region,
}

/// Supplies the default session.
pub trait SessionProvider {
    fn default_session(&self) -> Result<Session, SessionError>;
}

/// Resolves the session region from the process environment, falling back
/// to a configured default.
#[derive(Debug, Clone, Default)]
pub struct EnvSessionProvider {
    fallback: Option<String>,
}

impl EnvSessionProvider {
    pub fn new(fallback: Option<String>) -> Self {
        Self { fallback }
    }

    /// Resolve against an explicit variable lookup.
    fn resolve(&self, var: impl Fn(&str) -> Option<String>) -> Result<Session, SessionError> {
        let candidates = [
            ("AWS_REGION", var("AWS_REGION")),
            ("AWS_DEFAULT_REGION", var("AWS_DEFAULT_REGION")),
            ("config default_region", self.fallback.clone()),
        ];

        let (origin, value) = candidates
            .into_iter()
            .find_map(|(origin, value)| value.filter(|v| !v.is_empty()).map(|v| (origin, v)))
            .ok_or(SessionError::NoRegion)?;

        let region = Region::new(value.clone())
            .map_err(|_| SessionError::InvalidRegion { value, origin })?;
        tracing::debug!(region = %region, origin, "resolved session region");
        Ok(Session { region })
    }
}

impl SessionProvider for EnvSessionProvider {
    fn default_session(&self) -> Result<Session, SessionError> {
        self.resolve(|name| std::env::var(name).ok())
    }
}

/// A session fixed at construction, for tests.
#[derive(Debug, Clone)]
pub struct StaticSessionProvider(pub Region);

impl SessionProvider for StaticSessionProvider {
    fn default_session(&self) -> Result<Session, SessionError> {
        Ok(Session {
            region: self.0.clone(),
        })
    }
}
