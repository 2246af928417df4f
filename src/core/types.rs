//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Region`] - Validated AWS region name
//! - [`PipelineName`] - Length-bounded pipeline identifier
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so region reconciliation and artifact rendering
//! never see an unchecked string.
//!
//! # Examples
//!
//! ```
//! use convoy::core::types::Region;
//!
//! let region = Region::new("us-west-2").unwrap();
//! assert_eq!(region.as_str(), "us-west-2");
//!
//! assert!(Region::new("us-mess-2").is_err());
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid region: {0}")]
    InvalidRegion(String),
}

/// Region grammar: partition prefix, direction, ordinal.
fn region_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(us(-gov|-iso[a-z]?)?|af|ap|ca|cn|eu|il|me|mx|sa)-(central|(north|south)(east|west)?|east|west)-\d+$",
        )
        .expect("region pattern is a valid regex")
    })
}

/// A validated AWS region name such as `us-west-2` or `us-gov-west-1`.
///
/// # Example
///
/// ```
/// use convoy::core::types::Region;
///
/// assert!(Region::new("sa-east-1").is_ok());
/// assert!(Region::new("us-gov-west-1").is_ok());
/// assert!(Region::new("").is_err());
/// assert!(Region::new("moon-base-1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Region(String);

impl Region {
    /// Create a new validated region.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRegion` if the name does not follow the
    /// AWS region grammar.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if !region_pattern().is_match(&name) {
            return Err(TypeError::InvalidRegion(name));
        }
        Ok(Self(name))
    }

    /// Get the region as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Region {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.0
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The logical identifier of a pipeline.
///
/// Only [`crate::core::naming::pipeline_name`] constructs these, which
/// guarantees the `pipeline-{app}-{repo}` shape and the length ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PipelineName(String);

impl PipelineName {
    pub(crate) fn from_parts_unchecked(name: String) -> Self {
        Self(name)
    }

    /// Get the pipeline name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PipelineName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PipelineName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
