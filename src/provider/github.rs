//! provider::github
//!
//! GitHub repository references.
//!
//! Accepted dialects:
//! - `https://github.com/{owner}/{name}[.git]`
//! - `git@github.com:{owner}/{name}[.git]`
//! - `git://github.com/{owner}/{name}[.git]`
//!
//! Anything before the host is tolerated, so `ssh://git@github.com/owner/repo`
//! parses as well. After the host there must be exactly two path segments.

use super::classify::{strip_git_suffix, ClassifyError};

/// Host marker that routes a reference to the GitHub grammar.
pub(crate) const HOST: &str = "github.com";

/// A reference that has been classified as a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubUrl {
    raw: String,
    owner: String,
    name: String,
}

impl GitHubUrl {
    /// Parse a GitHub repository reference.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::MalformedGitHub`] if the reference does not
    /// contain `github.com` followed by `{owner}/{name}`.
    ///
    /// # Example
    ///
    /// ```
    /// use convoy::provider::GitHubUrl;
    ///
    /// let url = GitHubUrl::parse("git@github.com:koke/grit.git").unwrap();
    /// assert_eq!(url.owner(), "koke");
    /// assert_eq!(url.name(), "grit");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ClassifyError> {
        let malformed = || ClassifyError::MalformedGitHub {
            url: raw.to_string(),
        };

        let path = path_after_host(raw).ok_or_else(malformed)?;
        let path = strip_git_suffix(path.trim_end_matches('/'));

        let mut parts = path.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self {
                    raw: raw.to_string(),
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(malformed()),
        }
    }

    /// The reference exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name, without any `.git` suffix.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Everything after the last `github.com:` or `github.com/`.
fn path_after_host(raw: &str) -> Option<&str> {
    raw.rmatch_indices(HOST)
        .map(|(idx, _)| &raw[idx + HOST.len()..])
        .find_map(|rest| rest.strip_prefix(':').or_else(|| rest.strip_prefix('/')))
}
