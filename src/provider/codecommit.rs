//! provider::codecommit
//!
//! CodeCommit repository references.
//!
//! Accepted dialects:
//! - `https://git-codecommit.{region}.amazonaws.com/v1/repos/{name}`
//! - `ssh://[{key-id}@]git-codecommit.{region}.amazonaws.com/v1/repos/{name}`
//! - `codecommit::{region}://[{profile}@]{name}` (federated, git-remote-codecommit)
//! - `codecommit://[{profile}@]{name}` (federated, region from the session)
//!
//! CodeCommit repositories live in exactly one region, so the parsed region
//! is later reconciled against the region the pipeline is created in
//! (see [`super::region`]).

use super::classify::{strip_git_suffix, ClassifyError};
use crate::core::types::Region;

/// Marker that routes a reference to the CodeCommit grammar.
pub(crate) const MARKER: &str = "codecommit";

const HOST_PREFIX: &str = "git-codecommit.";
const REPOS_PATH: &str = "v1/repos/";
const FEDERATED_PREFIX: &str = "codecommit::";
const FEDERATED_DEFAULT_REGION_PREFIX: &str = "codecommit://";

/// A reference that has been classified as a CodeCommit repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCommitUrl {
    raw: String,
    name: String,
    region: Option<Region>,
}

impl CodeCommitUrl {
    /// Parse a CodeCommit repository reference.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::UnknownCodeCommitFormat`] if the reference matches
    ///   none of the dialects
    /// - [`ClassifyError::InvalidCodeCommitRegion`] if the region segment is
    ///   not a valid region
    /// - [`ClassifyError::MalformedCodeCommit`] if no repository name can be
    ///   extracted
    ///
    /// # Example
    ///
    /// ```
    /// use convoy::provider::CodeCommitUrl;
    ///
    /// let url = CodeCommitUrl::parse("codecommit::us-gov-west-1://aws-sample").unwrap();
    /// assert_eq!(url.name(), "aws-sample");
    /// assert_eq!(url.region().unwrap().as_str(), "us-gov-west-1");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ClassifyError> {
        let (region, name) = if let Some(rest) = raw
            .strip_prefix("https://")
            .or_else(|| raw.strip_prefix("ssh://"))
        {
            parse_endpoint(raw, rest)?
        } else if let Some(rest) = raw.strip_prefix(FEDERATED_PREFIX) {
            let (region, name) = rest.split_once("://").ok_or_else(|| unknown_format(raw))?;
            (Some(region), federated_name(name))
        } else if let Some(rest) = raw.strip_prefix(FEDERATED_DEFAULT_REGION_PREFIX) {
            (None, federated_name(rest))
        } else {
            return Err(unknown_format(raw));
        };

        let region = region
            .map(|r| {
                Region::new(r).map_err(|_| ClassifyError::InvalidCodeCommitRegion {
                    url: raw.to_string(),
                })
            })
            .transpose()?;

        let name = strip_git_suffix(name);
        if name.is_empty() || name.contains('/') {
            return Err(ClassifyError::MalformedCodeCommit {
                url: raw.to_string(),
            });
        }

        Ok(Self {
            raw: raw.to_string(),
            name: name.to_string(),
            region,
        })
    }

    /// The reference exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Repository name, without any `.git` suffix or profile qualifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region named by the reference.
    ///
    /// `None` for `codecommit://name`, which defers to the session region.
    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }
}

fn unknown_format(raw: &str) -> ClassifyError {
    ClassifyError::UnknownCodeCommitFormat {
        url: raw.to_string(),
    }
}

/// Split `[user@]git-codecommit.{region}.amazonaws.com/v1/repos/{name}`.
fn parse_endpoint<'a>(
    raw: &str,
    rest: &'a str,
) -> Result<(Option<&'a str>, &'a str), ClassifyError> {
    let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
    let host = authority.rsplit('@').next().unwrap_or(authority);

    let region = host
        .strip_prefix(HOST_PREFIX)
        .and_then(|h| h.split('.').next())
        .ok_or_else(|| unknown_format(raw))?;

    let name = path
        .strip_prefix(REPOS_PATH)
        .map(|n| n.trim_end_matches('/'))
        .ok_or_else(|| ClassifyError::MalformedCodeCommit {
            url: raw.to_string(),
        })?;

    Ok((Some(region), name))
}

/// Drop the optional `profile@` qualifier of a federated reference.
fn federated_name(rest: &str) -> &str {
    rest.rsplit('@').next().unwrap_or(rest)
}
