//! provider::classify
//!
//! Provider detection and repository classification.
//!
//! # Design
//!
//! Each provider owns an independent grammar. A reference is routed to a
//! provider by a host marker and then parsed strictly by that provider's
//! grammar; the providers are tried in a fixed order (GitHub, CodeCommit,
//! Bitbucket) and the first marker that matches decides. A reference that
//! carries a provider's marker but fails its grammar is reported as
//! malformed for that provider rather than retried against the others.
//!
//! # Example
//!
//! ```
//! use convoy::provider::{classify, ProviderKind};
//!
//! let url = classify("https://github.com/badgoose/chaOS").unwrap();
//! assert_eq!(url.kind(), ProviderKind::GitHub);
//! assert_eq!(url.name(), "chaOS");
//!
//! let err = classify("https://gitlab.company.com/group/project.git").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "repository https://gitlab.company.com/group/project.git must be from a supported \
//!      provider: GitHub, CodeCommit or Bitbucket"
//! );
//! ```

use serde::Serialize;
use thiserror::Error;

use super::bitbucket::{self, BitbucketUrl};
use super::codecommit::{self, CodeCommitUrl};
use super::github::{self, GitHubUrl};
use crate::core::types::Region;

/// Errors from classifying a repository reference.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// The reference names none of the supported providers.
    #[error("repository {url} must be from a supported provider: {}", supported_providers())]
    UnsupportedProvider { url: String },

    #[error(
        "unable to parse the GitHub repository owner and name from {url}: please pass the \
         repository URL with the format `--url https://github.com/{{owner}}/{{repositoryName}}`"
    )]
    MalformedGitHub { url: String },

    #[error("unknown CodeCommit URL format: {url}")]
    UnknownCodeCommitFormat { url: String },

    #[error("unable to parse the AWS region from {url}")]
    InvalidCodeCommitRegion { url: String },

    #[error("unable to parse the CodeCommit repository name from {url}")]
    MalformedCodeCommit { url: String },

    #[error("unable to parse the Bitbucket repository name from {url}")]
    MalformedBitbucket { url: String },
}

impl ClassifyError {
    /// The provider whose grammar rejected the reference.
    ///
    /// `None` for [`ClassifyError::UnsupportedProvider`].
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            ClassifyError::UnsupportedProvider { .. } => None,
            ClassifyError::MalformedGitHub { .. } => Some(ProviderKind::GitHub),
            ClassifyError::UnknownCodeCommitFormat { .. }
            | ClassifyError::InvalidCodeCommitRegion { .. }
            | ClassifyError::MalformedCodeCommit { .. } => Some(ProviderKind::CodeCommit),
            ClassifyError::MalformedBitbucket { .. } => Some(ProviderKind::Bitbucket),
        }
    }
}

/// Supported source-hosting providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProviderKind {
    GitHub,
    CodeCommit,
    Bitbucket,
}

impl ProviderKind {
    /// All providers, in classification order.
    pub fn all() -> &'static [ProviderKind] {
        &[
            ProviderKind::GitHub,
            ProviderKind::CodeCommit,
            ProviderKind::Bitbucket,
        ]
    }

    /// Display name, as used in manifests and messages.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => "GitHub",
            ProviderKind::CodeCommit => "CodeCommit",
            ProviderKind::Bitbucket => "Bitbucket",
        }
    }

    /// Whether a reference carries this provider's marker.
    fn matches(&self, raw: &str) -> bool {
        let marker = match self {
            ProviderKind::GitHub => github::HOST,
            ProviderKind::CodeCommit => codecommit::MARKER,
            ProviderKind::Bitbucket => bitbucket::HOST,
        };
        raw.contains(marker)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A classified repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoUrl {
    GitHub(GitHubUrl),
    CodeCommit(CodeCommitUrl),
    Bitbucket(BitbucketUrl),
}

impl RepoUrl {
    /// The provider hosting the repository.
    pub fn kind(&self) -> ProviderKind {
        match self {
            RepoUrl::GitHub(_) => ProviderKind::GitHub,
            RepoUrl::CodeCommit(_) => ProviderKind::CodeCommit,
            RepoUrl::Bitbucket(_) => ProviderKind::Bitbucket,
        }
    }

    /// The reference exactly as supplied.
    pub fn as_str(&self) -> &str {
        match self {
            RepoUrl::GitHub(url) => url.as_str(),
            RepoUrl::CodeCommit(url) => url.as_str(),
            RepoUrl::Bitbucket(url) => url.as_str(),
        }
    }

    /// Repository name, without any `.git` suffix.
    pub fn name(&self) -> &str {
        match self {
            RepoUrl::GitHub(url) => url.name(),
            RepoUrl::CodeCommit(url) => url.name(),
            RepoUrl::Bitbucket(url) => url.name(),
        }
    }

    /// Structured identity of the repository.
    pub fn identity(&self) -> RepoIdentity {
        match self {
            RepoUrl::GitHub(url) => RepoIdentity::Owned {
                owner: url.owner().to_string(),
                name: url.name().to_string(),
            },
            RepoUrl::CodeCommit(url) => RepoIdentity::Regional {
                name: url.name().to_string(),
                region: url.region().cloned(),
            },
            RepoUrl::Bitbucket(url) => RepoIdentity::Owned {
                owner: url.owner().to_string(),
                name: url.name().to_string(),
            },
        }
    }
}

impl std::fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider-specific identity extracted from a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoIdentity {
    /// GitHub and Bitbucket repositories belong to an owner.
    Owned { owner: String, name: String },
    /// CodeCommit repositories belong to a region.
    Regional {
        name: String,
        region: Option<Region>,
    },
}

impl RepoIdentity {
    /// Repository name.
    pub fn name(&self) -> &str {
        match self {
            RepoIdentity::Owned { name, .. } | RepoIdentity::Regional { name, .. } => name,
        }
    }
}

/// Classify a repository reference.
///
/// # Errors
///
/// - [`ClassifyError::UnsupportedProvider`] if no provider marker matches
/// - a provider-specific malformed error if the matching provider's grammar
///   rejects the reference
pub fn classify(raw: &str) -> Result<RepoUrl, ClassifyError> {
    let kind = ProviderKind::all()
        .iter()
        .copied()
        .find(|kind| kind.matches(raw))
        .ok_or_else(|| ClassifyError::UnsupportedProvider {
            url: raw.to_string(),
        })?;

    match kind {
        ProviderKind::GitHub => GitHubUrl::parse(raw).map(RepoUrl::GitHub),
        ProviderKind::CodeCommit => CodeCommitUrl::parse(raw).map(RepoUrl::CodeCommit),
        ProviderKind::Bitbucket => BitbucketUrl::parse(raw).map(RepoUrl::Bitbucket),
    }
}

/// Classify without reporting why a reference was rejected.
///
/// Used when scanning local remotes, where anything unrecognized is simply
/// skipped.
pub fn classify_lenient(raw: &str) -> Option<RepoUrl> {
    classify(raw).ok()
}

/// "GitHub, CodeCommit or Bitbucket".
pub fn supported_providers() -> String {
    let names: Vec<&str> = ProviderKind::all().iter().map(|p| p.name()).collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => String::new(),
    }
}

/// Remove one trailing `.git`, if present.
pub(crate) fn strip_git_suffix(s: &str) -> &str {
    s.strip_suffix(".git").unwrap_or(s)
}
