//! provider
//!
//! Source-hosting providers: classification of repository references,
//! discovery of candidates from local remotes, and the CodeCommit region
//! check.
//!
//! # Architecture
//!
//! - [`classify`] routes a raw reference to one of the provider grammars
//!   ([`github`], [`codecommit`], [`bitbucket`]) and returns a [`RepoUrl`]
//! - [`discovery`] filters a `git remote -v` listing down to references that
//!   classify
//! - [`region`] rejects CodeCommit repositories outside the session region
//!
//! Nothing here performs I/O.

pub mod bitbucket;
pub mod classify;
pub mod codecommit;
pub mod discovery;
pub mod github;
pub mod region;

pub use bitbucket::BitbucketUrl;
pub use classify::{
    classify, classify_lenient, supported_providers, ClassifyError, ProviderKind, RepoIdentity,
    RepoUrl,
};
pub use codecommit::CodeCommitUrl;
pub use discovery::{discover_candidates, Candidates};
pub use github::GitHubUrl;
pub use region::{reconcile_region, RegionMismatch};
