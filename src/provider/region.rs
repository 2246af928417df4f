//! provider::region
//!
//! CodeCommit repositories must live in the region the pipeline is created
//! in. The effective region comes from the active session, not from any of
//! the pipeline's environments.

use thiserror::Error;

use super::codecommit::CodeCommitUrl;
use crate::core::types::Region;

/// A CodeCommit repository outside the pipeline's region.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "repository {repo} is in {repo_region}, but app {app} is in {effective}; \
     they must be in the same region"
)]
pub struct RegionMismatch {
    pub repo: String,
    pub repo_region: Region,
    pub app: String,
    pub effective: Region,
}

/// Check a CodeCommit repository against the effective region.
///
/// References without a region (`codecommit://name`) always pass; they are
/// resolved against the session region by the git credential helper.
///
/// # Example
///
/// ```
/// use convoy::core::types::Region;
/// use convoy::provider::{reconcile_region, CodeCommitUrl};
///
/// let url = CodeCommitUrl::parse("codecommit::us-west-2://repo-man").unwrap();
/// let east = Region::new("us-east-1").unwrap();
/// let err = reconcile_region(&url, "demo", &east).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "repository repo-man is in us-west-2, but app demo is in us-east-1; \
///      they must be in the same region"
/// );
/// ```
pub fn reconcile_region(
    url: &CodeCommitUrl,
    app: &str,
    effective: &Region,
) -> Result<(), RegionMismatch> {
    match url.region() {
        Some(region) if region != effective => Err(RegionMismatch {
            repo: url.name().to_string(),
            repo_region: region.clone(),
            app: app.to_string(),
            effective: effective.clone(),
        }),
        _ => Ok(()),
    }
}
