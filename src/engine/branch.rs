//! engine::branch
//!
//! Source branch for the pipeline.

use crate::git::{BranchLookup, CommandRunner, Git};

/// Branch used when none is given and none can be detected.
pub const DEFAULT_BRANCH: &str = "main";

/// Pick the pipeline's source branch.
///
/// A non-empty explicit branch is used verbatim. Otherwise the checked-out
/// branch is used, or [`DEFAULT_BRANCH`] if detection fails for any reason.
pub fn resolve_branch<R: CommandRunner>(explicit: Option<&str>, git: &Git<R>) -> String {
    if let Some(branch) = explicit.filter(|b| !b.is_empty()) {
        return branch.to_string();
    }
    match git.current_branch() {
        BranchLookup::Detected(branch) => branch,
        BranchLookup::Unavailable => {
            tracing::debug!(fallback = DEFAULT_BRANCH, "using default branch");
            DEFAULT_BRANCH.to_string()
        }
    }
}
