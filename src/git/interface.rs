//! git::interface
//!
//! The two repository queries pipeline bootstrapping needs.

use super::runner::{CommandRunner, RunError};

/// Result of asking git for the checked-out branch.
///
/// There is no error case: a failed lookup is [`BranchLookup::Unavailable`]
/// and the caller picks a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchLookup {
    Detected(String),
    Unavailable,
}

/// Git queries over a [`CommandRunner`].
#[derive(Debug, Clone)]
pub struct Git<R> {
    runner: R,
}

impl<R: CommandRunner> Git<R> {
    /// Wrap a runner.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Raw output of `git remote -v`.
    ///
    /// # Errors
    ///
    /// Propagates the runner's error; outside a repository git exits
    /// non-zero.
    pub fn remotes(&self) -> Result<String, RunError> {
        self.runner.run("git", &["remote", "-v"])
    }

    /// The checked-out branch, from `git rev-parse --abbrev-ref HEAD`.
    ///
    /// Empty output, a non-zero exit or a missing git binary all yield
    /// [`BranchLookup::Unavailable`].
    pub fn current_branch(&self) -> BranchLookup {
        match self.runner.run("git", &["rev-parse", "--abbrev-ref", "HEAD"]) {
            Ok(out) => match out.lines().next().map(str::trim) {
                Some(branch) if !branch.is_empty() => BranchLookup::Detected(branch.to_string()),
                _ => BranchLookup::Unavailable,
            },
            Err(err) => {
                tracing::debug!(error = %err, "branch detection failed");
                BranchLookup::Unavailable
            }
        }
    }
}
