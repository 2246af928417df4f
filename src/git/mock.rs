//! git::mock
//!
//! Scripted [`CommandRunner`] for tests.
//!
//! # Example
//!
//! ```
//! use convoy::git::mock::MockRunner;
//! use convoy::git::Git;
//!
//! let runner = MockRunner::new()
//!     .with_output("git remote -v", "origin\tgit@github.com:koke/grit.git (fetch)\n");
//! let git = Git::new(runner.clone());
//! assert!(git.remotes().unwrap().contains("koke/grit"));
//! assert_eq!(runner.calls(), vec!["git remote -v".to_string()]);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::runner::{CommandRunner, RunError};

/// A runner whose responses are keyed by the full command line.
///
/// Unscripted commands fail with [`RunError::Spawn`], which is what a
/// missing binary looks like.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    responses: HashMap<String, Result<String, RunError>>,
    calls: Vec<String>,
}

impl MockRunner {
    /// Create a runner with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response.
    pub fn with_output(self, command: &str, stdout: &str) -> Self {
        self.lock()
            .responses
            .insert(command.to_string(), Ok(stdout.to_string()));
        self
    }

    /// Script a failure.
    pub fn with_error(self, command: &str, err: RunError) -> Self {
        self.lock().responses.insert(command.to_string(), Err(err));
        self
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, RunError> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");

        let mut inner = self.lock();
        inner.calls.push(line.clone());
        inner
            .responses
            .get(&line)
            .cloned()
            .unwrap_or_else(|| {
                Err(RunError::Spawn {
                    program: program.to_string(),
                    message: format!("no scripted response for `{line}`"),
                })
            })
    }
}
