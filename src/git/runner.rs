//! git::runner
//!
//! Subprocess execution behind a trait, so git queries can be scripted in
//! tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Errors from running an external command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunError {
    /// The program could not be started (missing binary, bad cwd, ...).
    #[error("failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    /// The program ran and exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Runs a program and captures its standard output.
pub trait CommandRunner {
    /// Run `program` with `args` and return its stdout.
    ///
    /// # Errors
    ///
    /// - [`RunError::Spawn`] if the program cannot be started
    /// - [`RunError::Failed`] if it exits with a non-zero status
    fn run(&self, program: &str, args: &[&str]) -> Result<String, RunError>;
}

/// Runs commands as child processes in a fixed working directory.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    cwd: PathBuf,
}

impl ProcessRunner {
    /// Create a runner rooted at `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// The working directory commands run in.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, RunError> {
        tracing::debug!(program, ?args, cwd = %self.cwd.display(), "running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| RunError::Spawn {
                program: program.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RunError::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
