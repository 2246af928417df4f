//! workspace
//!
//! The on-disk project directory convoy writes pipeline files into.
//!
//! # Layout
//!
//! ```text
//! <root>/convoy/.workspace      summary: application = "<name>"
//! <root>/convoy/pipeline.yml    pipeline manifest
//! <root>/convoy/buildspec.yml   rendered buildspec
//! ```
//!
//! Pipeline files are never overwritten. Writing over an existing file is
//! reported as [`WriteOutcome::AlreadyExists`] and leaves the file as it
//! was, so re-running `pipeline init` is safe.

pub mod mock;

use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Directory under the workspace root holding convoy files.
pub const WORKSPACE_DIR: &str = "convoy";
/// Summary file name inside [`WORKSPACE_DIR`].
pub const SUMMARY_FILE: &str = ".workspace";
/// Manifest file name inside [`WORKSPACE_DIR`].
pub const MANIFEST_FILE: &str = "pipeline.yml";
/// Buildspec file name inside [`WORKSPACE_DIR`].
pub const BUILDSPEC_FILE: &str = "buildspec.yml";

/// Errors from workspace operations.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse workspace summary '{path}': {message}")]
    Summary { path: PathBuf, message: String },
}

/// Result of a create-only write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created.
    Written(PathBuf),
    /// A file was already there and was left alone.
    AlreadyExists(PathBuf),
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written(path) | WriteOutcome::AlreadyExists(path) => path,
        }
    }

    pub fn already_existed(&self) -> bool {
        matches!(self, WriteOutcome::AlreadyExists(_))
    }
}

/// Contents of `convoy/.workspace`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceSummary {
    pub application: String,
}

/// Reads the workspace summary and writes pipeline files into the
/// workspace.
pub trait PipelineWriter {
    /// The registered workspace summary, if there is one.
    fn summary(&self) -> Result<Option<WorkspaceSummary>, WorkspaceError>;

    fn write_pipeline_manifest(&self, content: &[u8]) -> Result<WriteOutcome, WorkspaceError>;

    fn write_pipeline_buildspec(&self, content: &[u8]) -> Result<WriteOutcome, WorkspaceError>;
}

/// A workspace on the local file system.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Use `root` as the workspace root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the nearest ancestor of `start` holding a workspace summary.
    ///
    /// Falls back to `start` itself when no summary exists, which is where
    /// a new workspace's files get written.
    pub fn discover(start: &Path) -> Self {
        start
            .ancestors()
            .find(|dir| dir.join(WORKSPACE_DIR).join(SUMMARY_FILE).is_file())
            .map(Self::new)
            .unwrap_or_else(|| Self::new(start))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    fn read_summary(&self) -> Result<Option<WorkspaceSummary>, WorkspaceError> {
        let path = self.dir().join(SUMMARY_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(WorkspaceError::Read { path, source }),
        };
        toml::from_str(&contents)
            .map(Some)
            .map_err(|e| WorkspaceError::Summary {
                path,
                message: e.to_string(),
            })
    }

    fn create_new(&self, name: &str, content: &[u8]) -> Result<WriteOutcome, WorkspaceError> {
        let dir = self.dir();
        fs::create_dir_all(&dir).map_err(|source| WorkspaceError::Write {
            path: dir.clone(),
            source,
        })?;
        publish(&dir.join(name), |file| file.write_all(content))
    }
}

/// Stage content in a temp file next to `path`, then move it into place
/// only if `path` does not exist yet. A failed write leaves nothing at
/// `path`.
fn publish(
    path: &Path,
    fill: impl FnOnce(&mut File) -> io::Result<()>,
) -> Result<WriteOutcome, WorkspaceError> {
    let write_err = |source: io::Error| WorkspaceError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
    fill(staged.as_file_mut())
        .and_then(|()| set_readable(staged.as_file()))
        .and_then(|()| staged.as_file().sync_all())
        .map_err(write_err)?;

    match staged.persist_noclobber(path) {
        Ok(_) => Ok(WriteOutcome::Written(path.to_path_buf())),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
            Ok(WriteOutcome::AlreadyExists(path.to_path_buf()))
        }
        Err(e) => Err(write_err(e.error)),
    }
}

/// Temp files start out owner-only; pipeline files are meant to be shared.
#[cfg(unix)]
fn set_readable(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_file: &File) -> io::Result<()> {
    Ok(())
}

impl PipelineWriter for Workspace {
    fn summary(&self) -> Result<Option<WorkspaceSummary>, WorkspaceError> {
        self.read_summary()
    }

    fn write_pipeline_manifest(&self, content: &[u8]) -> Result<WriteOutcome, WorkspaceError> {
        self.create_new(MANIFEST_FILE, content)
    }

    fn write_pipeline_buildspec(&self, content: &[u8]) -> Result<WriteOutcome, WorkspaceError> {
        self.create_new(BUILDSPEC_FILE, content)
    }
}
