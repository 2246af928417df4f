//! workspace::mock
//!
//! In-memory [`PipelineWriter`] for tests.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{
    PipelineWriter, WorkspaceError, WorkspaceSummary, WriteOutcome, BUILDSPEC_FILE, MANIFEST_FILE,
};

/// Which file a mock behaviour applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Manifest,
    Buildspec,
}

impl Target {
    fn path(self) -> PathBuf {
        let name = match self {
            Target::Manifest => MANIFEST_FILE,
            Target::Buildspec => BUILDSPEC_FILE,
        };
        PathBuf::from("convoy").join(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behaviour {
    Write,
    Exists,
    Fail,
}

/// Records write attempts and returns scripted outcomes.
#[derive(Debug, Clone)]
pub struct MockWorkspace {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    application: Option<String>,
    manifest: Behaviour,
    buildspec: Behaviour,
    attempts: Vec<Target>,
    written: Vec<(Target, String)>,
}

impl Default for MockWorkspace {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                application: None,
                manifest: Behaviour::Write,
                buildspec: Behaviour::Write,
                attempts: Vec::new(),
                written: Vec::new(),
            })),
        }
    }
}

impl MockWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the workspace with an application.
    pub fn with_application(self, app: &str) -> Self {
        self.lock().application = Some(app.to_string());
        self
    }

    /// Report the target as already present.
    pub fn with_existing(self, target: Target) -> Self {
        self.set(target, Behaviour::Exists);
        self
    }

    /// Fail writes to the target with a permission error.
    pub fn failing(self, target: Target) -> Self {
        self.set(target, Behaviour::Fail);
        self
    }

    /// Targets written to, in order, including ones that already existed.
    pub fn attempts(&self) -> Vec<Target> {
        self.lock().attempts.clone()
    }

    /// Content actually written to `target`.
    pub fn content(&self, target: Target) -> Option<String> {
        self.lock()
            .written
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, c)| c.clone())
    }

    fn set(&self, target: Target, behaviour: Behaviour) {
        let mut inner = self.lock();
        match target {
            Target::Manifest => inner.manifest = behaviour,
            Target::Buildspec => inner.buildspec = behaviour,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, target: Target, content: &[u8]) -> Result<WriteOutcome, WorkspaceError> {
        let mut inner = self.lock();
        inner.attempts.push(target);
        let behaviour = match target {
            Target::Manifest => inner.manifest,
            Target::Buildspec => inner.buildspec,
        };
        let path = target.path();
        match behaviour {
            Behaviour::Write => {
                inner
                    .written
                    .push((target, String::from_utf8_lossy(content).into_owned()));
                Ok(WriteOutcome::Written(path))
            }
            Behaviour::Exists => Ok(WriteOutcome::AlreadyExists(path)),
            Behaviour::Fail => Err(WorkspaceError::Write {
                path,
                source: io::Error::new(io::ErrorKind::PermissionDenied, "some error"),
            }),
        }
    }
}

impl PipelineWriter for MockWorkspace {
    fn summary(&self) -> Result<Option<WorkspaceSummary>, WorkspaceError> {
        Ok(self
            .lock()
            .application
            .clone()
            .map(|application| WorkspaceSummary { application }))
    }

    fn write_pipeline_manifest(&self, content: &[u8]) -> Result<WriteOutcome, WorkspaceError> {
        self.write(Target::Manifest, content)
    }

    fn write_pipeline_buildspec(&self, content: &[u8]) -> Result<WriteOutcome, WorkspaceError> {
        self.write(Target::Buildspec, content)
    }
}
