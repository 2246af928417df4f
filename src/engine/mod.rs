//! engine
//!
//! Pipeline bootstrapping.
//!
//! # Architecture
//!
//! The engine turns a repository reference (given or discovered) and a set
//! of environment names into a provisioned pipeline:
//!
//! - [`bootstrap`] - validation, selection and the overall flow
//! - [`environments`] - fail-fast environment resolution
//! - [`branch`] - source branch with a fixed fallback
//! - [`manifest`] - the pipeline manifest document
//! - [`provision`] - secret, lookups, rendering and file writes
//!
//! The flow is synchronous and single-threaded. Every external effect goes
//! through a collaborator trait ([`crate::store::ConfigStore`],
//! [`crate::secrets::SecretStore`], [`crate::workspace::PipelineWriter`],
//! [`crate::template::Parser`], [`crate::ui::prompts::Prompter`],
//! [`crate::git::CommandRunner`]).
//!
//! # Invariants
//!
//! - Nothing is written to the configuration store
//! - Re-running against an already provisioned workspace succeeds and
//!   changes nothing
//! - Branch detection failure is never an error
//!
//! # Example
//!
//! ```no_run
//! use convoy::engine::bootstrap::{init_pipeline, Deps, InitOptions};
//! use convoy::git::{Git, ProcessRunner};
//! use convoy::secrets::FileSecretStore;
//! use convoy::session::{EnvSessionProvider, SessionProvider};
//! use convoy::store::{FileConfigStore, FileResourcesGetter};
//! use convoy::template::TemplateRenderer;
//! use convoy::ui::prompts::TerminalPrompter;
//! use convoy::workspace::Workspace;
//!
//! # fn main() -> anyhow::Result<()> {
//! let session = EnvSessionProvider::default().default_session()?;
//! let store = FileConfigStore::new("/var/lib/convoy/store");
//! let deps = Deps {
//!     git: &Git::new(ProcessRunner::new(".")),
//!     store: &store,
//!     resources: &FileResourcesGetter::new(store.clone()),
//!     secrets: &FileSecretStore::with_path("/tmp/secrets.toml".into(), session.region.clone()),
//!     renderer: &TemplateRenderer::new()?,
//!     workspace: &Workspace::discover(std::path::Path::new(".")),
//!     prompter: &TerminalPrompter::new(true),
//! };
//! let report = init_pipeline(&deps, &session, InitOptions::default())?;
//! println!("{}", report.pipeline_name);
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod branch;
pub mod environments;
pub mod manifest;
pub mod provision;

pub use bootstrap::{init_pipeline, Deps, InitError, InitOptions, InitReport};
pub use branch::{resolve_branch, DEFAULT_BRANCH};
pub use environments::{resolve_environments, EnvironmentLookupError};
pub use manifest::PipelineManifest;
pub use provision::{ProvisionError, ProvisionReport, ProvisionRequest, Provisioner};

use std::path::PathBuf;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            interactive: true,
        }
    }
}

impl Context {
    /// The directory commands run against.
    pub fn working_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => std::env::current_dir(),
        }
    }
}
