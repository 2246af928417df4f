//! Convoy - bootstrap continuous-delivery pipelines from source repositories
//!
//! Convoy takes a source repository hosted on GitHub, CodeCommit or
//! Bitbucket, plus an ordered list of deployment environments, and produces
//! the files a pipeline needs: a manifest, a rendered buildspec and, for
//! GitHub, a stored access token secret.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, builds collaborators)
//! - [`engine`] - The `pipeline init` flow and artifact provisioning
//! - [`core`] - Domain types, naming rules and configuration
//! - [`provider`] - Repository URL classification, discovery and region checks
//! - [`git`] - Local repository queries through a command runner
//! - [`store`] - Application and environment configuration store
//! - [`secrets`] - Secret storage abstraction
//! - [`session`] - Session region resolution
//! - [`template`] - Buildspec template rendering
//! - [`workspace`] - Create-only pipeline file writes
//! - [`ui`] - Prompts and output
//!
//! # Correctness Invariants
//!
//! 1. A repository URL is classified to exactly one provider or rejected
//! 2. Pipeline names never exceed 100 characters
//! 3. Existing pipeline files and secrets are never overwritten
//! 4. The configuration store is only read, never written

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod provider;
pub mod secrets;
pub mod session;
pub mod store;
pub mod template;
pub mod ui;
pub mod workspace;
