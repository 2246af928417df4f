//! engine::provision
//!
//! Create the pipeline's side effects: the access-token secret, the
//! manifest and the buildspec.
//!
//! # Steps
//!
//! 1. Create the access-token secret, if a token was supplied
//! 2. Look up the application
//! 3. Look up its regional resources
//! 4. Render the buildspec
//! 5. Write the manifest
//! 6. Write the buildspec
//!
//! Any failure aborts the remaining steps. "Already exists" outcomes for
//! the secret and either file are successes; both files are always
//! attempted, so a re-run against a fully provisioned workspace succeeds
//! without changing anything.

use serde_json::json;
use thiserror::Error;

use super::manifest::{PipelineManifest, SourceProperties};
use crate::core::naming::github_secret_name;
use crate::core::types::PipelineName;
use crate::provider::RepoUrl;
use crate::secrets::{SecretCreation, SecretError, SecretStore};
use crate::store::{AppResourcesGetter, ConfigStore, Environment, StoreError};
use crate::template::{Parser, TemplateError, BUILDSPEC_TEMPLATE};
use crate::workspace::{PipelineWriter, WorkspaceError, WriteOutcome};

/// Errors from provisioning, prefixed by the step that failed.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("create pipeline secret: {0}")]
    CreateSecret(SecretError),

    #[error("get application {app}: {cause}")]
    GetApplication { app: String, cause: StoreError },

    #[error("get regional application resources: {0}")]
    RegionalResources(StoreError),

    /// Renderer diagnostics are passed through untouched.
    #[error(transparent)]
    Render(#[from] TemplateError),

    #[error("marshal pipeline manifest: {0}")]
    MarshalManifest(serde_yaml::Error),

    #[error("write pipeline manifest to workspace: {0}")]
    WriteManifest(WorkspaceError),

    #[error("write buildspec to workspace: {0}")]
    WriteBuildspec(WorkspaceError),
}

/// Everything needed to provision one pipeline.
#[derive(Debug, Clone)]
pub struct ProvisionRequest<'a> {
    pub pipeline_name: &'a PipelineName,
    pub app: &'a str,
    pub repo: &'a RepoUrl,
    pub branch: &'a str,
    pub environments: &'a [Environment],
    pub github_token: Option<&'a str>,
}

/// What provisioning did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    /// `None` when no token was supplied.
    pub secret: Option<SecretCreation>,
    pub manifest: WriteOutcome,
    pub buildspec: WriteOutcome,
}

/// Collaborators used by provisioning.
pub struct Provisioner<'a> {
    pub store: &'a dyn ConfigStore,
    pub resources: &'a dyn AppResourcesGetter,
    pub secrets: &'a dyn SecretStore,
    pub renderer: &'a dyn Parser,
    pub workspace: &'a dyn PipelineWriter,
}

impl Provisioner<'_> {
    /// Run all provisioning steps.
    pub fn provision(&self, req: &ProvisionRequest<'_>) -> Result<ProvisionReport, ProvisionError> {
        let token = req.github_token.filter(|t| !t.is_empty());

        let (secret, secret_name) = match token {
            Some(token) => {
                let name = github_secret_name(req.app, req.repo.name());
                tracing::debug!(secret = %name, "creating access token secret");
                let outcome = self
                    .secrets
                    .create_secret(&name, token)
                    .map_err(ProvisionError::CreateSecret)?;
                if outcome == SecretCreation::AlreadyExists {
                    tracing::warn!(secret = %name, "secret already exists, reusing it");
                }
                (Some(outcome), Some(name))
            }
            None => (None, None),
        };

        let app = self
            .store
            .get_application(req.app)
            .map_err(|cause| ProvisionError::GetApplication {
                app: req.app.to_string(),
                cause,
            })?;

        let regional = self
            .resources
            .get_regional_app_resources(&app)
            .map_err(ProvisionError::RegionalResources)?;

        let context = json!({
            "pipeline_name": req.pipeline_name.as_str(),
            "app_name": req.app,
            "branch": req.branch,
            "provider": req.repo.kind().name(),
            "repository": req.repo.as_str(),
            "environments": req
                .environments
                .iter()
                .map(|env| json!({
                    "name": env.name,
                    "region": env.region.as_str(),
                    "prod": env.prod,
                }))
                .collect::<Vec<_>>(),
            "artifact_buckets": regional
                .iter()
                .map(|r| json!({"region": r.region.as_str(), "bucket": r.s3_bucket}))
                .collect::<Vec<_>>(),
            "version": env!("CARGO_PKG_VERSION"),
        });
        let buildspec = self.renderer.parse(BUILDSPEC_TEMPLATE, &context)?;

        let manifest = PipelineManifest::new(
            req.pipeline_name.clone(),
            req.repo.kind(),
            SourceProperties {
                repository: req.repo.as_str().to_string(),
                branch: req.branch.to_string(),
                access_token_secret: secret_name,
            },
            req.environments,
        )
        .to_yaml()
        .map_err(ProvisionError::MarshalManifest)?;

        let manifest = self
            .workspace
            .write_pipeline_manifest(manifest.as_bytes())
            .map_err(ProvisionError::WriteManifest)?;
        log_write("manifest", &manifest);

        let buildspec = self
            .workspace
            .write_pipeline_buildspec(buildspec.as_bytes())
            .map_err(ProvisionError::WriteBuildspec)?;
        log_write("buildspec", &buildspec);

        Ok(ProvisionReport {
            secret,
            manifest,
            buildspec,
        })
    }
}

fn log_write(what: &str, outcome: &WriteOutcome) {
    match outcome {
        WriteOutcome::Written(path) => {
            tracing::info!(path = %path.display(), "wrote pipeline {what}")
        }
        WriteOutcome::AlreadyExists(path) => {
            tracing::warn!(path = %path.display(), "pipeline {what} already exists, leaving it")
        }
    }
}
