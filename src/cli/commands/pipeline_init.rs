//! pipeline init command - Bootstrap pipeline files for a repository

use crate::core::config::Config;
use crate::engine::{init_pipeline, Context, Deps, InitOptions, InitReport};
use crate::git::{Git, ProcessRunner};
use crate::secrets;
use crate::session::{EnvSessionProvider, SessionProvider};
use crate::store::{FileConfigStore, FileResourcesGetter};
use crate::template::TemplateRenderer;
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::TerminalPrompter;
use crate::workspace::{Workspace, WriteOutcome};
use anyhow::{Context as _, Result};

/// Create the pipeline manifest, buildspec and access token secret.
pub fn pipeline_init(ctx: &Context, config: &Config, opts: InitOptions) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let cwd = ctx.working_dir().context("resolve working directory")?;

    let session = EnvSessionProvider::new(config.default_region().map(str::to_string))
        .default_session()?;

    let store = FileConfigStore::new(config.store_root()?);
    let resources = FileResourcesGetter::new(store.clone());
    let secret_store = secrets::create_store(
        config.secrets_provider(),
        config.secrets_path()?,
        session.region.clone(),
    )?;
    let renderer = TemplateRenderer::new()?;
    let workspace = Workspace::discover(&cwd);
    let git = Git::new(ProcessRunner::new(cwd.clone()));
    let prompter = TerminalPrompter::new(ctx.interactive);

    tracing::debug!(
        workspace = %workspace.root().display(),
        store = %store.root().display(),
        region = %session.region,
        "starting pipeline init"
    );

    let deps = Deps {
        git: &git,
        store: &store,
        resources: &resources,
        secrets: secret_store.as_ref(),
        renderer: &renderer,
        workspace: &workspace,
        prompter: &prompter,
    };

    let report = init_pipeline(&deps, &session, opts)?;
    print_report(&report, verbosity);
    Ok(())
}

fn print_report(report: &InitReport, verbosity: Verbosity) {
    output::print(
        format!(
            "Pipeline {} tracks {} on branch {}",
            report.pipeline_name, report.repository, report.branch
        ),
        verbosity,
    );

    let stages: Vec<String> = report
        .environments
        .iter()
        .map(|env| {
            if env.prod {
                format!("{} ({}, requires approval)", env.name, env.region)
            } else {
                format!("{} ({})", env.name, env.region)
            }
        })
        .collect();
    output::print("Stages:", verbosity);
    output::print(output::format_list(&stages, "  - "), verbosity);

    let provision = &report.provision;
    if let Some(arn) = provision.secret.as_ref().and_then(|s| s.arn()) {
        output::print(format!("Stored access token secret {}", arn), verbosity);
    } else if provision.secret.is_some() {
        output::warn(
            "access token secret already exists; the stored token was kept",
            verbosity,
        );
    }

    describe_write("pipeline manifest", &provision.manifest, verbosity);
    describe_write("buildspec", &provision.buildspec, verbosity);

    output::print("\nNext steps:", verbosity);
    output::print(
        format!(
            "  Commit {} and {} to your repository.",
            provision.manifest.path().display(),
            provision.buildspec.path().display()
        ),
        verbosity,
    );
}

fn describe_write(what: &str, outcome: &WriteOutcome, verbosity: Verbosity) {
    match outcome {
        WriteOutcome::Written(path) => {
            output::print(format!("Wrote {} to {}", what, path.display()), verbosity)
        }
        WriteOutcome::AlreadyExists(path) => output::print(
            format!("{} already exists at {}, left unchanged", what, path.display()),
            verbosity,
        ),
    }
}
