//! engine::bootstrap
//!
//! `pipeline init` from options to provisioned artifacts.
//!
//! # Flow
//!
//! ```text
//! validate -> repository URL -> classify -> region check
//!          -> environment names -> resolve environments -> access token
//!          -> branch -> name -> provision
//! ```
//!
//! Each stage either produces its value or stops the flow with an
//! [`InitError`]. Prompts are only issued for values the caller did not
//! supply.

use thiserror::Error;

use super::branch::resolve_branch;
use super::environments::{resolve_environments, EnvironmentLookupError};
use super::provision::{ProvisionError, ProvisionReport, ProvisionRequest, Provisioner};
use crate::core::naming::{pipeline_name, NamingError};
use crate::core::types::PipelineName;
use crate::git::{CommandRunner, Git};
use crate::provider::{
    classify, discover_candidates, reconcile_region, Candidates, ClassifyError, ProviderKind,
    RegionMismatch, RepoUrl,
};
use crate::secrets::SecretStore;
use crate::session::Session;
use crate::store::{AppResourcesGetter, ConfigStore, Environment, StoreError};
use crate::template::Parser;
use crate::ui::prompts::{PromptError, Prompter};
use crate::workspace::{PipelineWriter, WorkspaceError};

/// Errors from `pipeline init`.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(
        "could not find an application attached to this workspace, \
         please run the app init command first"
    )]
    NoApplication,

    #[error(
        "cannot specify app {requested} because the workspace is already \
         registered with app {registered}"
    )]
    AppMismatch {
        requested: String,
        registered: String,
    },

    #[error("read workspace summary: {0}")]
    ReadWorkspace(WorkspaceError),

    #[error("get application {app} configuration: {cause}")]
    GetApplication { app: String, cause: StoreError },

    #[error("no GitHub, CodeCommit or Bitbucket remote repository found; please pass one with --url")]
    NoRepositoryFound,

    #[error("select URL: {0}")]
    SelectUrl(PromptError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Region(#[from] RegionMismatch),

    #[error("list environments for application {app}: {cause}")]
    ListEnvironments { app: String, cause: StoreError },

    #[error("select environments: {0}")]
    SelectEnvironments(PromptError),

    #[error("at least one environment is required to create a pipeline")]
    NoEnvironments,

    #[error("get GitHub access token: {0}")]
    GitHubToken(PromptError),

    #[error(transparent)]
    Environment(#[from] EnvironmentLookupError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),
}

/// What the user asked for.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub app: Option<String>,
    pub url: Option<String>,
    pub branch: Option<String>,
    pub environments: Vec<String>,
    pub github_token: Option<String>,
}

/// Collaborators for `pipeline init`.
pub struct Deps<'a, R> {
    pub git: &'a Git<R>,
    pub store: &'a dyn ConfigStore,
    pub resources: &'a dyn AppResourcesGetter,
    pub secrets: &'a dyn SecretStore,
    pub renderer: &'a dyn Parser,
    pub workspace: &'a dyn PipelineWriter,
    pub prompter: &'a dyn Prompter,
}

/// Outcome of a successful `pipeline init`.
#[derive(Debug, Clone)]
pub struct InitReport {
    pub app: String,
    pub pipeline_name: PipelineName,
    pub repository: RepoUrl,
    pub branch: String,
    pub environments: Vec<Environment>,
    pub provision: ProvisionReport,
}

const SELECT_URL_PROMPT: &str = "Which repository would you like to use for your pipeline?";
const SELECT_ENVS_PROMPT: &str = "Which environments would you like to add to your pipeline?";

/// Bootstrap a pipeline.
pub fn init_pipeline<R: CommandRunner>(
    deps: &Deps<'_, R>,
    session: &Session,
    opts: InitOptions,
) -> Result<InitReport, InitError> {
    let app = validate_app(deps, opts.app.as_deref())?;
    tracing::debug!(app = %app, "validated application");

    let raw_url = match opts.url {
        Some(url) => url,
        None => select_url(deps)?,
    };
    let repo = classify(&raw_url)?;
    tracing::debug!(provider = %repo.kind(), repo = repo.name(), "classified repository");

    if let RepoUrl::CodeCommit(url) = &repo {
        reconcile_region(url, &app, &session.region)?;
    }

    let env_names = if opts.environments.is_empty() {
        select_environments(deps, &app)?
    } else {
        opts.environments
    };

    let environments = resolve_environments(deps.store, &app, &env_names)?;

    let github_token = match opts.github_token {
        Some(token) => Some(token),
        None if repo.kind() == ProviderKind::GitHub => ask_github_token(deps, &repo)?,
        None => None,
    };

    let branch = resolve_branch(opts.branch.as_deref(), deps.git);
    let name = pipeline_name(&app, repo.name())?;
    tracing::debug!(pipeline = %name, branch = %branch, "provisioning pipeline");

    let provisioner = Provisioner {
        store: deps.store,
        resources: deps.resources,
        secrets: deps.secrets,
        renderer: deps.renderer,
        workspace: deps.workspace,
    };
    let provision = provisioner.provision(&ProvisionRequest {
        pipeline_name: &name,
        app: &app,
        repo: &repo,
        branch: &branch,
        environments: &environments,
        github_token: github_token.as_deref(),
    })?;

    Ok(InitReport {
        app,
        pipeline_name: name,
        repository: repo,
        branch,
        environments,
        provision,
    })
}

/// The application the pipeline belongs to, checked against the workspace
/// and the store.
fn validate_app<R>(deps: &Deps<'_, R>, requested: Option<&str>) -> Result<String, InitError> {
    let registered = deps
        .workspace
        .summary()
        .map_err(InitError::ReadWorkspace)?
        .map(|s| s.application);

    let app = match (requested, registered) {
        (None, None) => return Err(InitError::NoApplication),
        (Some(requested), Some(registered)) if requested != registered => {
            return Err(InitError::AppMismatch {
                requested: requested.to_string(),
                registered,
            });
        }
        (Some(requested), _) => requested.to_string(),
        (None, Some(registered)) => registered,
    };

    deps.store
        .get_application(&app)
        .map_err(|cause| InitError::GetApplication {
            app: app.clone(),
            cause,
        })?;
    Ok(app)
}

fn select_url<R: CommandRunner>(deps: &Deps<'_, R>) -> Result<String, InitError> {
    let listing = deps.git.remotes().unwrap_or_else(|err| {
        tracing::debug!(error = %err, "listing remotes failed");
        String::new()
    });

    match Candidates::from(discover_candidates(&listing)) {
        Candidates::None => Err(InitError::NoRepositoryFound),
        Candidates::Single(url) => {
            tracing::debug!(url = %url, "using only remote");
            Ok(url)
        }
        Candidates::Multiple(urls) => deps
            .prompter
            .select_one(SELECT_URL_PROMPT, &urls)
            .map_err(InitError::SelectUrl),
    }
}

fn select_environments<R>(deps: &Deps<'_, R>, app: &str) -> Result<Vec<String>, InitError> {
    let available: Vec<String> = deps
        .store
        .list_environments(app)
        .map_err(|cause| InitError::ListEnvironments {
            app: app.to_string(),
            cause,
        })?
        .into_iter()
        .map(|env| env.name)
        .collect();
    if available.is_empty() {
        return Err(InitError::NoEnvironments);
    }

    let chosen = deps
        .prompter
        .select_many(SELECT_ENVS_PROMPT, &available)
        .map_err(InitError::SelectEnvironments)?;
    if chosen.is_empty() {
        return Err(InitError::NoEnvironments);
    }
    Ok(chosen)
}

/// Masked prompt for a GitHub token. Empty answers and non-interactive
/// sessions mean no token.
fn ask_github_token<R>(deps: &Deps<'_, R>, repo: &RepoUrl) -> Result<Option<String>, InitError> {
    let message = format!(
        "Please enter your GitHub Personal Access Token for your repository {}",
        repo.name()
    );
    match deps.prompter.password(&message) {
        Ok(token) if token.is_empty() => Ok(None),
        Ok(token) => Ok(Some(token)),
        Err(PromptError::NotInteractive) => Ok(None),
        Err(err) => Err(InitError::GitHubToken(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Region;
    use crate::git::mock::MockRunner;
    use crate::secrets::mock::MockSecretStore;
    use crate::store::mock::{MockConfigStore, MockResourcesGetter};
    use crate::template::mock::MockParser;
    use crate::ui::prompts::mock::{Answer, MockPrompter};
    use crate::workspace::mock::MockWorkspace;

    const REMOTES: &str = "git remote -v";
    const BRANCH: &str = "git rev-parse --abbrev-ref HEAD";

    struct Fixture {
        git: Git<MockRunner>,
        store: MockConfigStore,
        resources: MockResourcesGetter,
        secrets: MockSecretStore,
        renderer: MockParser,
        workspace: MockWorkspace,
        prompter: MockPrompter,
        region: Region,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                git: Git::new(MockRunner::new().with_output(BRANCH, "main\n")),
                store: MockConfigStore::new()
                    .with_app("badgoose")
                    .with_env("badgoose", "test", "us-west-2", false)
                    .with_env("badgoose", "prod", "us-west-2", true),
                resources: MockResourcesGetter::new().with_bucket("us-west-2", "bucket"),
                secrets: MockSecretStore::new(),
                renderer: MockParser::returning("version: 0.2\n"),
                workspace: MockWorkspace::new().with_application("badgoose"),
                prompter: MockPrompter::new(),
                region: Region::new("us-west-2").unwrap(),
            }
        }

        fn run(&self, opts: InitOptions) -> Result<InitReport, InitError> {
            let deps = Deps {
                git: &self.git,
                store: &self.store,
                resources: &self.resources,
                secrets: &self.secrets,
                renderer: &self.renderer,
                workspace: &self.workspace,
                prompter: &self.prompter,
            };
            init_pipeline(
                &deps,
                &Session {
                    region: self.region.clone(),
                },
                opts,
            )
        }
    }

    fn opts(url: &str, envs: &[&str]) -> InitOptions {
        InitOptions {
            url: Some(url.to_string()),
            environments: envs.iter().map(|s| s.to_string()).collect(),
            github_token: Some(String::new()),
            ..Default::default()
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn no_application_anywhere() {
            let mut fx = Fixture::new();
            fx.workspace = MockWorkspace::new();
            let err = fx.run(opts("https://github.com/badgoose/goose", &["test"])).unwrap_err();
            assert_eq!(
                err.to_string(),
                "could not find an application attached to this workspace, \
                 please run the app init command first"
            );
        }

        #[test]
        fn flag_conflicts_with_workspace() {
            let fx = Fixture::new();
            let mut o = opts("https://github.com/badgoose/goose", &["test"]);
            o.app = Some("goodgoose".to_string());
            let err = fx.run(o).unwrap_err();
            assert_eq!(
                err.to_string(),
                "cannot specify app goodgoose because the workspace is already \
                 registered with app badgoose"
            );
        }

        #[test]
        fn flag_without_workspace() {
            let mut fx = Fixture::new();
            fx.workspace = MockWorkspace::new();
            let mut o = opts("https://github.com/badgoose/goose", &["test"]);
            o.app = Some("badgoose".to_string());
            assert_eq!(fx.run(o).unwrap().app, "badgoose");
        }

        #[test]
        fn unknown_application() {
            let mut fx = Fixture::new();
            fx.workspace = MockWorkspace::new().with_application("ghost");
            let err = fx.run(opts("https://github.com/badgoose/goose", &["test"])).unwrap_err();
            assert_eq!(
                err.to_string(),
                "get application ghost configuration: couldn't find application ghost in the store"
            );
        }
    }

    mod repository {
        use super::*;

        #[test]
        fn single_remote_is_selected_without_prompt() {
            let mut fx = Fixture::new();
            fx.git = Git::new(
                MockRunner::new()
                    .with_output(
                        REMOTES,
                        "origin\thttps://github.com/badgoose/goose.git (fetch)\n\
                         origin\thttps://github.com/badgoose/goose.git (push)\n\
                         mirror\thttps://gitlab.company.com/group/project.git (fetch)\n",
                    )
                    .with_output(BRANCH, "main\n"),
            );
            let mut o = opts("", &["test"]);
            o.url = None;

            let report = fx.run(o).unwrap();
            assert_eq!(report.repository.as_str(), "https://github.com/badgoose/goose");
            assert!(fx.prompter.asked().is_empty());
        }

        #[test]
        fn several_remotes_prompt() {
            let mut fx = Fixture::new();
            fx.git = Git::new(
                MockRunner::new()
                    .with_output(
                        REMOTES,
                        "origin\thttps://github.com/badgoose/goose (fetch)\n\
                         archer\tcodecommit::us-west-2://repo-man (fetch)\n",
                    )
                    .with_output(BRANCH, "main\n"),
            );
            fx.prompter =
                MockPrompter::new().answer(Answer::One("codecommit::us-west-2://repo-man".into()));
            let mut o = opts("", &["test"]);
            o.url = None;

            let report = fx.run(o).unwrap();
            assert_eq!(report.repository.kind(), ProviderKind::CodeCommit);
            assert_eq!(
                fx.prompter.asked()[0].1,
                vec![
                    "https://github.com/badgoose/goose".to_string(),
                    "codecommit::us-west-2://repo-man".to_string()
                ]
            );
        }

        #[test]
        fn no_remotes() {
            let fx = Fixture::new();
            let mut o = opts("", &["test"]);
            o.url = None;
            assert!(matches!(fx.run(o).unwrap_err(), InitError::NoRepositoryFound));
        }

        #[test]
        fn prompt_failure() {
            let mut fx = Fixture::new();
            fx.git = Git::new(MockRunner::new().with_output(
                REMOTES,
                "a\thttps://github.com/badgoose/goose (fetch)\n\
                 b\thttps://github.com/badgoose/chaOS (fetch)\n",
            ));
            fx.prompter = MockPrompter::new().answer(Answer::Fail(PromptError::Cancelled));
            let mut o = opts("", &["test"]);
            o.url = None;

            let err = fx.run(o).unwrap_err();
            assert_eq!(err.to_string(), "select URL: prompt cancelled by user");
        }

        #[test]
        fn unsupported_url() {
            let fx = Fixture::new();
            let err = fx
                .run(opts("unsupported.org/repositories/repoName", &["test"]))
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "repository unsupported.org/repositories/repoName must be from a supported \
                 provider: GitHub, CodeCommit or Bitbucket"
            );
        }

        #[test]
        fn codecommit_region_mismatch() {
            let mut fx = Fixture::new();
            fx.region = Region::new("us-east-1").unwrap();
            fx.workspace = MockWorkspace::new().with_application("demo");
            fx.store = MockConfigStore::new().with_app("demo");

            let err = fx
                .run(opts("codecommit::us-west-2://repo-man", &["test"]))
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "repository repo-man is in us-west-2, but app demo is in us-east-1; \
                 they must be in the same region"
            );
        }
    }

    mod environments {
        use super::*;

        #[test]
        fn prompts_when_none_given() {
            let mut fx = Fixture::new();
            fx.prompter = MockPrompter::new().answer(Answer::Many(vec!["test".into()]));

            let report = fx.run(opts("codecommit::us-west-2://repo-man", &[])).unwrap();
            assert_eq!(report.environments.len(), 1);
            let (message, options) = &fx.prompter.asked()[0];
            assert_eq!(message, SELECT_ENVS_PROMPT);
            assert_eq!(options, &vec!["prod".to_string(), "test".to_string()]);
        }

        #[test]
        fn empty_selection() {
            let mut fx = Fixture::new();
            fx.prompter = MockPrompter::new().answer(Answer::Many(vec![]));
            let err = fx.run(opts("codecommit::us-west-2://repo-man", &[])).unwrap_err();
            assert_eq!(
                err.to_string(),
                "at least one environment is required to create a pipeline"
            );
        }

        #[test]
        fn selection_failure() {
            let fx = Fixture::new();
            let err = fx.run(opts("codecommit::us-west-2://repo-man", &[])).unwrap_err();
            assert_eq!(err.to_string(), "select environments: not in interactive mode");
        }

        #[test]
        fn unknown_environment() {
            let fx = Fixture::new();
            let err = fx
                .run(opts("https://github.com/badgoose/goose", &["test", "staging"]))
                .unwrap_err();
            assert!(err
                .to_string()
                .starts_with("get config of environment staging: "));
        }
    }

    mod token {
        use super::*;

        #[test]
        fn prompted_for_github() {
            let mut fx = Fixture::new();
            fx.prompter = MockPrompter::new().answer(Answer::Secret("hunter2".into()));
            let mut o = opts("https://github.com/badgoose/goose", &["test"]);
            o.github_token = None;

            let report = fx.run(o).unwrap();
            assert!(report.provision.secret.is_some());
            assert_eq!(fx.secrets.requests(), vec!["github-token-badgoose-goose"]);
        }

        #[test]
        fn non_interactive_skips_secret() {
            let fx = Fixture::new();
            let mut o = opts("https://github.com/badgoose/goose", &["test"]);
            o.github_token = None;

            let report = fx.run(o).unwrap();
            assert!(report.provision.secret.is_none());
        }

        #[test]
        fn unknown_environment_fails_before_asking() {
            let mut fx = Fixture::new();
            fx.prompter = MockPrompter::new().answer(Answer::Secret("hunter2".into()));
            let mut o = opts("https://github.com/badgoose/goose", &["staging"]);
            o.github_token = None;

            let err = fx.run(o).unwrap_err();
            assert!(matches!(err, InitError::Environment(_)));
            assert!(fx.prompter.asked().is_empty());
            assert!(fx.secrets.requests().is_empty());
        }

        #[test]
        fn not_asked_for_bitbucket() {
            let fx = Fixture::new();
            let mut o = opts("https://bitbucket.org/badgoose/goose", &["test"]);
            o.github_token = None;

            fx.run(o).unwrap();
            assert!(fx.prompter.asked().is_empty());
        }
    }

    #[test]
    fn end_to_end() {
        let fx = Fixture::new();
        let mut o = opts("https://github.com/badgoose/goose", &["test", "prod"]);
        o.github_token = Some("hunter2".into());
        o.branch = Some("release".into());

        let report = fx.run(o).unwrap();
        assert_eq!(report.pipeline_name.as_str(), "pipeline-badgoose-goose");
        assert_eq!(report.branch, "release");
        let names: Vec<_> = report.environments.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["test", "prod"]);
        assert!(!report.provision.manifest.already_existed());
    }

    #[test]
    fn rerun_is_idempotent() {
        use crate::workspace::mock::Target;

        let mut fx = Fixture::new();
        fx.secrets = MockSecretStore::new().with_existing("github-token-badgoose-goose");
        fx.workspace = MockWorkspace::new()
            .with_application("badgoose")
            .with_existing(Target::Manifest)
            .with_existing(Target::Buildspec);
        let mut o = opts("https://github.com/badgoose/goose", &["test"]);
        o.github_token = Some("hunter2".into());

        let report = fx.run(o).unwrap();
        assert!(report.provision.manifest.already_existed());
        assert!(report.provision.buildspec.already_existed());
    }
}
