//! End-to-end tests for the convoy binary.
//!
//! Every test runs with `HOME` and `XDG_CONFIG_HOME` pointed into a temp
//! directory so no user configuration leaks in.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::create_dir_all(dir.path().join("home")).unwrap();
        fs::create_dir_all(dir.path().join("project")).unwrap();

        let app = dir.path().join("store/applications/badgoose");
        fs::create_dir_all(app.join("environments")).unwrap();
        fs::write(app.join("application.toml"), "name = \"badgoose\"\n").unwrap();
        fs::write(
            app.join("environments/test.toml"),
            "name = \"test\"\nregion = \"us-west-2\"\n",
        )
        .unwrap();

        Self { dir }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn register_workspace(&self) {
        let dir = self.path("project/convoy");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(".workspace"), "application = \"badgoose\"\n").unwrap();
    }

    /// `convoy --cwd <project> --no-interactive ...` with an isolated environment.
    fn convoy(&self) -> Command {
        let mut cmd = Command::cargo_bin("convoy").unwrap();
        cmd.env("HOME", self.path("home"))
            .env("XDG_CONFIG_HOME", self.path("home/.config"))
            .env_remove("CONVOY_CONFIG")
            .env_remove("CONVOY_GITHUB_ACCESS_TOKEN")
            .env_remove("AWS_DEFAULT_REGION")
            .env_remove("RUST_LOG")
            .env("AWS_REGION", "us-west-2")
            .env("CONVOY_STORE", self.path("store"))
            .arg("--cwd")
            .arg(self.path("project"))
            .arg("--no-interactive");
        cmd
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("convoy")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pipeline"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("convoy")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("convoy"));
}

#[test]
fn bash_completion() {
    Command::cargo_bin("convoy")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_convoy"));
}

#[test]
fn init_without_application_fails() {
    let env = Env::new();
    env.convoy()
        .args(["pipeline", "init", "--url", "https://github.com/badgoose/goose"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "could not find an application attached to this workspace",
        ));
}

#[test]
fn init_rejects_unsupported_provider() {
    let env = Env::new();
    env.register_workspace();
    env.convoy()
        .args([
            "pipeline",
            "init",
            "--url",
            "https://gitlab.com/badgoose/goose",
            "-e",
            "test",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "repository https://gitlab.com/badgoose/goose must be from a supported provider: \
             GitHub, CodeCommit or Bitbucket",
        ));
}

#[test]
fn init_without_region_fails() {
    let env = Env::new();
    env.register_workspace();
    env.convoy()
        .env_remove("AWS_REGION")
        .args(["pipeline", "init", "--url", "https://github.com/badgoose/goose"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no region configured"));
}

#[test]
fn init_writes_pipeline_files_and_is_rerunnable() {
    let env = Env::new();
    env.register_workspace();

    let args = [
        "pipeline",
        "init",
        "--url",
        "https://github.com/badgoose/goose",
        "-e",
        "test",
        "--git-branch",
        "release",
        "--github-access-token",
        "hunter2",
    ];

    env.convoy()
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("pipeline-badgoose-goose"))
        .stdout(predicate::str::contains("Wrote pipeline manifest"))
        .stdout(predicate::str::contains("Stored access token secret"));

    let manifest = read(&env.path("project/convoy/pipeline.yml"));
    assert!(manifest.contains("branch: release"));
    assert!(manifest.contains("access_token_secret: github-token-badgoose-goose"));
    assert!(env.path("project/convoy/buildspec.yml").exists());

    let secrets = read(&env.path("home/.convoy/secrets.toml"));
    assert!(secrets.contains("github-token-badgoose-goose"));

    env.convoy()
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(read(&env.path("project/convoy/pipeline.yml")), manifest);
}

#[test]
fn quiet_suppresses_output() {
    let env = Env::new();
    env.register_workspace();
    env.convoy()
        .args([
            "-q",
            "pipeline",
            "init",
            "--url",
            "codecommit::us-west-2://repo-man",
            "-e",
            "test",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(env.path("project/convoy/pipeline.yml").exists());
}
